#[path = "builder/tools.rs"]
mod tools;

pub use tools::{FunctionBuilder, ParamBuilder};
