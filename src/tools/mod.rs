mod args;
mod builtin;
mod context;
mod definition;
mod error;
mod handlers;
mod registry;

pub use context::ToolContext;
pub use definition::{ParamKind, ToolDefinition, ToolHandler, ToolOutput, ToolParam};
pub use error::ToolError;
pub use handlers::{
    ComparisonCategory, ComparisonData, COMPARE_MODELS, SCHEDULE_TEST_DRIVE, SHOW_INVENTORY,
    SHOW_VEHICLE_DETAILS,
};
pub use registry::{ToolRegistry, ValidatedCall};
