//! Provider backends.

pub mod openai;
