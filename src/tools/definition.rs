use std::sync::Arc;

use serde_json::Value;

use crate::builder::{FunctionBuilder, ParamBuilder};
use crate::chat::{ParameterProperty, Tool};
use crate::view::View;

use super::context::ToolContext;
use super::error::ToolError;

/// Runs a tool against arguments that already passed schema validation.
pub type ToolHandler =
    Arc<dyn Fn(&ToolContext, &Value) -> Result<ToolOutput, ToolError> + Send + Sync>;

/// What a handler hands back: the JSON recorded as the tool result and the
/// view shown for the turn.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub result: Value,
    pub view: View,
}

#[derive(Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ToolParam>,
    pub required: Vec<&'static str>,
    pub handler: ToolHandler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    /// Array of strings with a minimum length
    StringList { min_items: usize },
}

#[derive(Debug, Clone)]
pub struct ToolParam {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
}

impl ToolParam {
    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: ParamKind::String,
        }
    }

    pub const fn string_list(
        name: &'static str,
        description: &'static str,
        min_items: usize,
    ) -> Self {
        Self {
            name,
            description,
            kind: ParamKind::StringList { min_items },
        }
    }
}

impl ToolDefinition {
    pub fn schema(&self) -> Tool {
        let mut builder = FunctionBuilder::new(self.name).description(self.description);
        for param in &self.params {
            let mut param_builder = ParamBuilder::new(param.name).description(param.description);
            if let ParamKind::StringList { .. } = param.kind {
                param_builder = param_builder.type_of("array").items(ParameterProperty {
                    property_type: "string".to_string(),
                    description: String::new(),
                    items: None,
                });
            }
            builder = builder.param(param_builder);
        }
        builder
            .required(self.required.iter().map(|s| s.to_string()).collect())
            .build()
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}
