use serde_json::Value;

use crate::chat::Tool;

use super::args::{parse_args, validate_args};
use super::builtin::concierge_tools;
use super::context::ToolContext;
use super::definition::{ToolDefinition, ToolOutput};
use super::error::ToolError;

/// Arguments that passed validation, ready for [`ToolRegistry::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCall {
    pub name: &'static str,
    pub args: Value,
}

#[derive(Clone, Debug)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    context: ToolContext,
}

impl ToolRegistry {
    pub fn new(context: ToolContext) -> Self {
        Self {
            tools: concierge_tools(),
            context,
        }
    }

    /// Get the list of tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name == name)
    }

    pub fn schemas(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDefinition::schema).collect()
    }

    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    /// Resolves the tool and checks raw arguments against its schema.
    pub fn validate(&self, name: &str, args_json: &str) -> Result<ValidatedCall, ToolError> {
        let tool = self.find(name)?;
        let args = parse_args(tool.name, args_json)?;
        validate_args(tool, &args)?;
        Ok(ValidatedCall {
            name: tool.name,
            args,
        })
    }

    pub fn run(&self, call: &ValidatedCall) -> Result<ToolOutput, ToolError> {
        let tool = self.find(call.name)?;
        (tool.handler)(&self.context, &call.args)
    }

    fn find(&self, name: &str) -> Result<&ToolDefinition, ToolError> {
        self.tools
            .iter()
            .find(|tool| tool.name == name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new(ToolContext::default())
    }
}
