//! Schema checks applied before any handler runs.

use serde_json::{Map, Value};

use super::definition::{ParamKind, ToolDefinition};
use super::error::ToolError;

/// Parses raw model arguments. Blank input counts as `{}`.
pub(super) fn parse_args(tool: &str, raw: &str) -> Result<Value, ToolError> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(raw).map_err(|err| ToolError::invalid(tool, err.to_string()))
}

pub(super) fn validate_args(definition: &ToolDefinition, args: &Value) -> Result<(), ToolError> {
    let name = definition.name;
    let object = args
        .as_object()
        .ok_or_else(|| ToolError::invalid(name, "arguments must be a JSON object"))?;

    for required in &definition.required {
        if !object.contains_key(*required) {
            return Err(ToolError::invalid(name, format!("missing '{required}'")));
        }
    }

    for param in &definition.params {
        let Some(value) = object.get(param.name) else {
            continue;
        };
        check_kind(name, param.name, param.kind, value)?;
    }
    Ok(())
}

fn check_kind(tool: &str, field: &str, kind: ParamKind, value: &Value) -> Result<(), ToolError> {
    match kind {
        ParamKind::String => {
            if !value.is_string() {
                return Err(ToolError::invalid(tool, format!("'{field}' must be a string")));
            }
        }
        ParamKind::StringList { min_items } => {
            let items = value
                .as_array()
                .ok_or_else(|| ToolError::invalid(tool, format!("'{field}' must be an array")))?;
            if items.iter().any(|item| !item.is_string()) {
                return Err(ToolError::invalid(
                    tool,
                    format!("'{field}' must contain only strings"),
                ));
            }
            if items.len() < min_items {
                return Err(ToolError::invalid(
                    tool,
                    format!("'{field}' needs at least {min_items} item(s)"),
                ));
            }
        }
    }
    Ok(())
}

pub(super) fn string_arg<'a>(tool: &str, args: &'a Value, field: &str) -> Result<&'a str, ToolError> {
    args.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::invalid(tool, format!("missing '{field}'")))
}

pub(super) fn string_list_arg(tool: &str, args: &Value, field: &str) -> Result<Vec<String>, ToolError> {
    let items = args
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| ToolError::invalid(tool, format!("missing '{field}'")))?;
    Ok(items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect())
}
