use std::collections::BTreeMap;

use crate::chat::{FunctionTool, ParameterProperty, ParametersSchema, Tool};

/// Builder for function parameters.
pub struct ParamBuilder {
    name: String,
    property_type: String,
    description: String,
    items: Option<Box<ParameterProperty>>,
}

impl ParamBuilder {
    /// Creates a new parameter builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_type: "string".to_string(),
            description: String::new(),
            items: None,
        }
    }

    /// Sets the parameter type.
    pub fn type_of(mut self, type_str: impl Into<String>) -> Self {
        self.property_type = type_str.into();
        self
    }

    /// Sets the parameter description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Sets the array item type for array parameters.
    pub fn items(mut self, item_property: ParameterProperty) -> Self {
        self.items = Some(Box::new(item_property));
        self
    }

    fn build(self) -> (String, ParameterProperty) {
        (
            self.name,
            ParameterProperty {
                property_type: self.property_type,
                description: self.description,
                items: self.items,
            },
        )
    }
}

/// Builder for function tools.
pub struct FunctionBuilder {
    name: String,
    description: String,
    parameters: Vec<ParamBuilder>,
    required: Vec<String>,
}

impl FunctionBuilder {
    /// Creates a new function builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parameters: Vec::new(),
            required: Vec::new(),
        }
    }

    /// Sets the function description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Adds a parameter to the function.
    pub fn param(mut self, param: ParamBuilder) -> Self {
        self.parameters.push(param);
        self
    }

    /// Marks parameters as required.
    pub fn required(mut self, param_names: Vec<String>) -> Self {
        self.required = param_names;
        self
    }

    /// Builds the function tool.
    pub fn build(self) -> Tool {
        let FunctionBuilder {
            name,
            description,
            parameters,
            required,
        } = self;

        Tool {
            tool_type: "function".to_string(),
            function: FunctionTool {
                name,
                description,
                parameters: build_parameters(parameters, required),
            },
        }
    }
}

fn build_parameters(parameters: Vec<ParamBuilder>, required: Vec<String>) -> serde_json::Value {
    let mut properties = BTreeMap::new();
    for param in parameters {
        let (name, prop) = param.build();
        properties.insert(name, prop);
    }

    serde_json::to_value(ParametersSchema {
        schema_type: "object".to_string(),
        properties,
        required,
    })
    .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn builds_object_schema_with_required_fields() {
        let tool = FunctionBuilder::new("scheduleTestDrive")
            .description("Book a drive")
            .param(ParamBuilder::new("model").description("Model name"))
            .required(vec!["model".to_string()])
            .build();

        assert_eq!(tool.tool_type, "function");
        assert_eq!(
            tool.function.parameters,
            json!({
                "type": "object",
                "properties": {
                    "model": {"type": "string", "description": "Model name"}
                },
                "required": ["model"]
            })
        );
    }

    #[test]
    fn empty_function_has_empty_properties() {
        let tool = FunctionBuilder::new("showInventory").build();
        assert_eq!(
            tool.function.parameters,
            json!({"type": "object", "properties": {}, "required": []})
        );
    }
}
