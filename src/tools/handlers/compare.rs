use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tools::args::string_list_arg;
use crate::tools::context::ToolContext;
use crate::tools::definition::{ToolDefinition, ToolOutput, ToolParam};
use crate::tools::error::ToolError;
use crate::view::View;

use super::COMPARE_MODELS;

// The matrix is illustrative: every requested model gets the same rows.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Performance",
        &["Turbocharged Engine", "All-Wheel Drive", "Terrain Response"],
    ),
    (
        "Technology",
        &["Pivi Pro Infotainment", "Digital Display", "Meridian Audio"],
    ),
    (
        "Safety",
        &["Adaptive Cruise", "Lane Keep Assist", "Blind Spot Monitor"],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonCategory {
    pub name: String,
    pub specs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonData {
    pub models: Vec<String>,
    pub categories: Vec<ComparisonCategory>,
}

impl ComparisonData {
    pub fn for_models(models: Vec<String>) -> Self {
        let categories = CATEGORIES
            .iter()
            .map(|(name, specs)| ComparisonCategory {
                name: name.to_string(),
                specs: specs.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        Self { models, categories }
    }
}

pub fn compare_models_tool() -> ToolDefinition {
    ToolDefinition {
        name: COMPARE_MODELS,
        description: "Compare different Land Rover models side by side",
        params: vec![ToolParam::string_list(
            "models",
            "Array of model names to compare",
            1,
        )],
        required: vec!["models"],
        handler: Arc::new(exec_compare_models),
    }
}

fn exec_compare_models(_ctx: &ToolContext, args: &Value) -> Result<ToolOutput, ToolError> {
    let models = string_list_arg(COMPARE_MODELS, args, "models")?;
    let data = ComparisonData::for_models(models);
    Ok(ToolOutput {
        result: serde_json::to_value(&data)
            .map_err(|err| ToolError::invalid(COMPARE_MODELS, err.to_string()))?,
        view: View::Comparison(data),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn three_fixed_categories_regardless_of_models() {
        let ctx = ToolContext::default();
        let a = exec_compare_models(&ctx, &json!({"models": ["Defender 110", "Range Rover Sport"]}))
            .expect("compare");
        let b = exec_compare_models(&ctx, &json!({"models": ["Velar"]})).expect("compare");

        let names: Vec<_> = a.result["categories"]
            .as_array()
            .expect("categories")
            .iter()
            .map(|c| c["name"].clone())
            .collect();
        assert_eq!(names, vec![json!("Performance"), json!("Technology"), json!("Safety")]);
        assert_eq!(a.result["categories"], b.result["categories"]);
        assert_eq!(a.result["models"], json!(["Defender 110", "Range Rover Sport"]));
        assert_eq!(
            a.result["categories"][0]["specs"],
            json!(["Turbocharged Engine", "All-Wheel Drive", "Terrain Response"])
        );
    }
}
