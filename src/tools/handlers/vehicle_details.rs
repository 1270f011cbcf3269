use std::sync::Arc;

use serde_json::Value;

use crate::tools::args::string_arg;
use crate::tools::context::ToolContext;
use crate::tools::definition::{ToolDefinition, ToolOutput, ToolParam};
use crate::tools::error::ToolError;
use crate::view::View;

use super::SHOW_VEHICLE_DETAILS;

pub fn show_vehicle_details_tool() -> ToolDefinition {
    ToolDefinition {
        name: SHOW_VEHICLE_DETAILS,
        description: "Show detailed information about a specific Land Rover model",
        params: vec![ToolParam::string("model", "The Land Rover model name")],
        required: vec!["model"],
        handler: Arc::new(exec_show_vehicle_details),
    }
}

fn exec_show_vehicle_details(ctx: &ToolContext, args: &Value) -> Result<ToolOutput, ToolError> {
    let model = string_arg(SHOW_VEHICLE_DETAILS, args, "model")?;
    let found = ctx.catalog.find_vehicle(model);
    if found.is_fallback() {
        log::info!(
            "no catalog match for {model:?}, showing {}",
            found.vehicle().model
        );
    }
    let vehicle = found.vehicle().clone();
    Ok(ToolOutput {
        result: serde_json::to_value(&vehicle)
            .map_err(|err| ToolError::invalid(SHOW_VEHICLE_DETAILS, err.to_string()))?,
        view: View::VehicleShowcase {
            vehicle,
            fallback: found.is_fallback(),
        },
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn case_variants_yield_identical_records() {
        let ctx = ToolContext::default();
        let lower = exec_show_vehicle_details(&ctx, &json!({"model": "range rover sport"}))
            .expect("lower");
        let upper = exec_show_vehicle_details(&ctx, &json!({"model": "RANGE ROVER SPORT"}))
            .expect("upper");
        assert_eq!(lower.result, upper.result);
        assert_eq!(lower.result["model"], "Range Rover Sport");
    }

    #[test]
    fn unknown_model_shows_first_entry_flagged_as_fallback() {
        let ctx = ToolContext::default();
        let output = exec_show_vehicle_details(&ctx, &json!({"model": "nonexistent-model-xyz"}))
            .expect("fallback never fails");
        assert_eq!(output.result["model"], ctx.catalog.first().model.as_str());
        match output.view {
            View::VehicleShowcase { fallback, .. } => assert!(fallback),
            other => panic!("unexpected view: {other:?}"),
        }
    }
}
