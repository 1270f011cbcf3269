use std::sync::Arc;

use serde_json::Value;

use crate::tools::args::string_arg;
use crate::tools::context::ToolContext;
use crate::tools::definition::{ToolDefinition, ToolOutput, ToolParam};
use crate::tools::error::ToolError;
use crate::view::{TestDriveForm, View};

use super::SCHEDULE_TEST_DRIVE;

pub fn schedule_test_drive_tool() -> ToolDefinition {
    ToolDefinition {
        name: SCHEDULE_TEST_DRIVE,
        description: "Schedule a test drive for a specific Land Rover model",
        params: vec![ToolParam::string(
            "model",
            "The Land Rover model to test drive",
        )],
        required: vec!["model"],
        handler: Arc::new(exec_schedule_test_drive),
    }
}

/// Only selects the capture form; the appointment never reaches the
/// orchestrator.
fn exec_schedule_test_drive(_ctx: &ToolContext, args: &Value) -> Result<ToolOutput, ToolError> {
    let model = string_arg(SCHEDULE_TEST_DRIVE, args, "model")?;
    Ok(ToolOutput {
        result: Value::String(format!("Test drive form displayed for {model}")),
        view: View::TestDriveForm(TestDriveForm::for_model(model)),
    })
}
