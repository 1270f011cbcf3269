use std::sync::Arc;

use serde_json::Value;

use crate::tools::context::ToolContext;
use crate::tools::definition::{ToolDefinition, ToolOutput};
use crate::tools::error::ToolError;
use crate::view::View;

use super::SHOW_INVENTORY;

pub fn show_inventory_tool() -> ToolDefinition {
    ToolDefinition {
        name: SHOW_INVENTORY,
        description: "Display the complete Land Rover inventory available",
        params: Vec::new(),
        required: Vec::new(),
        handler: Arc::new(exec_show_inventory),
    }
}

fn exec_show_inventory(ctx: &ToolContext, _args: &Value) -> Result<ToolOutput, ToolError> {
    let vehicles = ctx.catalog.vehicles().to_vec();
    Ok(ToolOutput {
        result: serde_json::to_value(&vehicles)
            .map_err(|err| ToolError::invalid(SHOW_INVENTORY, err.to_string()))?,
        view: View::Inventory { vehicles },
    })
}
