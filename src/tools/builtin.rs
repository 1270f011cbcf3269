use super::definition::ToolDefinition;
use super::handlers::{
    compare_models_tool, schedule_test_drive_tool, show_inventory_tool, show_vehicle_details_tool,
};

/// The four concierge tools, in the order they are offered to the model.
pub fn concierge_tools() -> Vec<ToolDefinition> {
    vec![
        show_vehicle_details_tool(),
        show_inventory_tool(),
        compare_models_tool(),
        schedule_test_drive_tool(),
    ]
}
