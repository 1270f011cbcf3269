mod compare;
mod inventory;
mod test_drive;
mod vehicle_details;

pub use compare::{compare_models_tool, ComparisonCategory, ComparisonData};
pub use inventory::show_inventory_tool;
pub use test_drive::schedule_test_drive_tool;
pub use vehicle_details::show_vehicle_details_tool;

pub const SHOW_VEHICLE_DETAILS: &str = "showVehicleDetails";
pub const SHOW_INVENTORY: &str = "showInventory";
pub const COMPARE_MODELS: &str = "compareModels";
pub const SCHEDULE_TEST_DRIVE: &str = "scheduleTestDrive";
