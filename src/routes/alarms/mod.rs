mod handlers;

pub use handlers::{export_alarms, list_alarms};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{__path_export_alarms, __path_list_alarms};
