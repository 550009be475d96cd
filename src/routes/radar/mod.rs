mod handlers;
mod types;

pub use handlers::{
    get_radar, next_frame, pause, play, previous_frame, refresh_catalog, set_speed,
};
pub use types::{RadarQuery, RadarResponse, SpeedRequest};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_get_radar, __path_next_frame, __path_pause, __path_play, __path_previous_frame,
    __path_refresh_catalog, __path_set_speed,
};
