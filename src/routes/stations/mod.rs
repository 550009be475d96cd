mod handlers;
mod types;

pub use handlers::{aggregate_stations, current_stations, get_station, map_region, search_stations};
pub use types::{RegionQuery, SearchQuery, StationsQuery};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_aggregate_stations, __path_current_stations, __path_get_station, __path_map_region,
    __path_search_stations,
};
