pub mod aggregator;
pub mod board;
pub mod orchestrator;
pub mod parameter;
pub mod resolver;
pub mod window;

pub use aggregator::{aggregate, latest_by_timestamp, sum_over_window};
pub use board::{BoardSnapshot, StationBoard};
pub use orchestrator::{aggregate_stations, run_cycle, station_value};
pub use parameter::{AggregationPolicy, ParameterType, UnknownParameter};
pub use resolver::FieldCatalog;
pub use window::{ALLOWED_WINDOW_HOURS, DEFAULT_WINDOW_HOURS, TimeWindow};
