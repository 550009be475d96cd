//! Weather Monitor - station aggregation and radar animation for the monitoring map
//!
//! This library exposes the core modules for testing and reuse.

pub mod aggregation;
pub mod alarms;
pub mod common;
pub mod config;
pub mod error;
pub mod map;
pub mod radar;
pub mod routes;
pub mod sync;
pub mod telemetry;
