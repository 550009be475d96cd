use serde::Serialize;
use utoipa::ToSchema;

use crate::aggregation::{ParameterType, TimeWindow};
use crate::telemetry::Station;

/// Result of one aggregation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BoardSnapshot {
    pub generation: u64,
    pub parameter: ParameterType,
    pub unit: String,
    pub label: String,
    pub window: Option<TimeWindow>,
    pub stations: Vec<Station>,
}

/// Station list shared with the map, guarded by a generation counter.
///
/// Cycles are never cancelled. Each one takes a generation when it starts
/// and its result is only applied when no newer cycle has already landed,
/// so a slow superseded cycle cannot overwrite fresher values.
#[derive(Debug, Default)]
pub struct StationBoard {
    issued: u64,
    applied: u64,
    parameter: ParameterType,
    window: Option<TimeWindow>,
    stations: Vec<Station>,
}

impl StationBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the generation number for a new cycle.
    pub fn begin_cycle(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Generation of the last applied cycle, 0 before the first one.
    #[must_use]
    pub fn applied_generation(&self) -> u64 {
        self.applied
    }

    /// Apply a finished cycle. Returns `false` and leaves the board untouched
    /// when `generation` is older than what is already shown.
    pub fn apply(
        &mut self,
        generation: u64,
        parameter: ParameterType,
        window: TimeWindow,
        stations: Vec<Station>,
    ) -> bool {
        if generation <= self.applied {
            return false;
        }
        self.applied = generation;
        self.parameter = parameter;
        self.window = Some(window);
        self.stations = stations;
        true
    }

    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            generation: self.applied,
            parameter: self.parameter,
            unit: self.parameter.unit().to_string(),
            label: self.parameter.label().to_string(),
            window: self.window,
            stations: self.stations.clone(),
        }
    }
}
