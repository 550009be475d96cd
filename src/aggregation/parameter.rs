use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// How a time series collapses into one display value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Sum of every valid sample in the window.
    SumOverWindow,
    /// Most recent valid sample.
    LatestByTimestamp,
}

/// Metric selected for display across all stations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    #[default]
    AccumulatedRain,
    InstantRain,
    LandslideRain,
    RiverLevel,
    Temperature,
}

impl ParameterType {
    pub const ALL: [Self; 5] = [
        Self::AccumulatedRain,
        Self::InstantRain,
        Self::LandslideRain,
        Self::RiverLevel,
        Self::Temperature,
    ];

    #[must_use]
    pub const fn policy(self) -> AggregationPolicy {
        match self {
            Self::AccumulatedRain => AggregationPolicy::SumOverWindow,
            Self::InstantRain | Self::LandslideRain | Self::RiverLevel | Self::Temperature => {
                AggregationPolicy::LatestByTimestamp
            }
        }
    }

    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::AccumulatedRain | Self::InstantRain | Self::LandslideRain => "mm",
            Self::RiverLevel => "m",
            Self::Temperature => "°C",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AccumulatedRain => "Accumulated rain",
            Self::InstantRain => "Instant rain",
            Self::LandslideRain => "Landslide rain",
            Self::RiverLevel => "River level",
            Self::Temperature => "Temperature",
        }
    }

    /// Whether results below zero are clamped to zero. Temperature is the
    /// only metric allowed to go negative.
    #[must_use]
    pub const fn clamps_negative(self) -> bool {
        !matches!(self, Self::Temperature)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccumulatedRain => "accumulated_rain",
            Self::InstantRain => "instant_rain",
            Self::LandslideRain => "landslide_rain",
            Self::RiverLevel => "river_level",
            Self::Temperature => "temperature",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown parameter: {0}")]
pub struct UnknownParameter(pub String);

impl FromStr for ParameterType {
    type Err = UnknownParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| UnknownParameter(s.to_string()))
    }
}
