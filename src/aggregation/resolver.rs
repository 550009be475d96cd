use crate::aggregation::ParameterType;
use crate::telemetry::Reading;

/// Raw field names that carry each parameter.
///
/// Station schemas drift, so rain accumulation and river level are looked up
/// through ordered candidate lists. The lists are plain data and can be
/// overridden from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCatalog {
    pub rain_candidates: Vec<String>,
    /// Used when no rain candidate is present.
    pub rain_default: String,
    pub river_candidates: Vec<String>,
    pub instant_rain: String,
    pub landslide_rain: String,
    pub temperature: String,
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self {
            rain_candidates: to_strings(&["chuva", "chuva_acumulada", "precipitacao", "rain"]),
            rain_default: "chuva".to_string(),
            river_candidates: to_strings(&["nivel", "nivel_rio", "cota", "river_level"]),
            instant_rain: "chuva_instantanea".to_string(),
            landslide_rain: "chuva_deslizamento".to_string(),
            temperature: "temperatura".to_string(),
        }
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

impl FieldCatalog {
    /// Field that carries `parameter` in this batch.
    ///
    /// `None` means the value must be reported as zero without looking at
    /// any field, which only happens for river level when no candidate
    /// matches.
    #[must_use]
    pub fn resolve<'a>(&'a self, parameter: ParameterType, readings: &[Reading]) -> Option<&'a str> {
        match parameter {
            ParameterType::AccumulatedRain => Some(
                first_present(&self.rain_candidates, readings).unwrap_or(&self.rain_default),
            ),
            ParameterType::RiverLevel => first_present(&self.river_candidates, readings),
            ParameterType::InstantRain => Some(self.instant_rain.as_str()),
            ParameterType::LandslideRain => Some(self.landslide_rain.as_str()),
            ParameterType::Temperature => Some(self.temperature.as_str()),
        }
    }
}

/// First candidate present in at least one reading.
fn first_present<'a>(candidates: &'a [String], readings: &[Reading]) -> Option<&'a str> {
    candidates
        .iter()
        .find(|name| readings.iter().any(|r| r.has_field(name)))
        .map(String::as_str)
}
