use serde::{Deserialize, Serialize};

use super::{Id, Metric};

/// Inclusive acceptable range for one metric.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound, inclusive
    pub min: f64,
    /// Upper bound, inclusive
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Finite bounds in the right order.
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Range as accepted at the API boundary. The scalar-baseline shape is a
/// legacy schema generation; it is normalised to [`Range`] on write and
/// never reaches storage or evaluation.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeSpec {
    /// Canonical bounds
    Bounds(Range),
    /// Legacy scalar baseline with implicit upper delta
    Baseline {
        /// Lower bound, inclusive
        baseline: f64,
        /// Width above the baseline, inclusive
        tolerance: f64,
    },
}

impl RangeSpec {
    pub fn normalize(self) -> Range {
        match self {
            RangeSpec::Bounds(range) => range,
            RangeSpec::Baseline {
                baseline,
                tolerance,
            } => Range::new(baseline, baseline + tolerance),
        }
    }
}

/// The three acceptable ranges of a plant profile.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlantRanges {
    /// Acceptable soil moisture
    pub moisture: Range,
    /// Acceptable light level
    pub light: Range,
    /// Acceptable temperature in Celsius
    pub temperature: Range,
}

impl PlantRanges {
    pub fn range(&self, metric: Metric) -> Range {
        match metric {
            Metric::Moisture => self.moisture,
            Metric::Light => self.light,
            Metric::Temperature => self.temperature,
        }
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlantRequest {
    /// Plant profile name
    pub name: String,
    /// Care description
    pub description: Option<String>,
    /// Photo reference
    pub photo: Option<String>,
    /// Acceptable soil moisture
    pub moisture: RangeSpec,
    /// Acceptable light level
    pub light: RangeSpec,
    /// Acceptable temperature in Celsius
    pub temperature: RangeSpec,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantResponse {
    /// Plant identifier
    pub id: Id,
    /// Plant profile name
    pub name: String,
    /// Care description
    pub description: Option<String>,
    /// Photo reference
    pub photo: Option<String>,
    /// Acceptable soil moisture
    pub moisture: Range,
    /// Acceptable light level
    pub light: Range,
    /// Acceptable temperature in Celsius
    pub temperature: Range,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_spec_normalizes_to_bounds() {
        let spec: RangeSpec = serde_json::from_str(r#"{"baseline": 200.0, "tolerance": 400.0}"#)
            .expect("legacy shape should deserialize");

        assert_eq!(spec.normalize(), Range::new(200.0, 600.0));
    }

    #[test]
    fn test_bounds_spec_passes_through() {
        let spec: RangeSpec = serde_json::from_str(r#"{"min": 18.0, "max": 30.0}"#)
            .expect("canonical shape should deserialize");

        assert_eq!(spec.normalize(), Range::new(18.0, 30.0));
    }

    #[test]
    fn test_range_well_formedness() {
        assert!(Range::new(0.0, 0.0).is_well_formed());
        assert!(!Range::new(30.0, 18.0).is_well_formed());
        assert!(!Range::new(f64::NAN, 1.0).is_well_formed());
        assert!(!Range::new(0.0, f64::INFINITY).is_well_formed());
    }
}
