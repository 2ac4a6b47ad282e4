use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::Range;

/// One monitored quantity of a potted plant.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Soil moisture
    Moisture,
    /// Light level
    Light,
    /// Air temperature in Celsius
    Temperature,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Moisture, Metric::Light, Metric::Temperature];

    /// Subject used in alert message bodies.
    pub fn subject(&self) -> &'static str {
        match self {
            Metric::Moisture => "Moisture",
            Metric::Light => "Light level",
            Metric::Temperature => "Temperature",
        }
    }

    /// Push notification title.
    pub fn alert_title(&self) -> &'static str {
        match self {
            Metric::Moisture => "Moisture Alert",
            Metric::Light => "Light Alert",
            Metric::Temperature => "Temperature Alert",
        }
    }

    /// Display unit suffix, empty for unit-less metrics.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Moisture | Metric::Light => "",
            Metric::Temperature => "°C",
        }
    }
}

/// Tri-state classification of one metric against its range.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricStatus {
    TooLow,
    Ok,
    TooHigh,
}

impl MetricStatus {
    /// Metric-specific display label.
    pub fn label(&self, metric: Metric) -> &'static str {
        match (metric, self) {
            (Metric::Moisture, MetricStatus::TooLow) => "Needs Water",
            (Metric::Moisture, MetricStatus::TooHigh) => "Too Wet",
            (Metric::Moisture, MetricStatus::Ok) => "Moisture OK",
            (Metric::Light, MetricStatus::TooLow) => "Needs More Light",
            (Metric::Light, MetricStatus::TooHigh) => "Too Bright",
            (Metric::Light, MetricStatus::Ok) => "Light OK",
            (Metric::Temperature, MetricStatus::TooLow) => "Too Cold",
            (Metric::Temperature, MetricStatus::TooHigh) => "Too Hot",
            (Metric::Temperature, MetricStatus::Ok) => "Temperature OK",
        }
    }
}

/// Latest sensor readings of a device. Only the most recent reading is
/// retained per device; `observed_at` is informational only.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Soil moisture level
    pub moisture: f64,
    /// Light level
    pub light: f64,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Collection timestamp
    pub observed_at: OffsetDateTime,
}

impl Reading {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Moisture => self.moisture,
            Metric::Light => self.light,
            Metric::Temperature => self.temperature,
        }
    }
}

/// Per-metric classification of a full reading.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub moisture: MetricStatus,
    pub light: MetricStatus,
    pub temperature: MetricStatus,
}

impl HealthReport {
    pub fn status(&self, metric: Metric) -> MetricStatus {
        match metric {
            Metric::Moisture => self.moisture,
            Metric::Light => self.light,
            Metric::Temperature => self.temperature,
        }
    }

    /// Display labels, the shape cached on the device row.
    pub fn summary(&self) -> HealthSummary {
        HealthSummary {
            moisture: self.moisture.label(Metric::Moisture).into(),
            light: self.light.label(Metric::Light).into(),
            temperature: self.temperature.label(Metric::Temperature).into(),
        }
    }
}

/// Human readable health labels for display.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub moisture: String,
    pub light: String,
    pub temperature: String,
}

/// Outcome for one out-of-range metric. Computed fresh per evaluation and
/// consumed immediately by the notification sink; never persisted.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDecision {
    /// Violated metric
    pub metric: Metric,
    /// Observed value
    pub current_value: f64,
    /// Range that was violated
    pub range: Range,
    /// Whether the sink should deliver a notification
    pub should_notify: bool,
    /// Human readable alert body
    pub message: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReadingRequest {
    /// Soil moisture level
    pub moisture: f64,
    /// Light level
    pub light: f64,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Optional push destination update piggybacked on the report
    pub push_token: Option<String>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Device hardware identifier
    pub uuid: Uuid,
    /// Stored reading
    pub reading: Reading,
    /// Health labels, absent when no plant is assigned
    pub status: Option<HealthSummary>,
    /// Number of push messages handed to the sink
    pub alerts_sent: usize,
}
