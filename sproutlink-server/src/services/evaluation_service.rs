use sproutlink_api::models::{
    AlertDecision, HealthReport, Metric, MetricStatus, PlantRanges, Range, Reading,
};

use crate::errors::EvaluationError;

/// Result of evaluating one reading against one plant profile. Pure data;
/// persistence of the status snapshot and alert delivery are the callers'
/// concern.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub report: HealthReport,
    pub alerts: Vec<AlertDecision>,
}

/// Classify a sensor value against an acceptable range. Bounds are
/// inclusive on both ends so a value sitting exactly on a bound never
/// flaps between states.
pub fn classify(value: f64, range: &Range) -> Result<MetricStatus, EvaluationError> {
    if !value.is_finite() {
        return Err(EvaluationError::InvalidInput);
    }

    if value < range.min {
        Ok(MetricStatus::TooLow)
    } else if value > range.max {
        Ok(MetricStatus::TooHigh)
    } else {
        Ok(MetricStatus::Ok)
    }
}

/// Evaluate a full reading against the assigned plant's ranges.
///
/// Metrics are classified independently; one metric's status never
/// influences another's. Every non-Ok metric yields one alert decision.
/// `None` ranges means the device has no plant assigned and evaluation
/// cannot proceed; callers must not substitute an all-Ok report.
pub fn evaluate_device(
    reading: &Reading,
    ranges: Option<&PlantRanges>,
) -> Result<Evaluation, EvaluationError> {
    let ranges = ranges.ok_or(EvaluationError::MissingProfile)?;

    let report = HealthReport {
        moisture: classify(reading.moisture, &ranges.moisture)?,
        light: classify(reading.light, &ranges.light)?,
        temperature: classify(reading.temperature, &ranges.temperature)?,
    };

    let alerts = Metric::ALL
        .into_iter()
        .filter(|metric| report.status(*metric) != MetricStatus::Ok)
        .map(|metric| {
            let value = reading.value(metric);
            let range = ranges.range(metric);

            AlertDecision {
                metric,
                current_value: value,
                range,
                should_notify: true,
                message: alert_message(metric, value, &range),
            }
        })
        .collect();

    Ok(Evaluation { report, alerts })
}

fn alert_message(metric: Metric, value: f64, range: &Range) -> String {
    let unit = metric.unit();

    format!(
        "{} is out of range! Current: {}{} (Allowed: {}{} - {}{})",
        metric.subject(),
        value,
        unit,
        range.min,
        unit,
        range.max,
        unit
    )
}
