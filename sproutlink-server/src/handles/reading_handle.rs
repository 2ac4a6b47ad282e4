use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use sproutlink_api::models::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::{ApiError, DeviceError, EvaluationError};
use crate::repositories::{DeviceRepository, PlantRepository};
use crate::services::{NotificationService, evaluate_device};

#[derive(Clone)]
pub struct ReadingState {
    pub device_repository: Arc<DeviceRepository>,
    pub plant_repository: Arc<PlantRepository>,
    pub notification_service: Arc<NotificationService>,
}

pub fn reading_router(reading_state: ReadingState) -> Router {
    Router::new()
        .route("/api/devices/:device_uuid/readings", post(ingest_reading))
        .with_state(reading_state)
}

#[utoipa::path(
    post,
    path = "/api/devices/{device_uuid}/readings",
    tag = "reading",
    params(
        ("device_uuid" = Uuid, Path, description = "Device hardware identifier")
    ),
    request_body = IngestReadingRequest,
    responses(
        (status = 200, description = "Reading stored; evaluation ran if a plant is assigned", body = IngestResponse),
        (status = 400, description = "Invalid reading or malformed push token"),
        (status = 404, description = "Device not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn ingest_reading(
    State(state): State<ReadingState>,
    Path(device_uuid): Path<Uuid>,
    Json(body): Json<IngestReadingRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let device = state
        .device_repository
        .find_by_uuid(&device_uuid.to_string())
        .await?
        .ok_or(DeviceError::DeviceNotFound)?;

    // Boundary validation: the evaluator only ever receives well-typed,
    // finite values.
    if !body.moisture.is_finite() || !body.light.is_finite() || !body.temperature.is_finite() {
        return Err(EvaluationError::InvalidInput.into());
    }

    if let Some(token) = &body.push_token {
        if !NotificationService::is_valid_push_token(token) {
            return Err(DeviceError::InvalidPushToken.into());
        }
    }

    let reading = Reading {
        moisture: body.moisture,
        light: body.light,
        temperature: body.temperature,
        observed_at: OffsetDateTime::now_utc(),
    };

    let ranges = match device.plant_id {
        Some(plant_id) => state
            .plant_repository
            .find_by_id(plant_id)
            .await?
            .map(|plant| plant.ranges())
            .transpose()
            .map_err(|e| anyhow!("Failed to decode stored ranges: {}", e))?,
        None => None,
    };

    let reading_value = serde_json::to_value(reading)
        .map_err(|e| anyhow!("Failed to serialize reading: {}", e))?;

    let mut tx = state.device_repository.get_pool().begin().await?;

    state
        .device_repository
        .update_reading(device.id, &reading_value, &mut tx)
        .await?;

    if let Some(token) = &body.push_token {
        state
            .device_repository
            .update_push_token(device.id, token, &mut tx)
            .await?;
    }

    let response = match evaluate_device(&reading, ranges.as_ref()) {
        Ok(evaluation) => {
            let summary = evaluation.report.summary();
            let snapshot = serde_json::to_value(&summary)
                .map_err(|e| anyhow!("Failed to serialize status: {}", e))?;

            state
                .device_repository
                .update_status(device.id, &snapshot, &mut tx)
                .await?;
            tx.commit().await?;

            let push_token = body.push_token.as_deref().or(device.push_token.as_deref());

            let alerts_sent = state
                .notification_service
                .dispatch(device.id, &device.uuid, push_token, &evaluation.alerts)
                .await;

            IngestResponse {
                uuid: device_uuid,
                reading,
                status: Some(summary),
                alerts_sent,
            }
        }
        // No plant assigned: the reading is kept but no status can be
        // derived, and a false all-Ok must never be reported.
        Err(EvaluationError::MissingProfile) => {
            tx.commit().await?;

            IngestResponse {
                uuid: device_uuid,
                reading,
                status: None,
                alerts_sent: 0,
            }
        }
        Err(err) => return Err(err.into()),
    };

    Ok(Json(response))
}
