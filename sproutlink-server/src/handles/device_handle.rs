use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use sproutlink_api::models::*;
use uuid::Uuid;

use crate::errors::{ApiError, DeviceError, PlantError};
use crate::models::{Device, Plant};
use crate::repositories::{DeviceRepository, PlantRepository};
use crate::services::{NotificationService, evaluate_device};

#[derive(Clone)]
pub struct DeviceState {
    pub device_repository: Arc<DeviceRepository>,
    pub plant_repository: Arc<PlantRepository>,
}

pub fn device_router(device_state: DeviceState) -> Router {
    Router::new()
        .route("/api/devices", post(register_device))
        .route("/api/devices/:device_uuid", get(get_device_by_uuid))
        .route("/api/devices/:device_uuid/plant", post(assign_plant))
        .route("/api/devices/:device_uuid/push-token", post(set_push_token))
        .with_state(device_state)
}

/// Assemble the full device view. When a reading and an assigned plant
/// both exist the health report is recomputed from them and the cached
/// status column refreshed; the cache is display-only and never consulted
/// as a source of truth.
async fn build_device_response(
    state: &DeviceState,
    device: Device,
) -> Result<DeviceResponse, ApiError> {
    let plant: Option<Plant> = match device.plant_id {
        Some(plant_id) => state.plant_repository.find_by_id(plant_id).await?,
        None => None,
    };

    let reading = device
        .latest_reading()
        .map_err(|e| anyhow!("Failed to decode stored reading: {}", e))?;

    let status = match (&reading, &plant) {
        (Some(reading), Some(plant)) => {
            let ranges = plant
                .ranges()
                .map_err(|e| anyhow!("Failed to decode stored ranges: {}", e))?;

            let evaluation = evaluate_device(reading, Some(&ranges))?;
            let summary = evaluation.report.summary();

            let snapshot = serde_json::to_value(&summary)
                .map_err(|e| anyhow!("Failed to serialize status: {}", e))?;

            let mut tx = state.device_repository.get_pool().begin().await?;
            state
                .device_repository
                .update_status(device.id, &snapshot, &mut tx)
                .await?;
            tx.commit().await?;

            Some(summary)
        }
        _ => None,
    };

    let plant_response = plant
        .as_ref()
        .map(Plant::to_response)
        .transpose()
        .map_err(|e| anyhow!("Failed to decode stored ranges: {}", e))?;

    let uuid = Uuid::parse_str(&device.uuid)
        .map_err(|e| anyhow!("Malformed device uuid in storage: {}", e))?;

    Ok(DeviceResponse {
        id: device.id,
        uuid,
        name: device.name,
        push_token: device.push_token,
        reading,
        plant: plant_response,
        status,
    })
}

#[utoipa::path(
    post,
    path = "/api/devices",
    tag = "device",
    request_body = RegisterDeviceRequest,
    responses(
        (status = 200, description = "Device registered successfully", body = DeviceResponse),
        (status = 400, description = "Invalid request parameters"),
        (status = 409, description = "Device uuid already registered"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register_device(
    State(state): State<DeviceState>,
    Json(body): Json<RegisterDeviceRequest>,
) -> Result<Json<DeviceResponse>, ApiError> {
    if body.name.is_empty() {
        return Err(DeviceError::InvalidRequest.into());
    }

    if let Ok(Some(_)) = state
        .device_repository
        .find_by_uuid(&body.uuid.to_string())
        .await
    {
        return Err(DeviceError::DeviceUuidExists.into());
    }

    let device = Device {
        id: 0,
        uuid: body.uuid.to_string(),
        name: body.name.clone(),
        plant_id: None,
        push_token: None,
        reading: None,
        status: None,
    };

    let mut tx = state.device_repository.get_pool().begin().await?;

    let device_id = state.device_repository.create(&device, &mut tx).await?;

    tx.commit().await?;

    let created_device = state
        .device_repository
        .find_by_id(device_id)
        .await?
        .ok_or(DeviceError::DeviceNotFound)?;

    let device_response = build_device_response(&state, created_device).await?;

    Ok(Json(device_response))
}

#[utoipa::path(
    get,
    path = "/api/devices/{device_uuid}",
    tag = "device",
    params(
        ("device_uuid" = Uuid, Path, description = "Device hardware identifier")
    ),
    responses(
        (status = 200, description = "Successfully retrieved device details", body = DeviceResponse),
        (status = 404, description = "Device not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_device_by_uuid(
    State(state): State<DeviceState>,
    Path(device_uuid): Path<Uuid>,
) -> Result<Json<DeviceResponse>, ApiError> {
    let device = state
        .device_repository
        .find_by_uuid(&device_uuid.to_string())
        .await?
        .ok_or(DeviceError::DeviceNotFound)?;

    let device_response = build_device_response(&state, device).await?;

    Ok(Json(device_response))
}

#[utoipa::path(
    post,
    path = "/api/devices/{device_uuid}/plant",
    tag = "device",
    params(
        ("device_uuid" = Uuid, Path, description = "Device hardware identifier")
    ),
    request_body = AssignPlantRequest,
    responses(
        (status = 200, description = "Plant assigned successfully", body = DeviceResponse),
        (status = 404, description = "Device or plant not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn assign_plant(
    State(state): State<DeviceState>,
    Path(device_uuid): Path<Uuid>,
    Json(body): Json<AssignPlantRequest>,
) -> Result<Json<DeviceResponse>, ApiError> {
    let device = state
        .device_repository
        .find_by_uuid(&device_uuid.to_string())
        .await?
        .ok_or(DeviceError::DeviceNotFound)?;

    let _ = state
        .plant_repository
        .find_by_id(body.plant_id)
        .await?
        .ok_or(PlantError::PlantNotFound)?;

    let mut tx = state.device_repository.get_pool().begin().await?;

    state
        .device_repository
        .update_plant(device.id, body.plant_id, &mut tx)
        .await?;

    tx.commit().await?;

    let updated_device = state
        .device_repository
        .find_by_id(device.id)
        .await?
        .ok_or(DeviceError::DeviceNotFound)?;

    let device_response = build_device_response(&state, updated_device).await?;

    Ok(Json(device_response))
}

#[utoipa::path(
    post,
    path = "/api/devices/{device_uuid}/push-token",
    tag = "device",
    params(
        ("device_uuid" = Uuid, Path, description = "Device hardware identifier")
    ),
    request_body = PushTokenRequest,
    responses(
        (status = 204, description = "Push token assigned to device"),
        (status = 400, description = "Malformed push token"),
        (status = 404, description = "Device not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn set_push_token(
    State(state): State<DeviceState>,
    Path(device_uuid): Path<Uuid>,
    Json(body): Json<PushTokenRequest>,
) -> Result<axum::http::StatusCode, ApiError> {
    let device = state
        .device_repository
        .find_by_uuid(&device_uuid.to_string())
        .await?
        .ok_or(DeviceError::DeviceNotFound)?;

    if !NotificationService::is_valid_push_token(&body.push_token) {
        return Err(DeviceError::InvalidPushToken.into());
    }

    let mut tx = state.device_repository.get_pool().begin().await?;

    state
        .device_repository
        .update_push_token(device.id, &body.push_token, &mut tx)
        .await?;

    tx.commit().await?;

    Ok(axum::http::StatusCode::NO_CONTENT)
}
