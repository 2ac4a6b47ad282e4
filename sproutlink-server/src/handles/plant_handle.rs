use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router, middleware};
use sproutlink_api::models::*;

use crate::errors::{ApiError, PlantError};
use crate::middlewares::{TokenState, auth};
use crate::models::Plant;
use crate::repositories::PlantRepository;

#[derive(Clone)]
pub struct PlantState {
    pub plant_repository: Arc<PlantRepository>,
}

pub fn plant_router(plant_state: PlantState, token_state: TokenState) -> Router {
    // Reading profiles is open; administration requires an account
    Router::new()
        .route("/api/plants", get(get_plants))
        .route("/api/plants/:plant_id", get(get_plant_by_id))
        .route(
            "/api/plants",
            post(create_plant)
                .route_layer(middleware::from_fn_with_state(token_state.clone(), auth)),
        )
        .route(
            "/api/plants/:plant_id",
            delete(delete_plant)
                .route_layer(middleware::from_fn_with_state(token_state.clone(), auth)),
        )
        .with_state(plant_state)
}

#[utoipa::path(
    post,
    path = "/api/plants",
    tag = "plant",
    request_body = CreatePlantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Plant profile created successfully", body = PlantResponse),
        (status = 400, description = "Invalid request parameters or malformed range"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_plant(
    State(state): State<PlantState>,
    Json(body): Json<CreatePlantRequest>,
) -> Result<Json<PlantResponse>, ApiError> {
    if body.name.is_empty() {
        return Err(PlantError::InvalidRequest.into());
    }

    // Legacy baseline ranges are normalized to {min,max} here; only the
    // canonical shape is ever stored.
    let moisture = body.moisture.normalize();
    let light = body.light.normalize();
    let temperature = body.temperature.normalize();

    for range in [&moisture, &light, &temperature] {
        if !range.is_well_formed() {
            return Err(PlantError::InvalidRange.into());
        }
    }

    let plant = Plant {
        id: 0,
        name: body.name.clone(),
        description: body.description.clone(),
        photo: body.photo.clone(),
        moisture_range: serde_json::to_value(moisture)
            .map_err(|e| anyhow!("Failed to serialize range: {}", e))?,
        light_range: serde_json::to_value(light)
            .map_err(|e| anyhow!("Failed to serialize range: {}", e))?,
        temperature_range: serde_json::to_value(temperature)
            .map_err(|e| anyhow!("Failed to serialize range: {}", e))?,
    };

    let mut tx = state.plant_repository.get_pool().begin().await?;

    let plant_id = state.plant_repository.create(&plant, &mut tx).await?;

    tx.commit().await?;

    let created_plant = state
        .plant_repository
        .find_by_id(plant_id)
        .await?
        .ok_or(PlantError::PlantNotFound)?;

    let plant_response = created_plant
        .to_response()
        .map_err(|e| anyhow!("Failed to decode stored ranges: {}", e))?;

    Ok(Json(plant_response))
}

#[utoipa::path(
    get,
    path = "/api/plants",
    tag = "plant",
    responses(
        (status = 200, description = "Successfully retrieved plant profiles", body = Vec<PlantResponse>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_plants(
    State(state): State<PlantState>,
) -> Result<Json<Vec<PlantResponse>>, ApiError> {
    let plants = state.plant_repository.find_all().await?;

    let plant_responses: Vec<PlantResponse> = plants
        .iter()
        .map(Plant::to_response)
        .collect::<Result<_, _>>()
        .map_err(|e| anyhow!("Failed to decode stored ranges: {}", e))?;

    Ok(Json(plant_responses))
}

#[utoipa::path(
    get,
    path = "/api/plants/{plant_id}",
    tag = "plant",
    params(
        ("plant_id" = i32, Path, description = "Plant ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved plant profile", body = PlantResponse),
        (status = 404, description = "Plant not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_plant_by_id(
    State(state): State<PlantState>,
    Path(plant_id): Path<i32>,
) -> Result<Json<PlantResponse>, ApiError> {
    let plant = state
        .plant_repository
        .find_by_id(plant_id)
        .await?
        .ok_or(PlantError::PlantNotFound)?;

    let plant_response = plant
        .to_response()
        .map_err(|e| anyhow!("Failed to decode stored ranges: {}", e))?;

    Ok(Json(plant_response))
}

#[utoipa::path(
    delete,
    path = "/api/plants/{plant_id}",
    tag = "plant",
    params(
        ("plant_id" = i32, Path, description = "Plant ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Plant deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Plant not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_plant(
    State(state): State<PlantState>,
    Path(plant_id): Path<i32>,
) -> Result<axum::http::StatusCode, ApiError> {
    let _ = state
        .plant_repository
        .find_by_id(plant_id)
        .await?
        .ok_or(PlantError::PlantNotFound)?;

    let mut tx = state.plant_repository.get_pool().begin().await?;

    state.plant_repository.delete(plant_id, &mut tx).await?;

    tx.commit().await?;

    // Devices pointing at the profile fall back to unassigned via the
    // ON DELETE SET NULL constraint.
    Ok(axum::http::StatusCode::NO_CONTENT)
}
