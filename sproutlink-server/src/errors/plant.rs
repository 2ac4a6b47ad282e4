use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum PlantError {
    #[error("Plant not found")]
    PlantNotFound,

    #[error("Invalid range: bounds must be finite with min <= max")]
    InvalidRange,

    #[error("Invalid request parameters")]
    InvalidRequest,
}

impl PlantError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlantError::PlantNotFound => StatusCode::NOT_FOUND,
            PlantError::InvalidRange => StatusCode::BAD_REQUEST,
            PlantError::InvalidRequest => StatusCode::BAD_REQUEST,
        }
    }
}
