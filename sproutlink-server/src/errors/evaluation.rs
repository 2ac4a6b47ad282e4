use axum::http::StatusCode;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("Reading value is not a finite number")]
    InvalidInput,

    #[error("No plant assigned to this device")]
    MissingProfile,
}

impl EvaluationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EvaluationError::InvalidInput => StatusCode::BAD_REQUEST,
            EvaluationError::MissingProfile => StatusCode::NOT_FOUND,
        }
    }
}
