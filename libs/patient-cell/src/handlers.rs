use std::sync::Arc;
use axum::{
    extract::{Path, State},
    Json,
};

use shared_database::AppState;
use shared_models::error::AppError;
use shared_models::Patient;
use shared_utils::JsonBody;

use crate::models::{CreatePatientRequest, PatientError};
use crate::services::PatientService;

impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::NotFound(id) => AppError::BadRequest(format!("Patient {} not found", id)),
            PatientError::Store(e) => AppError::Internal(e.to_string()),
        }
    }
}

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreatePatientRequest>,
) -> Result<Json<Patient>, AppError> {
    let service = PatientService::new(&state);

    let patient = service.create_patient(request).await?;

    Ok(Json(patient))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Patient>, AppError> {
    let service = PatientService::new(&state);

    let patient = service.get_patient(patient_id).await?;

    Ok(Json(patient))
}
