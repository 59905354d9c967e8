use std::sync::Arc;

use axum::{extract::State, Json};

use shared_database::AppState;
use shared_models::error::AppError;
use shared_models::Doctor;
use shared_utils::JsonBody;

use crate::models::{CreateDoctorRequest, DoctorError, DoctorListResponse};
use crate::services::DoctorService;

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::Store(e) => AppError::Internal(e.to_string()),
        }
    }
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DoctorListResponse>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctors_list = doctor_service.list_doctors().await?;

    Ok(Json(DoctorListResponse { doctors_list }))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreateDoctorRequest>,
) -> Result<Json<Doctor>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service.create_doctor(request).await?;

    Ok(Json(doctor))
}
