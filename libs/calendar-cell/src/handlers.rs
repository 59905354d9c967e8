// libs/calendar-cell/src/handlers.rs
use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use shared_database::AppState;
use shared_models::error::AppError;
use shared_utils::JsonBody;

use crate::models::{
    AddAppointmentRequest, AddAppointmentResponse, AppointmentListResponse, CalendarError,
    DeleteAppointmentRequest, GetAppointmentsRequest,
};
use crate::services::CalendarService;

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        if err.is_client_error() {
            AppError::BadRequest(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

// ==============================================================================
// CALENDAR HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_appointments(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<GetAppointmentsRequest>,
) -> Result<Json<AppointmentListResponse>, AppError> {
    let calendar_service = CalendarService::new(&state);

    let appointments_list = calendar_service
        .get_appointments(request.doctor_id, request.appointment_date)
        .await?;

    Ok(Json(AppointmentListResponse { appointments_list }))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<DeleteAppointmentRequest>,
) -> Result<(), AppError> {
    let calendar_service = CalendarService::new(&state);

    calendar_service.delete_appointment(request.appointment_id).await?;

    Ok(())
}

#[axum::debug_handler]
pub async fn add_new_appointment(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<AddAppointmentRequest>,
) -> Result<Json<AddAppointmentResponse>, AppError> {
    debug!(
        "Booking request for doctor {} / patient {}",
        request.doctor_id, request.patient_id
    );
    let calendar_service = CalendarService::new(&state);

    let appointment_id = calendar_service
        .add_new_appointment(
            request.doctor_id,
            request.patient_id,
            request.appointment_datetime,
            request.appointment_type,
        )
        .await?;

    Ok(Json(AddAppointmentResponse { appointment_id }))
}
