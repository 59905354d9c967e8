// libs/calendar-cell/src/models.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use shared_database::StoreError;
use shared_models::datetime::wire_format;
use shared_models::Appointment;

/// Appointments must start on a quarter hour.
pub const SLOT_INTERVAL_MINUTES: u32 = 15;

/// Upper bound of appointments sharing one (doctor, timestamp) slot.
pub const MAX_APPOINTMENTS_PER_SLOT: usize = 3;

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAppointmentsRequest {
    pub doctor_id: i64,
    #[serde(with = "wire_format")]
    pub appointment_date: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAppointmentRequest {
    pub appointment_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAppointmentRequest {
    pub doctor_id: i64,
    pub patient_id: i64,
    #[serde(with = "wire_format")]
    pub appointment_datetime: NaiveDateTime,
    pub appointment_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentListResponse {
    pub appointments_list: Vec<Appointment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAppointmentResponse {
    pub appointment_id: i64,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("Appointment minute {minute} is not on a {interval}-minute boundary", interval = SLOT_INTERVAL_MINUTES)]
    InvalidSlot { minute: u32 },

    #[error("Doctor {0} not found")]
    DoctorNotFound(i64),

    #[error("Patient {0} not found")]
    PatientNotFound(i64),

    #[error("Slot for doctor {doctor_id} at {at} already holds {capacity} appointments", capacity = MAX_APPOINTMENTS_PER_SLOT)]
    SlotFull { doctor_id: i64, at: NaiveDateTime },

    #[error("Appointment {0} not found")]
    AppointmentNotFound(i64),

    #[error("Database error: {0}")]
    Store(#[from] StoreError),
}

impl CalendarError {
    /// Business-rule and lookup failures, as opposed to store failures.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CalendarError::Store(_))
    }
}
