use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;

use shared_models::{Appointment, Doctor, NewAppointment, NewDoctor, NewPatient, Patient};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence collaborator for doctors, patients and appointments.
///
/// Every listing comes back in storage order (ascending id). Lookups return
/// `Ok(None)` for unknown ids; `Err` is reserved for the backend failing.
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait ClinicStore: Send + Sync {
    async fn insert_doctor(&self, doctor: NewDoctor) -> StoreResult<Doctor>;

    async fn list_doctors(&self) -> StoreResult<Vec<Doctor>>;

    async fn get_doctor(&self, doctor_id: i64) -> StoreResult<Option<Doctor>>;

    /// Removes the doctor and every appointment referencing it.
    async fn delete_doctor(&self, doctor_id: i64) -> StoreResult<bool>;

    async fn insert_patient(&self, patient: NewPatient) -> StoreResult<Patient>;

    async fn get_patient(&self, patient_id: i64) -> StoreResult<Option<Patient>>;

    /// Removes the patient and every appointment referencing it.
    async fn delete_patient(&self, patient_id: i64) -> StoreResult<bool>;

    /// Unconditional insert, no capacity rule applied.
    async fn insert_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment>;

    /// Inserts only while fewer than `capacity` appointments share the
    /// appointment's (doctor, timestamp) slot. `Ok(None)` means the slot was full.
    async fn insert_appointment_within_capacity(
        &self,
        appointment: NewAppointment,
        capacity: usize,
    ) -> StoreResult<Option<Appointment>>;

    async fn get_appointment(&self, appointment_id: i64) -> StoreResult<Option<Appointment>>;

    /// Appointments for `doctor_id` stored at exactly `at`.
    async fn find_appointments(
        &self,
        doctor_id: i64,
        at: NaiveDateTime,
    ) -> StoreResult<Vec<Appointment>>;

    async fn count_appointments(&self, doctor_id: i64, at: NaiveDateTime) -> StoreResult<usize>;

    async fn list_appointments(&self) -> StoreResult<Vec<Appointment>>;

    /// Returns `false` when no appointment had that id.
    async fn delete_appointment(&self, appointment_id: i64) -> StoreResult<bool>;
}
