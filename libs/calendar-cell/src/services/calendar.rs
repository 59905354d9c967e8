use std::sync::Arc;

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use tracing::{debug, warn};

use shared_database::{AppState, ClinicStore};
use shared_models::{Appointment, NewAppointment};

use crate::models::{CalendarError, MAX_APPOINTMENTS_PER_SLOT, SLOT_INTERVAL_MINUTES};

/// Drops the time of day, keeping midnight of the same calendar date.
///
/// Appointment queries match this exact timestamp only; appointments at any
/// other time of that day are not returned. Callers rely on that behavior,
/// so it is not a day-range query.
pub fn normalize_to_midnight(appointment_date: NaiveDateTime) -> NaiveDateTime {
    appointment_date.date().and_time(NaiveTime::MIN)
}

pub fn is_slot_aligned(appointment_datetime: NaiveDateTime) -> bool {
    appointment_datetime.minute() % SLOT_INTERVAL_MINUTES == 0
}

pub struct CalendarService {
    store: Arc<dyn ClinicStore>,
}

impl CalendarService {
    pub fn new(state: &AppState) -> Self {
        Self::with_store(state.store.clone())
    }

    pub fn with_store(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    /// Appointments for a doctor stored at midnight of `appointment_date`.
    pub async fn get_appointments(
        &self,
        doctor_id: i64,
        appointment_date: NaiveDateTime,
    ) -> Result<Vec<Appointment>, CalendarError> {
        self.require_doctor(doctor_id).await?;

        let midnight = normalize_to_midnight(appointment_date);
        debug!("Fetching appointments for doctor {} at {}", doctor_id, midnight);

        Ok(self.store.find_appointments(doctor_id, midnight).await?)
    }

    pub async fn delete_appointment(&self, appointment_id: i64) -> Result<(), CalendarError> {
        debug!("Deleting appointment {}", appointment_id);

        if !self.store.delete_appointment(appointment_id).await? {
            return Err(CalendarError::AppointmentNotFound(appointment_id));
        }

        Ok(())
    }

    /// Applies the admission rule and books the appointment, returning its id.
    ///
    /// Checks run in a fixed order and the first failure wins: slot
    /// alignment, doctor lookup, slot capacity, patient lookup. The insert
    /// re-checks capacity inside the store, so a slot filled by a concurrent
    /// booking after the capacity check still fails with `SlotFull`.
    pub async fn add_new_appointment(
        &self,
        doctor_id: i64,
        patient_id: i64,
        appointment_datetime: NaiveDateTime,
        appointment_type: String,
    ) -> Result<i64, CalendarError> {
        if !is_slot_aligned(appointment_datetime) {
            return Err(CalendarError::InvalidSlot {
                minute: appointment_datetime.minute(),
            });
        }

        self.require_doctor(doctor_id).await?;

        let existing = self
            .store
            .count_appointments(doctor_id, appointment_datetime)
            .await?;
        if existing >= MAX_APPOINTMENTS_PER_SLOT {
            warn!(
                "Slot full for doctor {} at {} ({} appointments)",
                doctor_id, appointment_datetime, existing
            );
            return Err(CalendarError::SlotFull {
                doctor_id,
                at: appointment_datetime,
            });
        }

        if self.store.get_patient(patient_id).await?.is_none() {
            return Err(CalendarError::PatientNotFound(patient_id));
        }

        let appointment = NewAppointment::new(Some(doctor_id), Some(patient_id))
            .at(appointment_datetime)
            .with_type(appointment_type);

        let created = self
            .store
            .insert_appointment_within_capacity(appointment, MAX_APPOINTMENTS_PER_SLOT)
            .await?
            .ok_or(CalendarError::SlotFull {
                doctor_id,
                at: appointment_datetime,
            })?;

        debug!(
            "Appointment {} booked for doctor {} and patient {} at {}",
            created.id, doctor_id, patient_id, appointment_datetime
        );

        Ok(created.id)
    }

    async fn require_doctor(&self, doctor_id: i64) -> Result<(), CalendarError> {
        match self.store.get_doctor(doctor_id).await? {
            Some(_) => Ok(()),
            None => Err(CalendarError::DoctorNotFound(doctor_id)),
        }
    }
}
