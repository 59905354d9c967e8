use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime::wire_format;

/// Stored appointment. Foreign keys stay flat ids, never nested records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub doctor_id: Option<i64>,
    pub patient_id: Option<i64>,
    #[serde(with = "wire_format")]
    pub appointment_datetime: NaiveDateTime,
    pub appointment_type: Option<String>,
}

impl Appointment {
    pub fn occupies(&self, doctor_id: i64, at: NaiveDateTime) -> bool {
        self.doctor_id == Some(doctor_id) && self.appointment_datetime == at
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub doctor_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub appointment_datetime: NaiveDateTime,
    pub appointment_type: Option<String>,
}

impl NewAppointment {
    /// Starts an appointment timestamped at creation time.
    pub fn new(doctor_id: Option<i64>, patient_id: Option<i64>) -> Self {
        Self {
            doctor_id,
            patient_id,
            appointment_datetime: Utc::now().naive_utc(),
            appointment_type: None,
        }
    }

    pub fn at(mut self, appointment_datetime: NaiveDateTime) -> Self {
        self.appointment_datetime = appointment_datetime;
        self
    }

    pub fn with_type(mut self, appointment_type: impl Into<String>) -> Self {
        self.appointment_type = Some(appointment_type.into());
        self
    }

    pub fn with_id(self, id: i64) -> Appointment {
        Appointment {
            id,
            doctor_id: self.doctor_id,
            patient_id: self.patient_id,
            appointment_datetime: self.appointment_datetime,
            appointment_type: self.appointment_type,
        }
    }
}
