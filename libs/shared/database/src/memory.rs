use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;
use tracing::debug;

use shared_models::{Appointment, Doctor, NewAppointment, NewDoctor, NewPatient, Patient};

use crate::store::{ClinicStore, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
    next_doctor_id: i64,
    next_patient_id: i64,
    next_appointment_id: i64,
}

impl Tables {
    fn allocate(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }

    fn slot_count(&self, doctor_id: i64, at: NaiveDateTime) -> usize {
        self.appointments
            .iter()
            .filter(|apt| apt.occupies(doctor_id, at))
            .count()
    }

    fn push_appointment(&mut self, appointment: NewAppointment) -> Appointment {
        let id = Self::allocate(&mut self.next_appointment_id);
        let stored = appointment.with_id(id);
        self.appointments.push(stored.clone());
        stored
    }
}

/// Process-local store. Ids are sequential per table starting at 1, and all
/// tables sit behind a single lock so conditional inserts are atomic.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClinicStore for InMemoryStore {
    async fn insert_doctor(&self, doctor: NewDoctor) -> StoreResult<Doctor> {
        let mut tables = self.tables.write().await;
        let id = Tables::allocate(&mut tables.next_doctor_id);
        let stored = doctor.with_id(id);
        tables.doctors.push(stored.clone());
        Ok(stored)
    }

    async fn list_doctors(&self) -> StoreResult<Vec<Doctor>> {
        Ok(self.tables.read().await.doctors.clone())
    }

    async fn get_doctor(&self, doctor_id: i64) -> StoreResult<Option<Doctor>> {
        let tables = self.tables.read().await;
        Ok(tables.doctors.iter().find(|d| d.id == doctor_id).cloned())
    }

    async fn delete_doctor(&self, doctor_id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.doctors.len();
        tables.doctors.retain(|d| d.id != doctor_id);
        if tables.doctors.len() == before {
            return Ok(false);
        }

        tables.appointments.retain(|apt| apt.doctor_id != Some(doctor_id));
        debug!("Deleted doctor {} and cascaded to appointments", doctor_id);
        Ok(true)
    }

    async fn insert_patient(&self, patient: NewPatient) -> StoreResult<Patient> {
        let mut tables = self.tables.write().await;
        let id = Tables::allocate(&mut tables.next_patient_id);
        let stored = patient.with_id(id);
        tables.patients.push(stored.clone());
        Ok(stored)
    }

    async fn get_patient(&self, patient_id: i64) -> StoreResult<Option<Patient>> {
        let tables = self.tables.read().await;
        Ok(tables.patients.iter().find(|p| p.id == patient_id).cloned())
    }

    async fn delete_patient(&self, patient_id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.patients.len();
        tables.patients.retain(|p| p.id != patient_id);
        if tables.patients.len() == before {
            return Ok(false);
        }

        tables.appointments.retain(|apt| apt.patient_id != Some(patient_id));
        debug!("Deleted patient {} and cascaded to appointments", patient_id);
        Ok(true)
    }

    async fn insert_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment> {
        Ok(self.tables.write().await.push_appointment(appointment))
    }

    async fn insert_appointment_within_capacity(
        &self,
        appointment: NewAppointment,
        capacity: usize,
    ) -> StoreResult<Option<Appointment>> {
        let mut tables = self.tables.write().await;

        if let Some(doctor_id) = appointment.doctor_id {
            if tables.slot_count(doctor_id, appointment.appointment_datetime) >= capacity {
                return Ok(None);
            }
        }

        Ok(Some(tables.push_appointment(appointment)))
    }

    async fn get_appointment(&self, appointment_id: i64) -> StoreResult<Option<Appointment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .appointments
            .iter()
            .find(|apt| apt.id == appointment_id)
            .cloned())
    }

    async fn find_appointments(
        &self,
        doctor_id: i64,
        at: NaiveDateTime,
    ) -> StoreResult<Vec<Appointment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .appointments
            .iter()
            .filter(|apt| apt.occupies(doctor_id, at))
            .cloned()
            .collect())
    }

    async fn count_appointments(&self, doctor_id: i64, at: NaiveDateTime) -> StoreResult<usize> {
        Ok(self.tables.read().await.slot_count(doctor_id, at))
    }

    async fn list_appointments(&self) -> StoreResult<Vec<Appointment>> {
        Ok(self.tables.read().await.appointments.clone())
    }

    async fn delete_appointment(&self, appointment_id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.appointments.len();
        tables.appointments.retain(|apt| apt.id != appointment_id);
        Ok(tables.appointments.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 10, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn assigns_sequential_ids_per_table() {
        let store = InMemoryStore::new();

        let bob = store.insert_doctor(NewDoctor::new("Bob", "Dylan")).await.unwrap();
        let mike = store.insert_doctor(NewDoctor::new("Mike", "Dane")).await.unwrap();
        let alex = store.insert_patient(NewPatient::new("Alex", "Mitchell")).await.unwrap();

        assert_eq!((bob.id, mike.id, alex.id), (1, 2, 1));
        assert_eq!(store.list_doctors().await.unwrap(), vec![bob.clone(), mike]);
        assert_eq!(store.get_doctor(bob.id).await.unwrap(), Some(bob));
        assert_eq!(store.get_doctor(99).await.unwrap(), None);
        assert_eq!(store.get_patient(alex.id).await.unwrap(), Some(alex));
    }

    #[tokio::test]
    async fn filters_by_exact_slot() {
        let store = InMemoryStore::new();
        store.insert_appointment(NewAppointment::new(Some(1), Some(1)).at(at(9, 0))).await.unwrap();
        store.insert_appointment(NewAppointment::new(Some(1), Some(2)).at(at(9, 0))).await.unwrap();
        store.insert_appointment(NewAppointment::new(Some(1), Some(2)).at(at(9, 15))).await.unwrap();
        store.insert_appointment(NewAppointment::new(Some(2), Some(2)).at(at(9, 0))).await.unwrap();

        let found = store.find_appointments(1, at(9, 0)).await.unwrap();
        assert_eq!(found.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(store.count_appointments(1, at(9, 0)).await.unwrap(), 2);
        assert_eq!(store.count_appointments(1, at(9, 30)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn conditional_insert_respects_capacity() {
        let store = InMemoryStore::new();
        for patient_id in 1..=2 {
            let inserted = store
                .insert_appointment_within_capacity(
                    NewAppointment::new(Some(1), Some(patient_id)).at(at(10, 30)),
                    2,
                )
                .await
                .unwrap();
            assert!(inserted.is_some());
        }

        let rejected = store
            .insert_appointment_within_capacity(NewAppointment::new(Some(1), Some(3)).at(at(10, 30)), 2)
            .await
            .unwrap();
        assert!(rejected.is_none());
        assert_eq!(store.list_appointments().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn concurrent_conditional_inserts_never_overfill() {
        let store = Arc::new(InMemoryStore::new());

        let attempts = (1..=10).map(|patient_id| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .insert_appointment_within_capacity(
                        NewAppointment::new(Some(1), Some(patient_id)).at(at(11, 45)),
                        3,
                    )
                    .await
                    .unwrap()
            })
        });

        let admitted = futures::future::join_all(attempts)
            .await
            .into_iter()
            .filter(|res| matches!(res, Ok(Some(_))))
            .count();

        assert_eq!(admitted, 3);
        assert_eq!(store.count_appointments(1, at(11, 45)).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn deleting_doctor_or_patient_cascades() {
        let store = InMemoryStore::new();
        let doctor = store.insert_doctor(NewDoctor::new("Bob", "Dylan")).await.unwrap();
        let other = store.insert_doctor(NewDoctor::new("Mike", "Dane")).await.unwrap();
        let patient = store.insert_patient(NewPatient::new("John", "Brown")).await.unwrap();

        store.insert_appointment(NewAppointment::new(Some(doctor.id), Some(patient.id))).await.unwrap();
        let kept = store
            .insert_appointment(NewAppointment::new(Some(other.id), None))
            .await
            .unwrap();
        store.insert_appointment(NewAppointment::new(Some(other.id), Some(patient.id))).await.unwrap();

        assert!(store.delete_doctor(doctor.id).await.unwrap());
        assert!(!store.delete_doctor(doctor.id).await.unwrap());
        assert_eq!(store.list_appointments().await.unwrap().len(), 2);

        assert!(store.delete_patient(patient.id).await.unwrap());
        assert_eq!(store.list_appointments().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn delete_appointment_reports_missing_ids() {
        let store = InMemoryStore::new();
        let apt = store.insert_appointment(NewAppointment::new(Some(1), Some(1))).await.unwrap();

        assert!(store.delete_appointment(apt.id).await.unwrap());
        assert!(!store.delete_appointment(apt.id).await.unwrap());
        assert_eq!(store.get_appointment(apt.id).await.unwrap(), None);
    }
}
