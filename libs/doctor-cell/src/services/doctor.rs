use std::sync::Arc;

use tracing::debug;

use shared_database::{AppState, ClinicStore};
use shared_models::Doctor;

use crate::models::{CreateDoctorRequest, DoctorError};

/// Doctor directory backed by the shared clinic store.
pub struct DoctorService {
    store: Arc<dyn ClinicStore>,
}

impl DoctorService {
    pub fn new(state: &AppState) -> Self {
        Self::with_store(state.store.clone())
    }

    pub fn with_store(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    /// Every doctor, in storage order.
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        let doctors = self.store.list_doctors().await?;
        debug!("Listed {} doctors", doctors.len());
        Ok(doctors)
    }

    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        let doctor = self.store.insert_doctor(request.into()).await?;
        debug!("Doctor '{}' created with ID: {}", doctor.full_name(), doctor.id);
        Ok(doctor)
    }
}
