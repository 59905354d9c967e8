use std::sync::Arc;

use tracing::debug;

use shared_database::{AppState, ClinicStore};
use shared_models::Patient;

use crate::models::{CreatePatientRequest, PatientError};

pub struct PatientService {
    store: Arc<dyn ClinicStore>,
}

impl PatientService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        let patient = self.store.insert_patient(request.into()).await?;
        debug!("Patient created successfully with ID: {}", patient.id);
        Ok(patient)
    }

    pub async fn get_patient(&self, patient_id: i64) -> Result<Patient, PatientError> {
        debug!("Fetching patient: {}", patient_id);

        self.store
            .get_patient(patient_id)
            .await?
            .ok_or(PatientError::NotFound(patient_id))
    }
}
