use serde::{Deserialize, Serialize};
use shared_database::StoreError;
use shared_models::NewPatient;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl From<CreatePatientRequest> for NewPatient {
    fn from(request: CreatePatientRequest) -> Self {
        NewPatient {
            first_name: request.first_name,
            last_name: request.last_name,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("Patient {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Store(#[from] StoreError),
}
