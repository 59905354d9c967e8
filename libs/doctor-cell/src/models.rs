use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::{Doctor, NewDoctor};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl From<CreateDoctorRequest> for NewDoctor {
    fn from(request: CreateDoctorRequest) -> Self {
        NewDoctor {
            first_name: request.first_name,
            last_name: request.last_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorListResponse {
    pub doctors_list: Vec<Doctor>,
}

#[derive(Debug, Error)]
pub enum DoctorError {
    #[error("Database error: {0}")]
    Store(#[from] StoreError),
}
