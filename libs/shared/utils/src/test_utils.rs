use std::sync::Arc;

use axum::{
    body::Body,
    http::Request,
    response::Response,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use shared_database::{AppState, ClinicStore, InMemoryStore};
use shared_models::{Doctor, NewDoctor, NewPatient, Patient};

/// In-memory clinic with direct handles to both the state and the store.
pub struct TestClinic {
    pub store: Arc<InMemoryStore>,
    pub state: Arc<AppState>,
}

impl Default for TestClinic {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClinic {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let state = Arc::new(AppState::new(
            shared_config::AppConfig::in_memory(),
            store.clone(),
        ));
        Self { store, state }
    }

    pub async fn doctor(&self, first_name: &str, last_name: &str) -> Doctor {
        self.store
            .insert_doctor(NewDoctor::new(first_name, last_name))
            .await
            .expect("in-memory insert cannot fail")
    }

    pub async fn patient(&self, first_name: &str, last_name: &str) -> Patient {
        self.store
            .insert_patient(NewPatient::new(first_name, last_name))
            .await
            .expect("in-memory insert cannot fail")
    }
}

pub fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid test datetime")
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid test request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid test request")
}

pub async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable response body")
        .to_vec()
}

pub async fn read_json(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("JSON response body")
}
