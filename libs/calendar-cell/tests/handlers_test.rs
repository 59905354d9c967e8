use std::sync::Arc;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use calendar_cell::router::calendar_routes;
use calendar_cell::{CalendarError, CalendarService};
use shared_config::AppConfig;
use shared_database::{AppState, MockClinicStore, StoreError};
use shared_models::{Doctor, NewAppointment, NewPatient};
use shared_utils::test_utils::{datetime, json_request};

fn doctor(id: i64) -> Doctor {
    Doctor {
        id,
        first_name: Some("Bob".to_string()),
        last_name: Some("Dylan".to_string()),
    }
}

#[tokio::test]
async fn test_misaligned_slot_never_touches_store() {
    // No expectations: any store call panics the mock.
    let store = MockClinicStore::new();
    let service = CalendarService::with_store(Arc::new(store));

    let result = service
        .add_new_appointment(1, 2, datetime(2022, 10, 1, 9, 19), "New Patient".to_string())
        .await;

    assert_matches!(result, Err(CalendarError::InvalidSlot { minute: 19 }));
}

#[tokio::test]
async fn test_get_appointments_queries_midnight() {
    let mut store = MockClinicStore::new();
    store
        .expect_get_doctor()
        .withf(|id| *id == 2)
        .times(1)
        .returning(|id| Ok(Some(doctor(id))));
    store
        .expect_find_appointments()
        .withf(|doctor_id, at| *doctor_id == 2 && *at == datetime(2022, 10, 1, 0, 0))
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let result = CalendarService::with_store(Arc::new(store))
        .get_appointments(2, datetime(2022, 10, 1, 13, 37))
        .await
        .unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_add_new_appointment_passes_fields_to_store() {
    let slot = datetime(2022, 10, 1, 9, 45);
    let mut store = MockClinicStore::new();
    store.expect_get_doctor().returning(|id| Ok(Some(doctor(id))));
    store.expect_count_appointments().times(1).returning(|_, _| Ok(2));
    store
        .expect_get_patient()
        .times(1)
        .returning(|id| Ok(Some(NewPatient::new("John", "Brown").with_id(id))));
    store
        .expect_insert_appointment_within_capacity()
        .withf(move |apt, capacity| {
            *apt == NewAppointment::new(Some(1), Some(2))
                .at(slot)
                .with_type("Follow Up")
                && *capacity == 3
        })
        .times(1)
        .returning(|apt, _| Ok(Some(apt.with_id(17))));

    let id = CalendarService::with_store(Arc::new(store))
        .add_new_appointment(1, 2, slot, "Follow Up".to_string())
        .await
        .unwrap();

    assert_eq!(id, 17);
}

#[tokio::test]
async fn test_lost_race_at_insert_is_slot_full() {
    let slot = datetime(2022, 10, 1, 9, 0);
    let mut store = MockClinicStore::new();
    store.expect_get_doctor().returning(|id| Ok(Some(doctor(id))));
    store.expect_count_appointments().returning(|_, _| Ok(2));
    store
        .expect_get_patient()
        .returning(|id| Ok(Some(NewPatient::default().with_id(id))));
    store
        .expect_insert_appointment_within_capacity()
        .returning(|_, _| Ok(None));

    let result = CalendarService::with_store(Arc::new(store))
        .add_new_appointment(1, 2, slot, "Follow Up".to_string())
        .await;

    assert_matches!(result, Err(CalendarError::SlotFull { doctor_id: 1, .. }));
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let mut store = MockClinicStore::new();
    store
        .expect_delete_appointment()
        .returning(|_| Err(StoreError::Backend("connection reset".to_string())));

    let state = Arc::new(AppState::new(AppConfig::in_memory(), Arc::new(store)));
    let app = calendar_routes(state);

    let response = app
        .oneshot(json_request("DELETE", "/appointments/delete", json!({"appointment_id": 2})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
