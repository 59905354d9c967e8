use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use calendar_cell::router::calendar_routes;
use doctor_cell::router::doctor_routes;
use patient_cell::router::create_patient_router;
use shared_database::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic Calendar API is running!" }))
        .nest("/doctor", doctor_routes(state.clone()))
        .nest("/patient", create_patient_router(state.clone()))
        .nest("/calendar", calendar_routes(state))
}
