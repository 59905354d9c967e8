// libs/calendar-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};

use shared_database::AppState;

use crate::handlers;

pub fn calendar_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/appointments", get(handlers::get_appointments))
        .route("/appointments/delete", delete(handlers::delete_appointment))
        .route("/appointments/add", post(handlers::add_new_appointment))
        .with_state(state)
}
