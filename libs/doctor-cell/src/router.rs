use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_database::AppState;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/all", get(handlers::list_doctors))
        .route("/", post(handlers::create_doctor))
        .with_state(state)
}
