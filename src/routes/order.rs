//! Order CRUD routes.

use crate::handlers::order::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn order_routes(state: AppState) -> Router {
    Router::new()
        .route("/orders", get(list).post(create))
        .route("/orders/:id", get(read).put(update).delete(delete_handler))
        .with_state(state)
}
