//! Router assembly.

pub mod common;
pub mod order;

pub use common::common_routes;
pub use order::order_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

pub const API_PREFIX: &str = "/api/v1";
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Full application: common routes at the root, order routes under `/api/v1`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(API_PREFIX, order_routes(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}
