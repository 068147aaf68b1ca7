//! Order service: REST CRUD over orders backed by SQLite.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod state;
pub mod store;

pub use config::ServiceConfig;
pub use error::{AppError, ConfigError};
pub use model::{Order, OrderDraft};
pub use routes::{app, common_routes, order_routes};
pub use state::AppState;
pub use store::{connect, connect_in_memory, ensure_orders_table, MemoryOrderStore, OrderStore, SqliteOrderStore};
