//! Order persistence: the `OrderStore` contract, the SQLite-backed store and pool bootstrap.

pub mod memory;

pub use memory::MemoryOrderStore;

use crate::error::{AppError, ConfigError};
use crate::model::{Order, OrderDraft};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Capability set over persisted orders. Every method is a single statement.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a new order. Id and both timestamps are assigned here.
    async fn create(&self, draft: OrderDraft) -> Result<Order, AppError>;

    /// All orders in id order.
    async fn get_all(&self) -> Result<Vec<Order>, AppError>;

    /// `Ok(None)` when no row has this id.
    async fn get_by_id(&self, id: i64) -> Result<Option<Order>, AppError>;

    /// Overwrite product, count and status and refresh `updated_at`.
    /// Existence is not checked up front: an unknown id affects zero rows and yields `Ok(None)`.
    async fn update(&self, id: i64, draft: OrderDraft) -> Result<Option<Order>, AppError>;

    /// Remove the row if present. Deleting an unknown id is a no-op.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Liveness probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

const CREATE_ORDERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        product TEXT,
        count INTEGER,
        status TEXT,
        created_at DATETIME,
        updated_at DATETIME
    )
"#;

const SELECT_COLUMNS: &str = "id, product, count, status, created_at, updated_at";

/// Open a pool for `database_url`, creating the database file if missing.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| ConfigError::Connect(e.to_string()))?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Single-connection in-memory pool with the orders table in place.
/// The connection is never recycled so the database lives as long as the pool.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    ensure_orders_table(&pool).await?;
    Ok(pool)
}

/// Create the orders table if it does not exist.
pub async fn ensure_orders_table(pool: &SqlitePool) -> Result<(), AppError> {
    tracing::debug!(sql = %CREATE_ORDERS_TABLE, "ddl");
    sqlx::query(CREATE_ORDERS_TABLE).execute(pool).await?;
    Ok(())
}

#[derive(Clone)]
pub struct SqliteOrderStore {
    pool: SqlitePool,
}

impl SqliteOrderStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
    async fn create(&self, draft: OrderDraft) -> Result<Order, AppError> {
        let now = Utc::now();
        let sql = "INSERT INTO orders (product, count, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?)";
        tracing::debug!(sql = %sql, product = %draft.product, "query");
        let res = sqlx::query(sql)
            .bind(&draft.product)
            .bind(draft.count)
            .bind(&draft.status)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(draft.into_order(res.last_insert_rowid(), now, now))
    }

    async fn get_all(&self) -> Result<Vec<Order>, AppError> {
        let sql = format!("SELECT {} FROM orders ORDER BY id", SELECT_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Order>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        let sql = format!("SELECT {} FROM orders WHERE id = ?", SELECT_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, draft: OrderDraft) -> Result<Option<Order>, AppError> {
        let sql = format!(
            "UPDATE orders SET product = ?, count = ?, status = ?, updated_at = ? WHERE id = ? RETURNING {}",
            SELECT_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Order>(&sql)
            .bind(&draft.product)
            .bind(draft.count)
            .bind(&draft.status)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM orders WHERE id = ?";
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn store() -> SqliteOrderStore {
        SqliteOrderStore::new(connect_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids_and_equal_timestamps() {
        let store = store().await;
        let first = store.create(OrderDraft::new("Widget", 3, "pending")).await.unwrap();
        let second = store.create(OrderDraft::new("Gadget", 1, "pending")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn create_then_get_round_trips_every_field() {
        let store = store().await;
        let created = store.create(OrderDraft::new("Widget", 3, "pending")).await.unwrap();
        let fetched = store.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn get_by_id_missing_is_none() {
        let store = store().await;
        assert_eq!(store.get_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn get_all_returns_rows_in_insertion_order() {
        let store = store().await;
        assert!(store.get_all().await.unwrap().is_empty());
        store.create(OrderDraft::new("a", 1, "x")).await.unwrap();
        store.create(OrderDraft::new("b", 2, "y")).await.unwrap();
        let products: Vec<_> = store.get_all().await.unwrap().into_iter().map(|o| o.product).collect();
        assert_eq!(products, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_refreshes_updated_at() {
        let store = store().await;
        let created = store.create(OrderDraft::new("Widget", 3, "pending")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let updated = store
            .update(created.id, OrderDraft::new("Widget", 5, "shipped"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.count, 5);
        assert_eq!(updated.status, "shipped");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(store.get_by_id(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_of_missing_id_affects_nothing() {
        let store = store().await;
        assert_eq!(store.update(42, OrderDraft::new("x", 1, "y")).await.unwrap(), None);
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = store().await;
        let created = store.create(OrderDraft::new("Widget", 3, "pending")).await.unwrap();
        store.delete(created.id).await.unwrap();
        store.delete(created.id).await.unwrap();
        assert_eq!(store.get_by_id(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = store().await;
        let first = store.create(OrderDraft::new("a", 1, "x")).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(OrderDraft::new("b", 1, "x")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn closed_pool_surfaces_database_error() {
        let store = store().await;
        store.pool().close().await;
        let err = store.get_all().await.unwrap_err();
        assert!(matches!(err, AppError::Db(_)));
        assert!(store.ping().await.is_err());
    }

    #[tokio::test]
    async fn connect_creates_database_file() {
        let path = std::env::temp_dir().join(format!("order-service-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let url = format!("sqlite://{}", path.display());
        let pool = connect(&url, 2).await.unwrap();
        ensure_orders_table(&pool).await.unwrap();
        ensure_orders_table(&pool).await.unwrap();
        let store = SqliteOrderStore::new(pool.clone());
        let created = store.create(OrderDraft::new("Widget", 3, "pending")).await.unwrap();
        assert_eq!(store.get_by_id(created.id).await.unwrap(), Some(created));
        pool.close().await;
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
