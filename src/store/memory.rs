//! In-process order store. Same contract as the SQLite store; used to exercise handlers without a database.

use super::OrderStore;
use crate::error::AppError;
use crate::model::{Order, OrderDraft};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Order>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryOrderStore {
    inner: Mutex<Inner>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create(&self, draft: OrderDraft) -> Result<Order, AppError> {
        let now = Utc::now();
        let mut inner = self.lock();
        inner.last_id += 1;
        let order = draft.into_order(inner.last_id, now, now);
        inner.rows.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get_all(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.lock().rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        Ok(self.lock().rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, draft: OrderDraft) -> Result<Option<Order>, AppError> {
        let mut inner = self.lock();
        let Some(row) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.product = draft.product;
        row.count = draft.count;
        row.status = draft.status;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.lock().rows.remove(&id);
        Ok(())
    }
}
