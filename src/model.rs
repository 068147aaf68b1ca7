//! Order entity and the client-writable draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted order. `id` and both timestamps are owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub product: String,
    pub count: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a client may set on create and update. Anything else in the body
/// (`id`, timestamps) is dropped during decoding; missing fields default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrderDraft {
    pub product: String,
    pub count: i64,
    pub status: String,
}

impl OrderDraft {
    pub fn new(product: impl Into<String>, count: i64, status: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            count,
            status: status.into(),
        }
    }

    pub(crate) fn into_order(self, id: i64, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Order {
        Order {
            id,
            product: self.product,
            count: self.count,
            status: self.status,
            created_at,
            updated_at,
        }
    }
}
