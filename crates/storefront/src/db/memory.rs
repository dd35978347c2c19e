//! In-memory order store.
//!
//! Keeps orders in a vector behind a lock. Used by tests and for running
//! the site without a database; nothing survives a restart.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use plant_shop_core::{OrderId, PricedOrder, StoredOrder};

use super::{OrderStore, RepositoryError};

/// Order store holding everything in memory.
#[derive(Clone, Default)]
pub struct MemoryOrderStore {
    orders: Arc<RwLock<Vec<StoredOrder>>>,
}

impl MemoryOrderStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Whether no order has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn save(&self, order: &PricedOrder) -> Result<OrderId, RepositoryError> {
        let mut orders = self.orders.write().await;
        let next = i32::try_from(orders.len() + 1).map_err(|_| {
            RepositoryError::DataCorruption("in-memory order store is full".to_owned())
        })?;
        let id = OrderId::new(next);
        orders.push(StoredOrder {
            id,
            created_at: Utc::now(),
            order: order.clone(),
        });
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<StoredOrder>, RepositoryError> {
        Ok(self.orders.read().await.clone())
    }
}
