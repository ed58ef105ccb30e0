//! The order persistence boundary.
//!
//! Persistence is an external collaborator: the core defines the contract and
//! ships a dashmap-backed in-memory implementation for tests and embedding
//! callers. Whatever backs the trait must guarantee at-most-one-writer-per-
//! order semantics; the `version` field is the optimistic-concurrency handle
//! for that.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::order::{Order, OrderStatus, OrderTimestamps};
use crate::services::checkout::OrderRequest;

/// Contract for the external order store.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Accepts an order-creation request: assigns the identifier, the
    /// `Pending` initial status, the creation timestamp and version 1.
    async fn insert(&self, request: OrderRequest) -> Result<Order, ServiceError>;

    /// Fetches an order by id.
    async fn get(&self, id: Uuid) -> Result<Order, ServiceError>;

    /// Persists an updated order, guarded by its `version`: the update applies
    /// only when the stored version matches, otherwise
    /// [`ServiceError::Conflict`] is returned and nothing changes. The
    /// returned order carries the bumped version.
    async fn update(&self, order: &Order) -> Result<Order, ServiceError>;
}

/// In-memory [`OrderStore`] with the same concurrency contract as a real one.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: DashMap<Uuid, Order>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, request: OrderRequest) -> Result<Order, ServiceError> {
        let order = Order {
            id: Uuid::new_v4(),
            service_type: request.service_type,
            status: OrderStatus::Pending,
            subtotal: request.totals.subtotal,
            tax: request.totals.tax,
            total: request.totals.total,
            contact_phone: request.contact_phone,
            delivery_address: request.delivery_address,
            notes: request.notes,
            items: request.items,
            created_at: Utc::now(),
            timestamps: OrderTimestamps::default(),
            version: 1,
        };

        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get(&self, id: Uuid) -> Result<Order, ServiceError> {
        self.orders
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", id)))
    }

    async fn update(&self, order: &Order) -> Result<Order, ServiceError> {
        let mut entry = self
            .orders
            .get_mut(&order.id)
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order.id)))?;

        if entry.version != order.version {
            return Err(ServiceError::Conflict(format!(
                "Order {} was modified concurrently (expected version {}, found {})",
                order.id, order.version, entry.version
            )));
        }

        let mut updated = order.clone();
        updated.version += 1;
        *entry = updated.clone();
        Ok(updated)
    }
}
