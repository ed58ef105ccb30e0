use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The possible statuses of an order.
///
/// `Delivered` and `Cancelled` are terminal; the legal moves between the
/// others depend on the order's [`ServiceType`] and live in
/// [`services::lifecycle`](crate::services::lifecycle).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    EnRoute,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Terminal statuses have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

/// How the customer receives the order.
///
/// Determines which delivery fields checkout requires and which transition
/// table applies (`EnRoute` exists only for delivery orders).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ServiceType {
    Pickup,
    Delivery,
}

/// One frozen product line on a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub note: Option<String>,
}

/// Per-transition timestamps, stamped by the state machine as the order moves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderTimestamps {
    pub preparing_at: Option<DateTime<Utc>>,
    pub ready_at: Option<DateTime<Utc>>,
    pub en_route_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// A placed order.
///
/// Created once when the store accepts an
/// [`OrderRequest`](crate::services::checkout::OrderRequest); the monetary
/// totals are frozen at that instant and never recomputed from a live cart.
/// Status changes go exclusively through
/// [`apply_transition`](crate::services::lifecycle::apply_transition). Orders
/// are never deleted — they only reach a terminal status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Identifier assigned by the order store.
    pub id: Uuid,

    pub service_type: ServiceType,
    pub status: OrderStatus,

    /// Totals frozen at checkout.
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,

    /// Always required.
    pub contact_phone: String,

    /// Present iff `service_type` is `Delivery`.
    pub delivery_address: Option<String>,

    pub notes: Option<String>,

    pub items: Vec<OrderItem>,

    pub created_at: DateTime<Utc>,
    pub timestamps: OrderTimestamps,

    /// Bumped by the store on every accepted update; the caller's handle for
    /// optimistic concurrency (at-most-one-writer-per-order).
    pub version: u64,
}
