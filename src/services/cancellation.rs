//! Cancellation and refund policy.
//!
//! An order can be cancelled only while the kitchen can still stop it. A
//! successful cancellation yields a refund commitment: the full frozen total,
//! owed back to the original payment method within a fixed window. The
//! commitment is data handed to the caller — the money movement itself is an
//! external concern.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::order::{Order, OrderStatus};
use crate::services::lifecycle;

/// Maximum time promised for returning funds after a cancellation.
pub const REFUND_WINDOW_MINUTES: i64 = 30;

/// The promise attached to a successful cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundCommitment {
    pub order_id: Uuid,
    /// Full order total, frozen at checkout.
    pub amount: Decimal,
    /// Latest moment by which the refund is promised.
    pub due_by: DateTime<Utc>,
}

/// True iff the order's current status still allows cancellation.
pub fn is_cancellable(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Pending | OrderStatus::Preparing)
}

/// Cancels the order and computes its refund commitment.
///
/// Orders that are `Ready`, `EnRoute`, `Delivered`, or already `Cancelled`
/// fail with [`ServiceError::NotCancellable`] and are left unchanged.
pub fn cancel(order: &mut Order, now: DateTime<Utc>) -> Result<RefundCommitment, ServiceError> {
    if !is_cancellable(order.status) {
        return Err(ServiceError::NotCancellable(order.status));
    }

    lifecycle::apply_transition(order, OrderStatus::Cancelled, now)?;

    Ok(RefundCommitment {
        order_id: order.id,
        amount: order.total,
        due_by: now + Duration::minutes(REFUND_WINDOW_MINUTES),
    })
}
