//! The order status state machine.
//!
//! One authoritative transition table per service type. A transition absent
//! from the table is rejected and the order is left byte-for-byte unchanged;
//! a successful transition updates the status and stamps exactly the matching
//! timestamp. Anything that should happen *because* of a transition
//! (notifications, kitchen tickets) belongs to the caller, after success.

use chrono::{DateTime, Utc};

use crate::errors::ServiceError;
use crate::models::order::{Order, OrderStatus, ServiceType};

use OrderStatus::*;

/// Statuses reachable from `from` for the given service type.
///
/// Pickup orders hand `Ready` straight to `Delivered`; delivery orders pass
/// through `EnRoute` first. `Cancelled` is reachable only while the kitchen
/// can still stop the order (`Pending` or `Preparing`).
pub fn allowed_targets(service: ServiceType, from: OrderStatus) -> &'static [OrderStatus] {
    match (service, from) {
        (_, Pending) => &[Preparing, Cancelled],
        (_, Preparing) => &[Ready, Cancelled],
        (ServiceType::Pickup, Ready) => &[Delivered],
        (ServiceType::Delivery, Ready) => &[EnRoute],
        (ServiceType::Delivery, EnRoute) => &[Delivered],
        // EnRoute does not exist in the pickup graph, and terminal statuses
        // have no outgoing edges.
        (ServiceType::Pickup, EnRoute) => &[],
        (_, Delivered) | (_, Cancelled) => &[],
    }
}

/// Whether the table permits `from -> to` under the given service type.
pub fn can_transition(service: ServiceType, from: OrderStatus, to: OrderStatus) -> bool {
    allowed_targets(service, from).contains(&to)
}

/// Moves an order to `to`, stamping the matching transition timestamp.
///
/// Rejects with [`ServiceError::IllegalTransition`] when the table has no such
/// edge for the order's service type — including self-transitions — without
/// mutating the order at all.
pub fn apply_transition(
    order: &mut Order,
    to: OrderStatus,
    now: DateTime<Utc>,
) -> Result<(), ServiceError> {
    let from = order.status;
    if !can_transition(order.service_type, from, to) {
        return Err(ServiceError::IllegalTransition { from, to });
    }

    order.status = to;
    match to {
        Preparing => order.timestamps.preparing_at = Some(now),
        Ready => order.timestamps.ready_at = Some(now),
        EnRoute => order.timestamps.en_route_at = Some(now),
        Delivered => order.timestamps.delivered_at = Some(now),
        Cancelled => order.timestamps.cancelled_at = Some(now),
        // Pending is the store-assigned initial status, never a target.
        Pending => unreachable!("Pending is not reachable through the transition table"),
    }
    Ok(())
}
