//! Async glue between the pure order core and the external order store.
//!
//! Each operation is a single fetch-compute-persist round trip: the store's
//! optimistic version check guarantees at-most-one-writer-per-order, and a
//! `Conflict` surfaces to the caller — nothing is retried here. Events fire
//! only after the store accepted the update.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::order::{Order, OrderStatus};
use crate::services::cancellation::{self, RefundCommitment};
use crate::services::checkout::OrderRequest;
use crate::services::lifecycle;
use crate::store::OrderStore;

#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    events: Arc<EventSender>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>, events: Arc<EventSender>) -> Self {
        Self { store, events }
    }

    /// Submits an assembled order-creation request to the store.
    #[instrument(skip(self, request), fields(service_type = %request.service_type))]
    pub async fn create_order(&self, request: OrderRequest) -> Result<Order, ServiceError> {
        let order = self.store.insert(request).await?;

        self.events
            .send_or_log(Event::OrderCreated(order.id))
            .await;

        info!(
            "Order {} created: {} {}, total {}",
            order.id, order.service_type, order.status, order.total
        );
        Ok(order)
    }

    pub async fn get_order(&self, order_id: Uuid) -> Result<Order, ServiceError> {
        self.store.get(order_id).await
    }

    /// Moves an order to `new_status` through the transition table.
    #[instrument(skip(self), fields(order_id = %order_id, new_status = %new_status))]
    pub async fn update_status(
        &self,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<Order, ServiceError> {
        let mut order = self.store.get(order_id).await?;
        let old_status = order.status;

        lifecycle::apply_transition(&mut order, new_status, Utc::now()).map_err(|e| {
            error!("Rejected transition for order {}: {}", order_id, e);
            e
        })?;

        let updated = self.store.update(&order).await?;

        self.events
            .send_or_log(Event::OrderStatusChanged {
                order_id,
                old_status,
                new_status,
            })
            .await;

        info!(
            "Order {} status updated from {} to {}",
            order_id, old_status, new_status
        );
        Ok(updated)
    }

    /// Cancels an order under the refund policy, returning the updated order
    /// and the refund commitment to communicate to the customer.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn cancel_order(
        &self,
        order_id: Uuid,
    ) -> Result<(Order, RefundCommitment), ServiceError> {
        let mut order = self.store.get(order_id).await?;

        let refund = cancellation::cancel(&mut order, Utc::now()).map_err(|e| {
            error!("Rejected cancellation for order {}: {}", order_id, e);
            e
        })?;

        let updated = self.store.update(&order).await?;

        self.events
            .send_or_log(Event::OrderCancelled {
                order_id,
                refund_amount: refund.amount,
                refund_due_by: refund.due_by,
            })
            .await;

        info!(
            "Order {} cancelled, refund of {} due by {}",
            order_id, refund.amount, refund.due_by
        );
        Ok((updated, refund))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::ServiceType;
    use crate::services::pricing::Totals;
    use crate::store::InMemoryOrderStore;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;
    use tokio::sync::mpsc;

    fn service() -> (OrderService, mpsc::Receiver<Event>) {
        let (events, rx) = EventSender::channel(32);
        let service = OrderService::new(
            Arc::new(InMemoryOrderStore::new()),
            Arc::new(events),
        );
        (service, rx)
    }

    fn pickup_request() -> OrderRequest {
        OrderRequest {
            service_type: ServiceType::Pickup,
            contact_phone: "04121234567".to_string(),
            delivery_address: None,
            notes: None,
            totals: Totals {
                subtotal: dec!(25.00),
                tax: dec!(4.00),
                total: dec!(29.00),
            },
            items: vec![],
        }
    }

    #[tokio::test]
    async fn create_order_emits_created_event() {
        let (service, mut rx) = service();

        let order = service.create_order(pickup_request()).await.unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_matches!(rx.recv().await, Some(Event::OrderCreated(id)) if id == order.id);
    }

    #[tokio::test]
    async fn update_status_walks_the_pickup_graph() {
        let (service, mut rx) = service();
        let order = service.create_order(pickup_request()).await.unwrap();
        rx.recv().await; // drain the created event

        let order = service
            .update_status(order.id, OrderStatus::Preparing)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
        assert!(order.timestamps.preparing_at.is_some());

        assert_matches!(
            rx.recv().await,
            Some(Event::OrderStatusChanged {
                old_status: OrderStatus::Pending,
                new_status: OrderStatus::Preparing,
                ..
            })
        );
    }

    #[tokio::test]
    async fn illegal_transition_changes_nothing() {
        let (service, _rx) = service();
        let order = service.create_order(pickup_request()).await.unwrap();

        let result = service.update_status(order.id, OrderStatus::Delivered).await;

        assert_matches!(
            result,
            Err(ServiceError::IllegalTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered,
            })
        );
        let stored = service.get_order(order.id).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Pending);
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn cancel_order_returns_refund_commitment() {
        let (service, mut rx) = service();
        let order = service.create_order(pickup_request()).await.unwrap();
        rx.recv().await;

        let (cancelled, refund) = service.cancel_order(order.id).await.unwrap();

        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(refund.amount, dec!(29.00));
        assert_matches!(
            rx.recv().await,
            Some(Event::OrderCancelled { order_id, .. }) if order_id == order.id
        );
    }

    #[tokio::test]
    async fn cancel_after_ready_is_not_cancellable() {
        let (service, _rx) = service();
        let order = service.create_order(pickup_request()).await.unwrap();
        service
            .update_status(order.id, OrderStatus::Preparing)
            .await
            .unwrap();
        service
            .update_status(order.id, OrderStatus::Ready)
            .await
            .unwrap();

        let result = service.cancel_order(order.id).await;

        assert_matches!(
            result,
            Err(ServiceError::NotCancellable(OrderStatus::Ready))
        );
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let (service, _rx) = service();
        assert_matches!(
            service.update_status(Uuid::new_v4(), OrderStatus::Preparing).await,
            Err(ServiceError::NotFound(_))
        );
    }
}
