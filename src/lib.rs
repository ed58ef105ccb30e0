//! # mesa-orders
//!
//! Order lifecycle and checkout engine for a restaurant ordering platform.
//!
//! This crate is the business core behind a menu/cart/checkout frontend: it turns
//! a cart into a priced, payment-validated order request and governs how an
//! order's status may legally evolve from creation to a terminal outcome,
//! including the cancellation/refund policy. Everything around it — HTTP
//! transport, persistence, authentication, notification delivery — is an
//! external collaborator reached through the [`store::OrderStore`] trait and the
//! [`events::EventSender`] channel.
//!
//! ## Layout
//!
//! - [`models`] — carts, line items, payment selections, orders
//! - [`services::pricing`] — subtotal/tax/total arithmetic (fixed 16% rate)
//! - [`services::payment`] — per-method payment data validation
//! - [`services::checkout`] — cart + contact + payment → order-creation request
//! - [`services::lifecycle`] — the order status transition table
//! - [`services::cancellation`] — cancellability and the refund commitment
//! - [`services::orders`] — async glue over an [`store::OrderStore`]
//!
//! The pure modules never block, never retry, and never touch ambient state;
//! callers pass carts, orders and payment selections in explicitly.

pub mod errors;
pub mod events;
pub mod models;
pub mod services;
pub mod store;

/// Commonly used types, re-exported for embedding callers.
pub mod prelude {
    pub use crate::errors::{FieldErrors, ServiceError};
    pub use crate::events::{Event, EventSender};
    pub use crate::models::cart::{Cart, NewLineItem};
    pub use crate::models::line_item::LineItem;
    pub use crate::models::order::{Order, OrderStatus, ServiceType};
    pub use crate::models::payment::PaymentSelection;
    pub use crate::services::cancellation::RefundCommitment;
    pub use crate::services::checkout::{assemble, CheckoutInput, OrderRequest};
    pub use crate::services::orders::OrderService;
    pub use crate::services::pricing::Totals;
    pub use crate::store::{InMemoryOrderStore, OrderStore};
}
