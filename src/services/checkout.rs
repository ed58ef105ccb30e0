//! The checkout assembler.
//!
//! Combines a cart, the chosen service type, contact/delivery data and a
//! payment selection into an immutable order-creation request. The cart is
//! read, never mutated — clearing it after the store confirms creation is the
//! caller's responsibility.

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::models::cart::Cart;
use crate::models::order::{OrderItem, ServiceType};
use crate::models::payment::PaymentSelection;
use crate::services::payment::validate_payment;
use crate::services::pricing::Totals;

/// Everything the customer supplies at checkout, besides the cart itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutInput {
    pub service_type: ServiceType,
    pub contact_phone: String,
    /// Required for delivery; ignored for pickup.
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub payment: PaymentSelection,
}

/// An immutable order-creation request, handed to the order store.
///
/// Totals and line items are snapshotted from the cart at assembly time and
/// never recomputed afterwards. The payment selection is deliberately absent:
/// it is consumed by the external payment step and discarded by this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub service_type: ServiceType,
    pub contact_phone: String,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub totals: Totals,
    pub items: Vec<OrderItem>,
}

/// Validates checkout inputs and assembles the order-creation request.
///
/// Failure order:
/// 1. empty cart → [`ServiceError::EmptyCart`]
/// 2. blank contact phone → [`ServiceError::MissingContact`]
/// 3. delivery without an address → [`ServiceError::MissingAddress`]
/// 4. cash-on-pickup on a delivery order →
///    [`ServiceError::PaymentNotAvailableForService`]
/// 5. invalid payment fields → [`ServiceError::InvalidPaymentData`]
pub fn assemble(cart: &Cart, input: CheckoutInput) -> Result<OrderRequest, ServiceError> {
    if cart.is_empty() {
        return Err(ServiceError::EmptyCart);
    }

    if input.contact_phone.trim().is_empty() {
        return Err(ServiceError::MissingContact);
    }

    let delivery_address = match input.service_type {
        ServiceType::Delivery => match input.delivery_address.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => Some(address.to_string()),
            _ => return Err(ServiceError::MissingAddress),
        },
        // Pickup orders carry no address even when the form sent one.
        ServiceType::Pickup => None,
    };

    if input.payment.is_cash_on_pickup() && input.service_type == ServiceType::Delivery {
        return Err(ServiceError::PaymentNotAvailableForService);
    }

    validate_payment(&input.payment).map_err(ServiceError::InvalidPaymentData)?;

    Ok(OrderRequest {
        service_type: input.service_type,
        contact_phone: input.contact_phone,
        delivery_address,
        notes: input.notes,
        totals: *cart.totals(),
        items: cart
            .items()
            .iter()
            .map(|item| OrderItem {
                product_id: item.product_id,
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                note: item.note.clone(),
            })
            .collect(),
    })
}
