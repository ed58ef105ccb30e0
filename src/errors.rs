use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::order::OrderStatus;

/// Field-level validation failures, keyed by field name.
///
/// Collected all at once — never fail-fast — so a form can highlight every
/// invalid field in a single pass. A `BTreeMap` keeps the output ordering
/// stable for display and assertions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure for `field`. The first message per field wins.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consumes the collected errors, yielding `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, failures) in errors.field_errors() {
            for failure in failures {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for {}", field));
                out.push(field, message);
            }
        }
        out
    }
}

/// Unified error type for the order/checkout core.
///
/// Three families, per the platform's error contract:
/// - precondition failures (`EmptyCart`, `MissingContact`, `MissingAddress`,
///   `PaymentNotAvailableForService`) — the checkout request is structurally
///   unusable;
/// - validation failures (`InvalidPaymentData`, `QuantityOutOfRange`) — the
///   caller re-prompts the user with the offending fields;
/// - state failures (`IllegalTransition`, `NotCancellable`) — the requested
///   lifecycle change is not available for the order's current status.
///
/// Everything is a returned value; the core never panics on bad input.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Contact phone is required")]
    MissingContact,

    #[error("Delivery address is required for delivery orders")]
    MissingAddress,

    #[error("Cash on pickup is not available for delivery orders")]
    PaymentNotAvailableForService,

    #[error("Invalid payment data: {0}")]
    InvalidPaymentData(FieldErrors),

    #[error("Quantity {0} is out of range (1-99)")]
    QuantityOutOfRange(u32),

    #[error("Illegal transition from {from} to {to}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order in status {0} cannot be cancelled")]
    NotCancellable(OrderStatus),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Concurrent modification: {0}")]
    Conflict(String),
}

impl ServiceError {
    /// True for failures that make the checkout request structurally unusable.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::EmptyCart
                | Self::MissingContact
                | Self::MissingAddress
                | Self::PaymentNotAvailableForService
        )
    }

    /// True for field-level failures the user can correct and resubmit.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidPaymentData(_) | Self::QuantityOutOfRange(_))
    }

    /// True for lifecycle failures: the order exists but the requested status
    /// change is not available.
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            Self::IllegalTransition { .. } | Self::NotCancellable(_)
        )
    }

    /// Field errors carried by this failure, when it has any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::InvalidPaymentData(fields) => Some(fields),
            _ => None,
        }
    }
}
