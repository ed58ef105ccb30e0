//! Payment data validation.
//!
//! Stateless, field-local checks over a [`PaymentSelection`]. Every failed
//! field is reported in one pass so the checkout form can highlight them all
//! together. Whether a method is available for the chosen service type is the
//! assembler's concern, not this module's.

use validator::Validate;

use crate::errors::FieldErrors;
use crate::models::payment::PaymentSelection;

/// Validates the method-specific fields of a payment selection.
///
/// Rules per variant:
/// - `Card`: 16-digit number, non-empty holder name, `MM/YY` expiry, 3-4
///   digit CVV.
/// - `WalletAccount`: well-formed email, non-empty secret.
/// - `MobileWallet`: phone with at least 10 digits, 4-digit PIN.
/// - `BankHandle`: national id `V-`/`E-` + 7-8 digits, phone `0` + 10 digits,
///   non-empty transfer reference, payment timestamp present.
/// - `CashOnPickup`: nothing to check — always valid here.
pub fn validate_payment(selection: &PaymentSelection) -> Result<(), FieldErrors> {
    let outcome = match selection {
        PaymentSelection::Card(details) => details.validate(),
        PaymentSelection::WalletAccount(details) => details.validate(),
        PaymentSelection::MobileWallet(details) => details.validate(),
        PaymentSelection::BankHandle(details) => details.validate(),
        PaymentSelection::CashOnPickup => return Ok(()),
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(errors) => Err(FieldErrors::from(errors)),
    }
}
