use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref CARD_NUMBER_RE: Regex = Regex::new(r"^\d{16}$").unwrap();
    static ref CARD_EXPIRY_RE: Regex = Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").unwrap();
    static ref CARD_CVV_RE: Regex = Regex::new(r"^\d{3,4}$").unwrap();
    static ref WALLET_PHONE_RE: Regex = Regex::new(r"^\d{10,}$").unwrap();
    static ref WALLET_PIN_RE: Regex = Regex::new(r"^\d{4}$").unwrap();
    static ref NATIONAL_ID_RE: Regex = Regex::new(r"^[VE]-\d{7,8}$").unwrap();
    static ref LOCAL_PHONE_RE: Regex = Regex::new(r"^0\d{10}$").unwrap();
}

/// Credit/debit card data entered at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CardDetails {
    #[validate(regex(path = "CARD_NUMBER_RE", message = "card number must be exactly 16 digits"))]
    pub number: String,

    #[validate(length(min = 1, message = "card holder name is required"))]
    pub holder_name: String,

    #[validate(regex(path = "CARD_EXPIRY_RE", message = "expiry must match MM/YY"))]
    pub expiry: String,

    #[validate(regex(path = "CARD_CVV_RE", message = "CVV must be 3 or 4 digits"))]
    pub cvv: String,
}

/// PayPal-style wallet account credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WalletAccountDetails {
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "account secret is required"))]
    pub secret: String,
}

/// Mobile wallet identified by phone number and PIN.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MobileWalletDetails {
    #[validate(regex(path = "WALLET_PHONE_RE", message = "phone must have at least 10 digits"))]
    pub phone: String,

    #[validate(regex(path = "WALLET_PIN_RE", message = "PIN must be exactly 4 digits"))]
    pub pin: String,
}

/// Mobile-pay bank transfer reference (pago móvil style).
///
/// The customer reports a transfer already made from their bank, so the bundle
/// carries the transfer's reference number and timestamp rather than
/// credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BankHandleDetails {
    #[validate(regex(
        path = "NATIONAL_ID_RE",
        message = "national id must match V-/E- followed by 7 or 8 digits"
    ))]
    pub national_id: String,

    #[validate(regex(path = "LOCAL_PHONE_RE", message = "phone must be 0 followed by 10 digits"))]
    pub phone: String,

    /// Issuing bank code, captured as provided.
    pub bank_code: String,

    #[validate(length(min = 1, message = "transfer reference number is required"))]
    pub reference: String,

    #[validate(required(message = "payment date and time are required"))]
    pub paid_at: Option<DateTime<Utc>>,
}

/// The tagged choice of payment method plus its method-specific data.
///
/// Exactly one variant is active per checkout. Created transiently, validated
/// by [`validate_payment`](crate::services::payment::validate_payment),
/// consumed by the external payment step — never persisted by this core.
#[derive(Debug, Clone, Serialize, Deserialize, strum::Display)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentSelection {
    Card(CardDetails),
    WalletAccount(WalletAccountDetails),
    MobileWallet(MobileWalletDetails),
    BankHandle(BankHandleDetails),
    /// Pay in cash when collecting the order. No user-entered fields; only
    /// available for pickup orders — the checkout assembler enforces that.
    CashOnPickup,
}

impl PaymentSelection {
    pub fn is_cash_on_pickup(&self) -> bool {
        matches!(self, Self::CashOnPickup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_serializes_with_method_tag() {
        let selection = PaymentSelection::MobileWallet(MobileWalletDetails {
            phone: "04141234567".to_string(),
            pin: "1234".to_string(),
        });

        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["method"], "mobile_wallet");
        assert_eq!(json["phone"], "04141234567");
    }

    #[test]
    fn cash_on_pickup_round_trips() {
        let json = r#"{"method":"cash_on_pickup"}"#;
        let selection: PaymentSelection = serde_json::from_str(json).unwrap();
        assert!(selection.is_cash_on_pickup());
    }

    #[test]
    fn selection_displays_method_name() {
        assert_eq!(PaymentSelection::CashOnPickup.to_string(), "CashOnPickup");
    }
}
