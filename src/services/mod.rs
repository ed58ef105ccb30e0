pub mod cancellation;
pub mod checkout;
pub mod lifecycle;
pub mod orders;
pub mod payment;
pub mod pricing;
