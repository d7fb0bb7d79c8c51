//! Billing error types for lifecycle management.

use thiserror::Error;

use billora_shared::types::BillingId;

/// Errors that can occur during billing lifecycle operations.
#[derive(Debug, Error)]
pub enum BillingError {
    /// The referenced billing does not exist within the caller's account.
    #[error("Billing {0} not found")]
    NotFound(BillingId),

    /// A `Paid` transition was requested without a payment date.
    #[error("Payment date is required when marking a billing as paid")]
    PaymentDateRequired,

    /// The underlying store failed on the primary write.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BillingError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::PaymentDateRequired => 400,
            Self::NotFound(_) => 404,
            Self::Storage(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::PaymentDateRequired => "PAYMENT_DATE_REQUIRED",
            Self::NotFound(_) => "BILLING_NOT_FOUND",
            Self::Storage(_) => "DATABASE_ERROR",
        }
    }
}
