//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! broker and the outside world. Adapters implement these ports.
//!
//! - `CredentialStore` - single-slot cache for the access credential
//! - `CredentialIssuer` - client-credentials exchange against the token endpoint
//! - `CoverageClient` - authenticated coverage lookups against the eligibility API
//! - `PaymentProvider` - payment-intent creation and status retrieval

mod coverage_client;
mod credential_issuer;
mod credential_store;
mod payment_provider;

pub use coverage_client::CoverageClient;
pub use credential_issuer::CredentialIssuer;
pub use credential_store::CredentialStore;
pub use payment_provider::{
    CreatePaymentIntentRequest, PaymentError, PaymentErrorCode, PaymentIntent,
    PaymentIntentStatus, PaymentProvider, MINIMUM_AMOUNT_MINOR_UNITS,
};
