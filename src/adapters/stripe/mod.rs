//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port against the Stripe PaymentIntents
//! API. The adapter is independent of the credential broker: it authenticates
//! every call with the static secret key and holds no per-request state.
//!
//! # Security
//!
//! - The secret key is handled via `secrecy::SecretString`
//! - Patient identifiers travel only as opaque intent metadata
//!
//! # Configuration
//!
//! Supplied through `VERIDENT__PAYMENT__STRIPE_SECRET_KEY`; when absent the
//! payment endpoints are disabled rather than the server refusing to start.

mod mock_payment_provider;
mod payment_intents;

pub use mock_payment_provider::MockPaymentProvider;
pub use payment_intents::{StripeConfig, StripePaymentAdapter};
