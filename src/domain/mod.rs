//! Domain layer - core types of the credential broker.
//!
//! The broker has a deliberately small domain: the cached access credential
//! and the error taxonomy every mediated request is translated into.

mod credential;
mod errors;

pub use credential::{AccessCredential, EXPIRY_SAFETY_MARGIN_SECS};
pub use errors::{BrokerError, UpstreamBody};
