//! Eligibility API adapters.
//!
//! Two reqwest-backed clients share one response-interpretation helper so the
//! success and error paths read upstream bodies identically:
//! - `HttpCredentialIssuer` performs the client-credentials grant
//! - `HttpCoverageClient` performs the authenticated coverage lookups

mod coverage_client;
mod response;
mod token_client;

pub use coverage_client::HttpCoverageClient;
pub use response::interpret_body;
pub use token_client::HttpCredentialIssuer;
