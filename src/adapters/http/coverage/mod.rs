//! Coverage endpoints - proxied eligibility lookups.

mod dto;
mod handlers;
mod routes;

pub use dto::{CoverageByPayerRequest, CoveragePayload};
pub use handlers::{get_coverage, lookup_coverages_by_payer, BearerToken};
pub use routes::routes;
