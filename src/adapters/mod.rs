//! Adapters - Implementations of the ports against real infrastructure.
//!
//! - `store` - in-process credential cache
//! - `eligibility` - reqwest clients for the eligibility API (token + coverage)
//! - `stripe` - payment processor adapter and its test double
//! - `http` - axum REST surface exposed to the dashboard

pub mod eligibility;
pub mod http;
pub mod store;
pub mod stripe;
