//! Verident - Insurance Verification Backend
//!
//! This crate implements the proxy server behind the Verident dashboard: it
//! brokers access credentials for the eligibility API, mediates coverage
//! lookups, and forwards payment-intent requests to the payment processor so
//! that no secret ever reaches the browser.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
