//! Application layer - the broker façade wired from ports.

mod broker;

pub use broker::VerificationBroker;
