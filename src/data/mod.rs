//! Upstream data access.

pub mod eurostat;

pub use eurostat::EurostatClient;
