//! Shared wire types for Mealcart.
//!
//! The [`objects`] module mirrors the JSON exchanged with the remote catalog
//! and the options handed to the payment provider. The typed HTTP client in
//! [`client`] is gated behind the `client` feature.

pub mod objects;

#[cfg(feature = "client")]
pub mod client;
