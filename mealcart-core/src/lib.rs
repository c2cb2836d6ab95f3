#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod events;
pub mod observable;
pub mod payment;
pub mod price;
