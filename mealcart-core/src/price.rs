//! Deterministic pricing.
//!
//! The catalog has no pricing field, so prices are synthesized from the
//! item identifier. The same identifier always yields the same price across
//! repeated fetches.

/// Lowest USD price an item can have.
pub const BASE_USD_PRICE: u32 = 5;

/// Number of distinct USD price points above the base.
pub const USD_PRICE_SPREAD: u32 = 16;

/// Fixed USD → local currency multiplier.
pub const LOCAL_CURRENCY_MULTIPLIER: u32 = 85;

/// Minor units per local currency unit (e.g. paise per rupee).
pub const MINOR_UNITS_PER_UNIT: u64 = 100;

/// Derive the USD price of an item from its identifier.
///
/// All decimal digits in `id` are read as one non-negative integer `n`
/// (`0` when there are none) and the price is `5 + (n mod 16)`. The
/// remainder is folded digit by digit so identifiers of any length are
/// handled without overflow.
pub fn derive_usd_price(id: &str) -> u32 {
    let remainder = id
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u32, |acc, digit| (acc * 10 + digit) % USD_PRICE_SPREAD);
    BASE_USD_PRICE + remainder
}

/// Derive the local-currency price of an item from its identifier.
pub fn derive_local_price(id: &str) -> u32 {
    derive_usd_price(id) * LOCAL_CURRENCY_MULTIPLIER
}

/// Convert a local-currency amount to the payment provider's minor unit.
pub fn to_minor_units(amount: u32) -> u64 {
    u64::from(amount) * MINOR_UNITS_PER_UNIT
}
