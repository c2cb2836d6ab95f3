pub mod catalog;
pub mod payment;

pub use catalog::{LookupQuery, MealRecord, MealsResponse, SearchQuery};
pub use payment::{PaymentPrefill, PaymentRequest, PaymentTheme};

use serde::{Deserialize, Deserializer};

/// Deserialize a JSON `null` as `T::default()`.
///
/// The catalog answers "no results" with `{"meals": null}` and sometimes
/// leaves optional string fields as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
