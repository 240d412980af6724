//! Internal helpers shared by the model types.
//!
//! These utilities are **not** part of the public API.

use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default, so `"flex_entries": null` reads as empty.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// `true` when both timestamps fall on the same calendar day, each read in its own offset.
pub(crate) fn same_day(a: &DateTime<FixedOffset>, b: &DateTime<FixedOffset>) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Case-insensitive name equality.
pub(crate) fn names_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
