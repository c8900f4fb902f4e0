//! Shared helpers for lenient numeric parsing.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses an optional upstream numeric value into a `Decimal`.
///
/// The open-data feeds deliver numbers as strings and omit or garble them
/// freely, and user-entered allocation amounts may carry thousands
/// separators. Absent, empty, or non-numeric input yields `None`.
///
/// This is the single place where "missing number" is decided; each call
/// site chooses whether `None` means 0 (compounding factors, allocation
/// amounts) or unavailable (point-in-time metrics).
pub fn parse_optional_decimal<S: AsRef<str>>(value: Option<S>) -> Option<Decimal> {
    let raw = value?;
    let cleaned = raw.as_ref().trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}
