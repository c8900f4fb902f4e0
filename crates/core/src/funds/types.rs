//! Strong types for the funds domain.
//!
//! - `Period` - a `YYYYMM` report period
//! - `CategoryGroup` - one of the three fixed fund categories, each backed
//!   by its own upstream dataset and storage table

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Error, Result, ValidationError};

use super::constants::{PENSION_CLASSIFICATIONS, POLICY_CLASSIFICATIONS};

// =============================================================================
// Period
// =============================================================================

/// A monthly report period in `YYYYMM` form.
///
/// Periods are zero-padded, so lexicographic order of the string form is
/// chronological order; the derived `Ord` on (year, month) agrees with it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: u16,
    month: u8,
}

impl Period {
    pub fn new(year: u16, month: u8) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::Validation(ValidationError::InvalidPeriod(format!(
                "month {} out of range",
                month
            ))));
        }
        Ok(Self { year, month })
    }

    /// Parses a `YYYYMM` string. Anything that is not six ASCII digits
    /// with a valid month is rejected.
    pub fn parse(value: &str) -> Result<Self> {
        if value.len() != 6 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Validation(ValidationError::InvalidPeriod(
                value.to_string(),
            )));
        }
        let year: u16 = value[..4]
            .parse()
            .map_err(|_| Error::Validation(ValidationError::InvalidPeriod(value.to_string())))?;
        let month: u8 = value[4..]
            .parse()
            .map_err(|_| Error::Validation(ValidationError::InvalidPeriod(value.to_string())))?;
        Self::new(year, month)
            .map_err(|_| Error::Validation(ValidationError::InvalidPeriod(value.to_string())))
    }

    /// Truncates a date to its period. The `YYYYMM` form needs a
    /// four-digit year, so dates outside years 0-9999 are rejected.
    pub fn from_date(date: NaiveDate) -> Result<Self> {
        let year = u16::try_from(date.year())
            .ok()
            .filter(|y| *y <= 9999)
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidPeriod(format!(
                    "year {} out of range",
                    date.year()
                )))
            })?;
        Ok(Self {
            year,
            month: date.month() as u8,
        })
    }

    /// Parses a `YYYY-MM-DD` date string and truncates it to its period.
    pub fn from_date_str(value: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| Error::Validation(ValidationError::InvalidPeriod(value.to_string())))?;
        Self::from_date(date)
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for Period {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Period::parse(&value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

// =============================================================================
// CategoryGroup
// =============================================================================

/// The three fixed fund categories.
///
/// Each group is a separate physical partition fed by a distinct upstream
/// dataset; a fund identifier belongs to exactly one group for the
/// lifetime of the dataset. The tagged variant replaces the original
/// implementation's dynamically built table-name strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryGroup {
    Gemel,
    Policies,
    Pension,
}

impl CategoryGroup {
    /// All groups, in locator search order.
    pub const ALL: [CategoryGroup; 3] = [
        CategoryGroup::Gemel,
        CategoryGroup::Policies,
        CategoryGroup::Pension,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryGroup::Gemel => "gemel",
            CategoryGroup::Policies => "policies",
            CategoryGroup::Pension => "pension",
        }
    }

    /// Maps an upstream classification label to the group whose dataset
    /// carries it. Unknown labels default to the general provident-fund
    /// group, matching the upstream feeds.
    pub fn from_classification(label: &str) -> CategoryGroup {
        if PENSION_CLASSIFICATIONS.contains(&label) {
            CategoryGroup::Pension
        } else if POLICY_CLASSIFICATIONS.contains(&label) {
            CategoryGroup::Policies
        } else {
            CategoryGroup::Gemel
        }
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
