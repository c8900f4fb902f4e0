//! Constants for the funds domain.

/// Maximum number of rows returned by a program search.
pub const SEARCH_RESULT_LIMIT: i64 = 15;

/// Decimal places for percentage values reported to callers.
pub const PERCENT_DP: u32 = 2;

/// Upstream classification labels backed by the pension dataset.
pub const PENSION_CLASSIFICATIONS: [&str; 2] = ["קרנות חדשות", "קרנות כלליות"];

/// Upstream classification labels backed by the insurance-policy dataset.
pub const POLICY_CLASSIFICATIONS: [&str; 3] = [
    "פוליסות שהונפקו החל משנת 2004",
    "פוליסות שהונפקו בשנים 1990-1991",
    "פוליסות שהונפקו בשנים 1992-2003",
];
