//! Asset-weighted portfolio aggregation.
//!
//! Pure function of its inputs; no storage access.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::constants::PERCENT_DP;
use super::model::{PortfolioLine, PortfolioSummary};

/// Weighted mean of a per-line metric, `Σ(allocation·value) / Σ(allocation)`,
/// over the lines where `metric` is defined. Lines with an undefined
/// metric are excluded from numerator and denominator alike.
fn weighted_percentage<F>(lines: &[PortfolioLine], metric: F) -> Option<Decimal>
where
    F: Fn(&PortfolioLine) -> Option<Decimal>,
{
    let mut numerator = Decimal::ZERO;
    let mut denominator = Decimal::ZERO;

    for line in lines {
        if let Some(value) = metric(line) {
            let allocation = line.allocation.unwrap_or(Decimal::ZERO);
            numerator += allocation * value;
            denominator += allocation;
        }
    }

    if denominator.is_zero() {
        None
    } else {
        Some((numerator / denominator).round_dp(PERCENT_DP))
    }
}

/// A fund's exposure as a percentage of its total assets.
///
/// When total assets are zero or unknown the ratio is undefined, and the
/// line is excluded from the weighted computation for that field rather
/// than diluting it with 0%.
fn exposure_percentage(raw: Option<Decimal>, total_assets: Option<Decimal>) -> Option<Decimal> {
    match (raw, total_assets) {
        (Some(value), Some(assets)) if !assets.is_zero() => Some(value / assets * dec!(100)),
        _ => None,
    }
}

/// Computes asset-weighted portfolio totals over the given lines.
///
/// Unset allocations count as zero toward the total. Yield fields are
/// weighted directly; exposure fields are normalized by each fund's total
/// assets per line before weighting. With a zero total allocation every
/// weighted field is unavailable, not 0%.
pub fn aggregate(lines: &[PortfolioLine]) -> PortfolioSummary {
    let total_allocation: Decimal = lines
        .iter()
        .map(|line| line.allocation.unwrap_or(Decimal::ZERO))
        .sum();
    let total_allocation = total_allocation.round_dp(PERCENT_DP);

    if total_allocation.is_zero() {
        return PortfolioSummary {
            total_allocation,
            twr: None,
            year_to_date_yield: None,
            trailing_3yr_yield: None,
            trailing_5yr_yield: None,
            equity_exposure: None,
            foreign_currency_exposure: None,
            foreign_exposure: None,
        };
    }

    PortfolioSummary {
        total_allocation,
        twr: weighted_percentage(lines, |l| l.snapshot.twr),
        year_to_date_yield: weighted_percentage(lines, |l| l.snapshot.year_to_date_yield),
        trailing_3yr_yield: weighted_percentage(lines, |l| l.snapshot.trailing_3yr_yield),
        trailing_5yr_yield: weighted_percentage(lines, |l| l.snapshot.trailing_5yr_yield),
        equity_exposure: weighted_percentage(lines, |l| {
            exposure_percentage(l.snapshot.equity_exposure, l.snapshot.total_assets)
        }),
        foreign_currency_exposure: weighted_percentage(lines, |l| {
            exposure_percentage(l.snapshot.foreign_currency_exposure, l.snapshot.total_assets)
        }),
        foreign_exposure: weighted_percentage(lines, |l| {
            exposure_percentage(l.snapshot.foreign_exposure, l.snapshot.total_assets)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funds::model::FundSnapshot;
    use crate::funds::types::Period;

    fn snapshot(fund_id: &str) -> FundSnapshot {
        FundSnapshot {
            fund_id: fund_id.to_string(),
            display_name: None,
            classification: None,
            twr: None,
            year_to_date_yield: None,
            trailing_3yr_yield: None,
            trailing_5yr_yield: None,
            equity_exposure: None,
            foreign_currency_exposure: None,
            foreign_exposure: None,
            total_assets: None,
            earliest_period: None,
            report_period: Period::parse("202303").unwrap(),
        }
    }

    fn line(fund_id: &str, allocation: Option<Decimal>) -> PortfolioLine {
        PortfolioLine {
            snapshot: snapshot(fund_id),
            allocation,
        }
    }

    #[test]
    fn equal_allocations_average_the_twr() {
        let mut a = line("1", Some(dec!(1000)));
        a.snapshot.twr = Some(dec!(5.00));
        let mut b = line("2", Some(dec!(1000)));
        b.snapshot.twr = Some(dec!(15.00));

        let summary = aggregate(&[a, b]);
        assert_eq!(summary.total_allocation, dec!(2000));
        assert_eq!(summary.twr, Some(dec!(10.00)));
    }

    #[test]
    fn zero_total_allocation_makes_everything_unavailable() {
        let mut a = line("1", None);
        a.snapshot.twr = Some(dec!(5.00));
        a.snapshot.year_to_date_yield = Some(dec!(3.00));
        a.snapshot.equity_exposure = Some(dec!(50));
        a.snapshot.total_assets = Some(dec!(100));

        let summary = aggregate(&[a]);
        assert_eq!(summary.total_allocation, Decimal::ZERO);
        assert_eq!(summary.twr, None);
        assert_eq!(summary.year_to_date_yield, None);
        assert_eq!(summary.equity_exposure, None);
    }

    #[test]
    fn unset_allocation_counts_as_zero() {
        let mut a = line("1", Some(dec!(500)));
        a.snapshot.twr = Some(dec!(4.00));
        let mut b = line("2", None);
        b.snapshot.twr = Some(dec!(100.00));

        let summary = aggregate(&[a, b]);
        assert_eq!(summary.total_allocation, dec!(500));
        // The unfunded line carries no weight.
        assert_eq!(summary.twr, Some(dec!(4.00)));
    }

    #[test]
    fn exposures_are_normalized_by_assets_per_line() {
        // 40% equity exposure on one fund, 80% on the other, equal money.
        let mut a = line("1", Some(dec!(100)));
        a.snapshot.equity_exposure = Some(dec!(200));
        a.snapshot.total_assets = Some(dec!(500));
        let mut b = line("2", Some(dec!(100)));
        b.snapshot.equity_exposure = Some(dec!(400));
        b.snapshot.total_assets = Some(dec!(500));

        let summary = aggregate(&[a, b]);
        assert_eq!(summary.equity_exposure, Some(dec!(60.00)));
    }

    #[test]
    fn undefined_asset_ratio_is_excluded_not_zero() {
        let mut a = line("1", Some(dec!(100)));
        a.snapshot.equity_exposure = Some(dec!(50));
        a.snapshot.total_assets = Some(dec!(100));
        // Zero assets: exposure ratio undefined, line must not dilute.
        let mut b = line("2", Some(dec!(900)));
        b.snapshot.equity_exposure = Some(dec!(10));
        b.snapshot.total_assets = Some(Decimal::ZERO);

        let summary = aggregate(&[a, b]);
        assert_eq!(summary.equity_exposure, Some(dec!(50.00)));
    }

    #[test]
    fn metric_missing_on_every_line_is_unavailable() {
        let a = line("1", Some(dec!(100)));
        let summary = aggregate(&[a]);
        assert_eq!(summary.total_allocation, dec!(100));
        assert_eq!(summary.twr, None);
        assert_eq!(summary.trailing_5yr_yield, None);
    }

    #[test]
    fn weighting_follows_allocation_size() {
        let mut a = line("1", Some(dec!(300)));
        a.snapshot.twr = Some(dec!(2.00));
        let mut b = line("2", Some(dec!(100)));
        b.snapshot.twr = Some(dec!(10.00));

        let summary = aggregate(&[a, b]);
        // (300*2 + 100*10) / 400 = 4.00
        assert_eq!(summary.twr, Some(dec!(4.00)));
    }
}
