//! Aggregator producing the full output record.

use crate::fee;
use crate::frictions;
use crate::rewards;
use crate::valuation;
use clmm_econ_domain::enums::{AprDenominator, PoolType};
use clmm_econ_domain::outputs::PositionMetrics;
use clmm_econ_domain::sanitize::{floor_eps, non_negative};
use clmm_econ_domain::snapshot::PositionSnapshot;

/// Days used to annualize daily flows.
const DAYS_PER_YEAR: f64 = 365.0;

/// Computes the complete metrics record for one snapshot.
///
/// This is the single entry point of the engine. It never fails and never
/// returns a partially populated record: malformed numeric fields degrade
/// to neutral fallbacks inside each component.
pub fn compute_metrics(snapshot: &PositionSnapshot) -> PositionMetrics {
    let fee = fee::dynamic_fee(snapshot);
    let frictions = frictions::assess(snapshot, fee.fee);
    let valuation = valuation::assess(snapshot, frictions.net_fees);
    let rewards = rewards::accrue(snapshot);

    let position = floor_eps(snapshot.position_value);

    // Insurance coverage snapshot: the buffer absorbs a daily deficit
    // until it runs out.
    let insurance_tvl = non_negative(snapshot.insurance_buffer) * position;
    let deficit = (-frictions.net_fees).max(0.0);
    let deficit_covered = deficit.min(insurance_tvl);
    let insurance_remaining = (insurance_tvl - deficit_covered).max(0.0);

    let denominator = if snapshot.apr_denominator == AprDenominator::ActiveLiquidity
        && snapshot.pool_type == PoolType::Concentrated
    {
        floor_eps(non_negative(snapshot.active_liquidity) * non_negative(snapshot.current_price))
    } else {
        position
    };

    let fees_apr = frictions.net_fees / denominator * DAYS_PER_YEAR;
    let rewards_apr = rewards.total_rewards_usd / denominator * DAYS_PER_YEAR;

    PositionMetrics {
        dynamic_fee: fee.fee,
        fee_vol: fee.f_vol,
        fee_flow: fee.f_flow,
        fee_rate_diff: fee.f_rate,
        fee_stress: fee.f_stress,
        stress: fee.stress,

        gross_fees: frictions.gross_fees,
        lvr: frictions.lvr,
        mev_haircut: frictions.mev_haircut,
        rebalance_cost: frictions.rebalance_cost,
        net_fees: frictions.net_fees,

        apr: frictions.net_fees / position * DAYS_PER_YEAR,
        break_even_fee: frictions.break_even_fee,

        deficit_covered,
        insurance_remaining,

        position_value_at_p1: valuation.position_value_at_p1,
        position_without_fees: valuation.position_without_fees,
        hodl_baseline: valuation.hodl_baseline,
        il_usd: valuation.il_usd,
        il_pct: valuation.il_pct,
        pnl_vs_hodl: valuation.pnl_vs_hodl,
        net_edge: valuation.net_edge,

        emissions_usd: rewards.emissions_usd,
        bribes_usd: rewards.bribes_usd,
        total_rewards_usd: rewards.total_rewards_usd,

        fees_apr,
        rewards_apr,
        total_apr: fees_apr + rewards_apr,
        enhanced_net_pnl: frictions.net_fees + rewards.total_rewards_usd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_all_finite(metrics: &PositionMetrics) {
        let fields = [
            metrics.dynamic_fee,
            metrics.fee_vol,
            metrics.fee_flow,
            metrics.fee_rate_diff,
            metrics.fee_stress,
            metrics.gross_fees,
            metrics.lvr,
            metrics.mev_haircut,
            metrics.rebalance_cost,
            metrics.net_fees,
            metrics.apr,
            metrics.break_even_fee,
            metrics.deficit_covered,
            metrics.insurance_remaining,
            metrics.position_value_at_p1,
            metrics.position_without_fees,
            metrics.hodl_baseline,
            metrics.il_usd,
            metrics.il_pct,
            metrics.pnl_vs_hodl,
            metrics.net_edge,
            metrics.emissions_usd,
            metrics.bribes_usd,
            metrics.total_rewards_usd,
            metrics.fees_apr,
            metrics.rewards_apr,
            metrics.total_apr,
            metrics.enhanced_net_pnl,
        ];
        for value in fields {
            assert!(value.is_finite(), "non-finite output field: {value}");
        }
    }

    #[test]
    fn test_default_scenario_record() {
        let metrics = compute_metrics(&PositionSnapshot::default());

        // Raw fee (0.158 + 0.01 + 0.15 + 0.006) lands on the cap.
        assert!(metrics.stress);
        assert!((metrics.dynamic_fee - 0.025).abs() < 1e-12);
        assert!((metrics.fee_vol - 0.158).abs() < 1e-12);
        assert!((metrics.fee_flow - 0.01).abs() < 1e-12);
        assert!((metrics.fee_rate_diff - 0.15).abs() < 1e-12);
        assert!((metrics.fee_stress - 0.006).abs() < 1e-12);

        // Heavy LVR turns the position fee-negative.
        assert!((metrics.gross_fees - 19.12447830104468).abs() < 1e-6);
        assert!((metrics.lvr - 59.37385533342331).abs() < 1e-6);
        assert!((metrics.mev_haircut - 0.4589874792250722).abs() < 1e-6);
        assert!((metrics.rebalance_cost - 2.4).abs() < 1e-12);
        assert!((metrics.net_fees - -43.1083645116037).abs() < 1e-6);
        assert!((metrics.break_even_fee - 0.08135234048351649).abs() < 1e-9);

        // No price move: no divergence against HODL.
        assert!((metrics.hodl_baseline - 100_000.0).abs() < 1e-6);
        assert!(metrics.il_usd.abs() < 1e-6);
        assert!((metrics.net_edge - metrics.net_fees).abs() < 1e-6);

        // The 6% buffer easily covers the daily deficit.
        assert!((metrics.deficit_covered - 43.1083645116037).abs() < 1e-6);
        assert!((metrics.insurance_remaining - 5_956.891635488396).abs() < 1e-6);

        assert!((metrics.emissions_usd - 3.571428571428571).abs() < 1e-9);
        assert!((metrics.total_rewards_usd - 3.928571428571429).abs() < 1e-9);
        assert!((metrics.apr - -0.15734553046735353).abs() < 1e-9);
        assert!((metrics.total_apr - -0.1430062447530678).abs() < 1e-9);
        assert!((metrics.enhanced_net_pnl - -39.17979308303228).abs() < 1e-6);

        assert_all_finite(&metrics);
    }

    #[test]
    fn test_zero_active_liquidity_stays_finite() {
        let snapshot = PositionSnapshot::default().with_liquidity(0.0, 0.0);
        let metrics = compute_metrics(&snapshot);
        assert_all_finite(&metrics);
        assert_eq!(metrics.gross_fees, 0.0);
    }

    #[test]
    fn test_hostile_snapshot_stays_finite() {
        let mut snapshot = PositionSnapshot::default();
        snapshot.position_value = f64::NAN;
        snapshot.active_liquidity = f64::INFINITY;
        snapshot.swap_volume_24h = -5.0;
        snapshot.p0 = f64::NAN;
        snapshot.p1 = f64::NEG_INFINITY;
        snapshot.realized_vol = f64::NAN;
        snapshot.total_votes = 0.0;
        snapshot.fee_floor = f64::NAN;
        snapshot.fee_cap = f64::NAN;
        snapshot.lower_price = f64::NAN;
        snapshot.upper_price = f64::NAN;
        snapshot.your_liquidity = f64::NAN;
        let metrics = compute_metrics(&snapshot);
        assert_all_finite(&metrics);
    }

    #[test]
    fn test_fee_always_inside_policy_band() {
        let mut snapshot = PositionSnapshot::default();
        for vol in [0.0, 0.1, 0.5, 2.0] {
            snapshot.realized_vol = vol;
            let metrics = compute_metrics(&snapshot);
            assert!(metrics.dynamic_fee >= snapshot.fee_floor);
            assert!(metrics.dynamic_fee <= snapshot.fee_cap);
        }
    }

    #[test]
    fn test_out_of_range_concentrated_position() {
        let snapshot = PositionSnapshot::default().with_current_price(25.0);
        let metrics = compute_metrics(&snapshot);
        assert_eq!(metrics.gross_fees, 0.0);
        // Only the rebalance gas drags the position down.
        assert!((metrics.net_fees - -2.4).abs() < 1e-12);
        assert_eq!(metrics.break_even_fee, 0.0);
    }

    #[test]
    fn test_break_even_above_fee_iff_net_negative() {
        let lossy = compute_metrics(&PositionSnapshot::default());
        assert!(lossy.net_fees < 0.0);
        assert!(lossy.break_even_fee > lossy.dynamic_fee);

        let mut quiet = PositionSnapshot::default();
        quiet.realized_vol = 0.0;
        quiet.cex_dex_lag_ms = 0.0;
        quiet.rebalances_per_day = 0.0;
        quiet.daily_move_pct = 0.0;
        let profitable = compute_metrics(&quiet);
        assert!(profitable.net_fees > 0.0);
        assert!(profitable.break_even_fee < profitable.dynamic_fee);
    }

    #[test]
    fn test_active_liquidity_apr_mode_changes_breakdown_only() {
        use clmm_econ_domain::enums::AprDenominator;

        let by_position = compute_metrics(&PositionSnapshot::default());
        let by_liquidity = compute_metrics(
            &PositionSnapshot::default().with_apr_denominator(AprDenominator::ActiveLiquidity),
        );

        // The simple APR ignores the mode flag.
        assert!((by_position.apr - by_liquidity.apr).abs() < 1e-12);
        assert!(by_position.fees_apr != by_liquidity.fees_apr);

        // denominator = active_liquidity * current_price.
        let denominator = 44_609.06 * 18.75;
        let expected = by_liquidity.net_fees / denominator * 365.0;
        assert!((by_liquidity.fees_apr - expected).abs() < 1e-9);
    }

    #[test]
    fn test_apr_mode_needs_concentrated_pool() {
        use clmm_econ_domain::enums::{AprDenominator, PoolType};
        let snapshot = PositionSnapshot::default()
            .with_pool_type(PoolType::Volatile)
            .with_apr_denominator(AprDenominator::ActiveLiquidity);
        let metrics = compute_metrics(&snapshot);
        // Non-CL pools keep the position-value denominator.
        assert!((metrics.fees_apr - metrics.net_fees / 100_000.0 * 365.0).abs() < 1e-12);
    }

    #[test]
    fn test_insurance_caps_coverage_at_buffer() {
        let mut snapshot = PositionSnapshot::default();
        snapshot.insurance_buffer = 0.0001; // $10 buffer, ~$43 deficit
        let metrics = compute_metrics(&snapshot);
        assert!((metrics.deficit_covered - 10.0).abs() < 1e-9);
        assert_eq!(metrics.insurance_remaining, 0.0);
    }

    #[test]
    fn test_simple_apr_scales_with_position_value() {
        // Daily flows do not depend on the position mark, so halving the
        // denominator doubles the magnitude of the simple APR.
        let small = compute_metrics(&PositionSnapshot::default().with_position_value(50_000.0));
        let large = compute_metrics(&PositionSnapshot::default().with_position_value(200_000.0));
        assert!((small.net_fees - large.net_fees).abs() < 1e-9);
        assert!(small.apr.abs() > large.apr.abs());
    }

    #[test]
    fn test_identical_snapshots_produce_identical_records() {
        let snapshot = PositionSnapshot::default().with_volume(9_000_000.0);
        let first = compute_metrics(&snapshot);
        let second = compute_metrics(&snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn test_record_roundtrips_through_json() {
        let metrics = compute_metrics(&PositionSnapshot::default());
        let encoded = serde_json::to_string(&metrics).unwrap();
        let decoded: PositionMetrics = serde_json::from_str(&encoded).unwrap();
        assert_eq!(metrics, decoded);
    }
}
