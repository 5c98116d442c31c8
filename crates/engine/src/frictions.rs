//! Friction model.
//!
//! Converts the raw share/volume figures into the effective exposure a
//! position actually earns on (range occupancy for concentrated pools),
//! then nets gross fees against LVR, the MEV haircut and rebalancing
//! costs.

use clmm_econ_domain::enums::PoolType;
use clmm_econ_domain::sanitize::{clamp01, floor_eps, non_negative};
use clmm_econ_domain::snapshot::PositionSnapshot;

/// Quadratic volatility coefficient of the LVR proxy.
const LVR_VOL_COEF: f64 = 0.35;
/// Linear latency coefficient of the LVR proxy, per second of lag.
const LVR_LAG_COEF: f64 = 0.15;

/// Daily fee economics after frictions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionBreakdown {
    /// Share of in-range liquidity that accrues to the position, 0..1.
    pub effective_share: f64,
    /// Volume the position actually earns on, USD/day.
    pub effective_volume: f64,
    /// Fees before frictions, USD/day.
    pub gross_fees: f64,
    /// Loss-versus-rebalancing estimate, USD/day.
    pub lvr: f64,
    /// MEV haircut, USD/day.
    pub mev_haircut: f64,
    /// Rebalancing cost, USD/day.
    pub rebalance_cost: f64,
    /// Gross fees minus all frictions, USD/day. May be negative.
    pub net_fees: f64,
    /// Fee rate at which net fees would be exactly zero, decimal.
    pub break_even_fee: f64,
}

/// Assesses the daily fee economics of a snapshot at a given fee rate.
///
/// For concentrated pools the volume is scaled by the time-in-range
/// fraction and the share is forced to zero when the position sits fully
/// outside its range. Other pool types earn on their raw share and volume.
pub fn assess(snapshot: &PositionSnapshot, fee: f64) -> FrictionBreakdown {
    let active_liquidity = floor_eps(snapshot.active_liquidity);
    let share = clamp01(snapshot.position_liquidity() / active_liquidity);
    let volume = non_negative(snapshot.swap_volume_24h);

    let (effective_share, effective_volume) = if snapshot.pool_type == PoolType::Concentrated {
        let time_in_range = snapshot.effective_time_in_range();
        let share = if time_in_range == 0.0 { 0.0 } else { share };
        (share, volume * time_in_range)
    } else {
        (share, volume)
    };

    let exposure = effective_share * effective_volume;
    let gross_fees = exposure * fee;

    let sigma = non_negative(snapshot.realized_vol);
    let lag_seconds = non_negative(snapshot.cex_dex_lag_ms) / 1_000.0;
    let lvr = ((LVR_VOL_COEF * sigma * sigma + LVR_LAG_COEF * lag_seconds) * exposure).max(0.0);

    let mev_haircut = exposure * (non_negative(snapshot.mev_bps) / 10_000.0);

    let rebalance_cost =
        non_negative(snapshot.rebalances_per_day) * non_negative(snapshot.gas_per_rebalance);

    let net_fees = gross_fees - lvr - mev_haircut - rebalance_cost;

    let fixed_costs = lvr + mev_haircut + rebalance_cost;
    let break_even_fee = if exposure > 0.0 {
        fixed_costs / exposure
    } else {
        0.0
    };

    FrictionBreakdown {
        effective_share,
        effective_volume,
        gross_fees,
        lvr,
        mev_haircut,
        rebalance_cost,
        net_fees,
        break_even_fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_position_earns_nothing() {
        let snapshot = PositionSnapshot::default().with_current_price(25.0);
        let out = assess(&snapshot, 0.01);
        assert_eq!(out.effective_share, 0.0);
        assert_eq!(out.effective_volume, 0.0);
        assert_eq!(out.gross_fees, 0.0);
        assert_eq!(out.lvr, 0.0);
        // Rebalance gas still burns while out of range.
        assert_eq!(out.rebalance_cost, 2.4);
        assert!(out.net_fees < 0.0);
    }

    #[test]
    fn test_explicit_time_in_range_scales_volume() {
        let snapshot = PositionSnapshot::default().with_time_in_range(0.5);
        let full = assess(&PositionSnapshot::default(), 0.01);
        let half = assess(&snapshot, 0.01);
        assert!((half.effective_volume - full.effective_volume * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_non_cl_pool_uses_raw_share_and_volume() {
        use clmm_econ_domain::enums::PoolType;
        let snapshot = PositionSnapshot::default()
            .with_pool_type(PoolType::Volatile)
            .with_current_price(25.0);
        let out = assess(&snapshot, 0.01);
        // Range bounds are irrelevant for a full-range pool.
        assert!(out.effective_share > 0.0);
        assert_eq!(out.effective_volume, 12_500_000.0);
    }

    #[test]
    fn test_share_is_clamped_to_one() {
        let snapshot = PositionSnapshot::default().with_liquidity(10.0, 1.0);
        let out = assess(&snapshot, 0.01);
        assert_eq!(out.effective_share, 1.0);
    }

    #[test]
    fn test_net_fees_subtract_all_frictions() {
        let out = assess(&PositionSnapshot::default(), 0.025);
        let recomputed = out.gross_fees - out.lvr - out.mev_haircut - out.rebalance_cost;
        assert!((out.net_fees - recomputed).abs() < 1e-9);
    }

    #[test]
    fn test_break_even_consistency_with_net_fees() {
        // With positive exposure: break-even above the applied fee
        // exactly when net fees are negative.
        let loss = assess(&PositionSnapshot::default(), 0.025);
        assert!(loss.net_fees < 0.0);
        assert!(loss.break_even_fee > 0.025);

        let mut quiet = PositionSnapshot::default();
        quiet.realized_vol = 0.0;
        quiet.cex_dex_lag_ms = 0.0;
        quiet.rebalances_per_day = 0.0;
        let gain = assess(&quiet, 0.025);
        assert!(gain.net_fees > 0.0);
        assert!(gain.break_even_fee < 0.025);
    }

    #[test]
    fn test_zero_exposure_zeroes_break_even() {
        let mut snapshot = PositionSnapshot::default();
        snapshot.swap_volume_24h = 0.0;
        let out = assess(&snapshot, 0.025);
        assert_eq!(out.break_even_fee, 0.0);
    }

    #[test]
    fn test_derived_liquidity_feeds_share() {
        // Supplying token amounts replaces the manual liquidity figure.
        let manual = assess(&PositionSnapshot::default(), 0.01);
        let derived = assess(
            &PositionSnapshot::default().with_amounts(1_000.0, 20_000.0),
            0.01,
        );
        assert!(derived.effective_share > manual.effective_share);
    }
}
