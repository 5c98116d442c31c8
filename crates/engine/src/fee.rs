//! Dynamic fee model.
//!
//! A stateless per-call decision: four additive components scaled by a
//! pool-type multiplier, clamped into the policy band as the final step.

use clmm_econ_domain::enums::PoolType;
use clmm_econ_domain::sanitize::{clamp, finite_or, non_negative};
use clmm_econ_domain::snapshot::PositionSnapshot;
use tracing::{debug, warn};

/// Absolute daily move that trips the stress circuit-breaker.
pub const STRESS_MOVE_THRESHOLD: f64 = 0.05;
/// Gap of realized volatility over the anchor that trips it.
pub const STRESS_VOL_GAP: f64 = 0.03;
/// Flow imbalance below this level contributes no flow fee.
const FLOW_IMBALANCE_THRESHOLD: f64 = 0.70;
/// Rate spread below this many percentage points contributes no carry fee.
const RATE_SPREAD_THRESHOLD: f64 = 2.0;

/// Dynamic fee with its additive components.
///
/// Components are reported before the pool-type multiplier; `fee` is the
/// final clamped rate. All values are decimal fee rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeBreakdown {
    /// Final fee rate, clamped into [floor, cap].
    pub fee: f64,
    /// Volatility component.
    pub f_vol: f64,
    /// Order-flow component.
    pub f_flow: f64,
    /// Rate-differential component.
    pub f_rate: f64,
    /// Stress add-on component.
    pub f_stress: f64,
    /// Whether the stress circuit-breaker fired.
    pub stress: bool,
}

/// Computes the dynamic fee for a snapshot.
///
/// The stress flag is binary, not smoothed: it fires when the absolute
/// daily move reaches [`STRESS_MOVE_THRESHOLD`] or realized volatility
/// exceeds the anchor by [`STRESS_VOL_GAP`]. The floor/cap clamp is the
/// unconditional last step; when the policy is misconfigured with
/// floor > cap, the cap is authoritative.
pub fn dynamic_fee(snapshot: &PositionSnapshot) -> FeeBreakdown {
    let sigma = non_negative(snapshot.realized_vol);
    let anchor = non_negative(snapshot.vol_anchor);
    let daily_move = finite_or(snapshot.daily_move_pct, 0.0).abs();

    let stress = daily_move >= STRESS_MOVE_THRESHOLD || (sigma - anchor) >= STRESS_VOL_GAP;
    if stress {
        debug!(daily_move, sigma, anchor, "stress circuit-breaker active");
    }

    let floor = finite_or(snapshot.fee_floor, 0.0);
    let cap = finite_or(snapshot.fee_cap, 0.0);
    if floor > cap {
        warn!(floor, cap, "fee floor exceeds cap; the cap is applied");
    }

    // Stable pairs move less, so the volatility term is halved for them.
    let vol_adjustment = if snapshot.pool_type == PoolType::Stable {
        0.5
    } else {
        1.0
    };

    let f_vol = (floor + finite_or(snapshot.k1, 0.0) * (sigma - anchor).max(0.0)) * vol_adjustment;
    let f_flow = finite_or(snapshot.k2, 0.0)
        * (finite_or(snapshot.flow_imbalance, 0.0) - FLOW_IMBALANCE_THRESHOLD).max(0.0);
    let spread = finite_or(snapshot.rate_domestic, 0.0) - finite_or(snapshot.rate_foreign, 0.0);
    let f_rate = finite_or(snapshot.k3, 0.0) * (spread - RATE_SPREAD_THRESHOLD).max(0.0);
    let f_stress = if stress {
        finite_or(snapshot.stress_delta, 0.0)
    } else {
        0.0
    };

    let multiplier = match snapshot.pool_type {
        PoolType::Volatile => 1.2,
        PoolType::Stable => 0.8,
        PoolType::Concentrated => 1.0,
    };

    let raw = (f_vol + f_flow + f_rate + f_stress) * multiplier;
    let fee = clamp(raw, floor, cap);

    FeeBreakdown {
        fee,
        f_vol,
        f_flow,
        f_rate,
        f_stress,
        stress,
    }
}
