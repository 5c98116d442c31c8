//! Scenario valuation against the HODL baseline.
//!
//! Values the position at the scenario price for each pool archetype,
//! compares it to holding the initial tokens passively, and derives the
//! divergence and net edge figures.

use clmm_econ_domain::enums::PoolType;
use clmm_econ_domain::math::{concentrated_liquidity, constant_product, stable_curve};
use clmm_econ_domain::metrics::impermanent_loss::{divergence_vs_hodl, hodl_value};
use clmm_econ_domain::sanitize::{EPSILON, clamp01, finite_or, floor_eps, non_negative};
use clmm_econ_domain::snapshot::PositionSnapshot;

/// Scenario valuation of a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationBreakdown {
    /// Position value at the scenario price, excluding fees, USD.
    pub position_without_fees: f64,
    /// Passive HODL baseline at the scenario price, USD.
    pub hodl_baseline: f64,
    /// Divergence vs HODL, USD. Positive = outperformance.
    pub il_usd: f64,
    /// Divergence as a fraction of the baseline.
    pub il_pct: f64,
    /// Position value including net fees, USD.
    pub position_value_at_p1: f64,
    /// Position value including fees minus the baseline, USD.
    pub pnl_vs_hodl: f64,
    /// Net fees minus divergence, USD/day.
    pub net_edge: f64,
}

/// Values a snapshot at its scenario price and nets it against HODL.
///
/// A non-finite reference or scenario price falls back to the current
/// price before the epsilon floor is applied.
pub fn assess(snapshot: &PositionSnapshot, net_fees: f64) -> ValuationBreakdown {
    let position = floor_eps(snapshot.position_value);
    let p0 = floor_eps(finite_or(snapshot.p0, snapshot.current_price));
    let p1 = floor_eps(finite_or(snapshot.p1, snapshot.current_price));

    let volatile_mix = clamp01(finite_or(snapshot.target_mix, 0.45));
    let hodl_baseline = hodl_value(p1, position, p0, volatile_mix);

    let position_without_fees = match snapshot.pool_type {
        PoolType::Volatile => constant_product::position_value_at(p1, position, p0),
        PoolType::Stable => {
            let reserves = match (snapshot.reserve0, snapshot.reserve1) {
                (Some(r0), Some(r1)) => Some((non_negative(r0), non_negative(r1))),
                _ => None,
            };
            stable_curve::position_value_at(p1, position, p0, reserves)
        }
        PoolType::Concentrated => concentrated_value(snapshot, position, p0, p1),
    };

    let divergence = divergence_vs_hodl(position_without_fees, hodl_baseline);
    let position_value_at_p1 = position_without_fees + net_fees;
    let pnl_vs_hodl = position_value_at_p1 - hodl_baseline;
    let net_edge = net_fees - divergence.usd;

    ValuationBreakdown {
        position_without_fees,
        hodl_baseline,
        il_usd: divergence.usd,
        il_pct: divergence.pct,
        position_value_at_p1,
        pnl_vs_hodl,
        net_edge,
    }
}

/// Concentrated position value at the scenario price.
///
/// With an explicit token amount pair the derived liquidity is valued
/// directly. With a manual liquidity figure the value is normalized so
/// the position is worth exactly its USD mark at the reference price;
/// the raw liquidity unit carries no USD scale of its own. Degenerate
/// liquidity or range falls back to the initial value.
fn concentrated_value(snapshot: &PositionSnapshot, position: f64, p0: f64, p1: f64) -> f64 {
    let lower = snapshot.lower_price;
    let upper = snapshot.upper_price;
    let liquidity = snapshot.position_liquidity();

    if snapshot.amount0.is_some() && snapshot.amount1.is_some() {
        return concentrated_liquidity::value_at(p1, liquidity, lower, upper, position);
    }

    let value_at_p0 = concentrated_liquidity::value_at(p0, liquidity, lower, upper, position);
    let value_at_p1 = concentrated_liquidity::value_at(p1, liquidity, lower, upper, position);
    if value_at_p0 <= EPSILON {
        return position;
    }
    position * value_at_p1 / value_at_p0
}
