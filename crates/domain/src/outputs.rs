//! Output record produced by one calculation.

use serde::{Deserialize, Serialize};

/// Complete result record for one input snapshot.
///
/// Fee rates and `_pct`/`_apr` fields hold decimal fractions; rendering
/// them as percentages is the presentation layer's job. Daily flows are
/// USD per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionMetrics {
    /// Dynamic fee rate after the floor/cap clamp.
    pub dynamic_fee: f64,
    /// Volatility component of the fee.
    pub fee_vol: f64,
    /// Order-flow component of the fee.
    pub fee_flow: f64,
    /// Rate-differential component of the fee.
    pub fee_rate_diff: f64,
    /// Stress add-on component of the fee.
    pub fee_stress: f64,
    /// Whether the stress circuit-breaker fired.
    pub stress: bool,

    /// Gross fees earned, USD/day.
    pub gross_fees: f64,
    /// Loss-versus-rebalancing estimate, USD/day.
    pub lvr: f64,
    /// MEV haircut, USD/day.
    pub mev_haircut: f64,
    /// Rebalancing cost, USD/day.
    pub rebalance_cost: f64,
    /// Net fees after all frictions, USD/day. May be negative.
    pub net_fees: f64,

    /// Simple APR on position value, fraction.
    pub apr: f64,
    /// Fee rate that would zero out net fees, decimal.
    pub break_even_fee: f64,

    /// Daily deficit covered by the insurance buffer, USD.
    pub deficit_covered: f64,
    /// Insurance buffer remaining after coverage, USD.
    pub insurance_remaining: f64,

    /// Position value at the scenario price including net fees, USD.
    pub position_value_at_p1: f64,
    /// Position value at the scenario price excluding fees, USD.
    pub position_without_fees: f64,
    /// Passive HODL baseline value at the scenario price, USD.
    pub hodl_baseline: f64,
    /// Divergence of the fee-free position vs HODL, USD.
    /// Positive = the position outperforms the baseline.
    pub il_usd: f64,
    /// Divergence as a fraction of the HODL baseline.
    pub il_pct: f64,
    /// Position value including fees minus the HODL baseline, USD.
    pub pnl_vs_hodl: f64,
    /// Net fees minus divergence, USD/day.
    pub net_edge: f64,

    /// Emission rewards, USD/day.
    pub emissions_usd: f64,
    /// Bribe rewards, USD/day.
    pub bribes_usd: f64,
    /// Emissions plus bribes, USD/day.
    pub total_rewards_usd: f64,

    /// APR from net fees alone, fraction.
    pub fees_apr: f64,
    /// APR from emissions and bribes, fraction.
    pub rewards_apr: f64,
    /// Combined APR, fraction.
    pub total_apr: f64,
    /// Net fees plus total rewards, USD/day.
    pub enhanced_net_pnl: f64,
}
