//! Immutable input snapshot for one calculation.
//!
//! A snapshot carries every market and policy parameter the engine needs.
//! Each call to the engine consumes one snapshot and returns one output
//! record; nothing is shared or mutated between calls.

use crate::enums::{AprDenominator, PoolType};
use crate::math::concentrated_liquidity;
use crate::sanitize::{clamp01, non_negative};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural problem in a snapshot.
///
/// These never abort a calculation. Each component degrades locally
/// (see the math and engine modules); `validate` only surfaces the issues
/// so a caller can flag them at the boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotIssue {
    #[error("price range is inverted: lower {lower} >= upper {upper}")]
    InvertedRange { lower: f64, upper: f64 },
    #[error("fee floor {floor} exceeds fee cap {cap}; the cap is applied")]
    FeeFloorAboveCap { floor: f64, cap: f64 },
    #[error("non-positive or non-finite price field: {field}")]
    NonPositivePrice { field: &'static str },
}

/// One immutable snapshot of market and policy parameters.
///
/// All monetary figures are USD. Rates and fractions are decimals
/// (0.025 = 2.5%), macro rates are percent figures (8.25 = 8.25%).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionSnapshot {
    // Pool & position
    /// Pool archetype.
    pub pool_type: PoolType,
    /// Position mark in USD at the reference price.
    pub position_value: f64,
    /// Current pool price (token1 per token0).
    pub current_price: f64,
    /// Reference price for the HODL / IL comparison.
    pub p0: f64,
    /// Scenario price for the HODL / IL comparison.
    pub p1: f64,
    /// Lower range bound (concentrated pools).
    pub lower_price: f64,
    /// Upper range bound (concentrated pools).
    pub upper_price: f64,
    /// Your liquidity figure.
    pub your_liquidity: f64,
    /// Active liquidity in the range.
    pub active_liquidity: f64,
    /// Fraction of time/volume spent in range. Left at 1.0 the engine
    /// derives it from the current price and the range bounds.
    pub time_in_range_frac: f64,
    /// Optional token0 amount; with `amount1` it replaces `your_liquidity`.
    pub amount0: Option<f64>,
    /// Optional token1 amount; with `amount0` it replaces `your_liquidity`.
    pub amount1: Option<f64>,
    /// Optional token0 reserve for the stable curve quote.
    pub reserve0: Option<f64>,
    /// Optional token1 reserve for the stable curve quote.
    pub reserve1: Option<f64>,

    // Flow & microstructure
    /// 24h swap volume crossing the pool, USD.
    pub swap_volume_24h: f64,
    /// One-way order flow share, 0..1.
    pub flow_imbalance: f64,
    /// Realized volatility, annualized decimal.
    pub realized_vol: f64,
    /// CEX to DEX price lag in milliseconds.
    pub cex_dex_lag_ms: f64,
    /// Rebalances per day.
    pub rebalances_per_day: f64,
    /// Gas cost per rebalance, USD.
    pub gas_per_rebalance: f64,

    // Fee policy
    /// Lower bound of the dynamic fee, decimal.
    pub fee_floor: f64,
    /// Upper bound of the dynamic fee, decimal.
    pub fee_cap: f64,
    /// Volatility anchor the vol component scales from.
    pub vol_anchor: f64,
    /// Volatility coefficient.
    pub k1: f64,
    /// Flow imbalance coefficient.
    pub k2: f64,
    /// Rate differential coefficient.
    pub k3: f64,
    /// Additive fee bump under stress, decimal.
    pub stress_delta: f64,
    /// Absolute daily move input, decimal (0.05 = 5%).
    pub daily_move_pct: f64,

    // Macro / carry
    /// Domestic policy rate, percent.
    pub rate_domestic: f64,
    /// Foreign policy rate, percent.
    pub rate_foreign: f64,

    // Risk policy
    /// Insurance buffer as a fraction of position value.
    pub insurance_buffer: f64,
    /// Volatile-leg allocation of the HODL baseline, 0..1.
    pub target_mix: f64,
    /// MEV haircut on pro-rata volume, basis points.
    pub mev_bps: f64,

    // Emissions & bribes
    /// Weekly emission pool, reward tokens.
    pub weekly_emission_pool: f64,
    /// Votes this pool received.
    pub pool_votes: f64,
    /// Total votes across all pools.
    pub total_votes: f64,
    /// Your share of this pool's liquidity, 0..1.
    pub lp_share_of_pool: f64,
    /// Vote-escrow boost factor, floored at 1.
    pub ve_boost: f64,
    /// USD value of bribes per vote.
    pub bribe_per_vote_usd: f64,
    /// Reward token price, USD.
    pub reward_token_price: f64,

    /// Denominator mode for the APR breakdown.
    pub apr_denominator: AprDenominator,
}

impl Default for PositionSnapshot {
    fn default() -> Self {
        Self {
            pool_type: PoolType::Concentrated,
            position_value: 100_000.0,
            current_price: 18.75,
            p0: 18.75,
            p1: 18.75,
            lower_price: 18.0,
            upper_price: 19.5,
            your_liquidity: 2.73,
            active_liquidity: 44_609.06,
            time_in_range_frac: 1.0,
            amount0: None,
            amount1: None,
            reserve0: None,
            reserve1: None,
            swap_volume_24h: 12_500_000.0,
            flow_imbalance: 0.72,
            realized_vol: 0.17,
            cex_dex_lag_ms: 450.0,
            rebalances_per_day: 1.0,
            gas_per_rebalance: 2.4,
            fee_floor: 0.008,
            fee_cap: 0.025,
            vol_anchor: 0.12,
            k1: 3.0,
            k2: 0.5,
            k3: 0.2,
            stress_delta: 0.006,
            daily_move_pct: 0.05,
            rate_domestic: 8.25,
            rate_foreign: 5.5,
            insurance_buffer: 0.06,
            target_mix: 0.45,
            mev_bps: 6.0,
            weekly_emission_pool: 1_000_000.0,
            pool_votes: 50_000.0,
            total_votes: 1_000_000.0,
            lp_share_of_pool: 0.001,
            ve_boost: 1.0,
            bribe_per_vote_usd: 0.05,
            reward_token_price: 0.50,
            apr_denominator: AprDenominator::PositionValue,
        }
    }
}

impl PositionSnapshot {
    /// Sets the pool archetype.
    #[must_use]
    pub fn with_pool_type(mut self, pool_type: PoolType) -> Self {
        self.pool_type = pool_type;
        self
    }

    /// Sets the position mark in USD.
    #[must_use]
    pub fn with_position_value(mut self, value: f64) -> Self {
        self.position_value = value;
        self
    }

    /// Sets the current pool price.
    #[must_use]
    pub fn with_current_price(mut self, price: f64) -> Self {
        self.current_price = price;
        self
    }

    /// Sets the reference and scenario prices for the IL comparison.
    #[must_use]
    pub fn with_prices(mut self, p0: f64, p1: f64) -> Self {
        self.p0 = p0;
        self.p1 = p1;
        self
    }

    /// Sets the range bounds.
    #[must_use]
    pub fn with_range(mut self, lower: f64, upper: f64) -> Self {
        self.lower_price = lower;
        self.upper_price = upper;
        self
    }

    /// Sets your and the active liquidity figures.
    #[must_use]
    pub fn with_liquidity(mut self, yours: f64, active: f64) -> Self {
        self.your_liquidity = yours;
        self.active_liquidity = active;
        self
    }

    /// Supplies the token amount pair that derives liquidity.
    #[must_use]
    pub fn with_amounts(mut self, amount0: f64, amount1: f64) -> Self {
        self.amount0 = Some(amount0);
        self.amount1 = Some(amount1);
        self
    }

    /// Sets the 24h swap volume.
    #[must_use]
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.swap_volume_24h = volume;
        self
    }

    /// Sets an explicit time-in-range fraction.
    #[must_use]
    pub fn with_time_in_range(mut self, frac: f64) -> Self {
        self.time_in_range_frac = frac;
        self
    }

    /// Sets the APR denominator mode.
    #[must_use]
    pub fn with_apr_denominator(mut self, mode: AprDenominator) -> Self {
        self.apr_denominator = mode;
        self
    }

    /// Whether the current price sits inside the range bounds.
    #[must_use]
    pub fn range_contains_current(&self) -> bool {
        self.current_price >= self.lower_price && self.current_price <= self.upper_price
    }

    /// Time-in-range fraction the friction model uses.
    ///
    /// An explicit fraction below 1.0 is taken as-is (clamped). Left at the
    /// 1.0 default it is derived from the current price: zero when the price
    /// sits outside the range, one otherwise.
    #[must_use]
    pub fn effective_time_in_range(&self) -> f64 {
        if self.time_in_range_frac < 1.0 {
            return clamp01(self.time_in_range_frac);
        }
        if self.pool_type == PoolType::Concentrated && !self.range_contains_current() {
            return 0.0;
        }
        1.0
    }

    /// Liquidity figure used for fee share and valuation.
    ///
    /// When a concentrated position supplies both token amounts, liquidity
    /// is derived from them; otherwise the manual `your_liquidity` input is
    /// used.
    #[must_use]
    pub fn position_liquidity(&self) -> f64 {
        if self.pool_type == PoolType::Concentrated {
            if let (Some(a0), Some(a1)) = (self.amount0, self.amount1) {
                return concentrated_liquidity::liquidity_from_amounts(
                    Some(non_negative(a0)),
                    Some(non_negative(a1)),
                    self.lower_price,
                    self.upper_price,
                );
            }
        }
        non_negative(self.your_liquidity)
    }

    /// Reports structural problems without failing the calculation.
    #[must_use]
    pub fn validate(&self) -> Vec<SnapshotIssue> {
        let mut issues = Vec::new();
        if self.pool_type == PoolType::Concentrated && self.lower_price >= self.upper_price {
            issues.push(SnapshotIssue::InvertedRange {
                lower: self.lower_price,
                upper: self.upper_price,
            });
        }
        if self.fee_floor > self.fee_cap {
            issues.push(SnapshotIssue::FeeFloorAboveCap {
                floor: self.fee_floor,
                cap: self.fee_cap,
            });
        }
        for (field, value) in [
            ("current_price", self.current_price),
            ("p0", self.p0),
            ("p1", self.p1),
        ] {
            if !(value.is_finite() && value > 0.0) {
                issues.push(SnapshotIssue::NonPositivePrice { field });
            }
        }
        issues
    }
}
