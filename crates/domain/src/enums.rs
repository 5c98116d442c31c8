use serde::{Deserialize, Serialize};

/// Pool archetype a position lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolType {
    /// Constant product (x * y = k) pool.
    Volatile,
    /// Stable-curve pool for pegged pairs.
    Stable,
    /// Concentrated liquidity pool with a bounded range.
    Concentrated,
}

/// Denominator used for the APR breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AprDenominator {
    /// Annualize against the position's USD value.
    #[default]
    PositionValue,
    /// Annualize against active in-range liquidity (concentrated pools only).
    ActiveLiquidity,
}
