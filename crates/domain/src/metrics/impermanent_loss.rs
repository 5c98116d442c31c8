//! HODL baseline and divergence vs the passive benchmark.
//!
//! Sign convention used across the whole crate: divergence is
//! `position - baseline`, so a positive figure means the fee-free position
//! is worth more than holding the tokens passively. This is the inverse of
//! the everyday "loss is positive" reading of impermanent loss.

/// Divergence of a position against its HODL baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divergence {
    /// position - baseline, USD. Positive = outperformance.
    pub usd: f64,
    /// Divergence as a fraction of the baseline, 0 when the baseline is
    /// non-positive.
    pub pct: f64,
}

/// Value of holding the initial tokens passively at the scenario price.
///
/// The volatile leg (fraction `volatile_mix` of the initial value) scales
/// with p1/p0; the rest is assumed flat in USD. Falls back to
/// `initial_value` when the reference price is degenerate.
pub fn hodl_value(p1: f64, initial_value: f64, p0: f64, volatile_mix: f64) -> f64 {
    if p0 <= 0.0 {
        return initial_value;
    }
    let flat_leg = initial_value * (1.0 - volatile_mix);
    let volatile_leg = initial_value * volatile_mix;
    flat_leg + volatile_leg * (p1 / p0)
}

/// Divergence of a fee-free position value against the HODL baseline.
pub fn divergence_vs_hodl(position_without_fees: f64, hodl_baseline: f64) -> Divergence {
    let usd = position_without_fees - hodl_baseline;
    let pct = if hodl_baseline > 0.0 {
        usd / hodl_baseline
    } else {
        0.0
    };
    Divergence { usd, pct }
}
