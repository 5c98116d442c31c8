//! Constant product (x * y = k) position valuation.

/// Divergence factor of a constant product LP position for a price ratio.
///
/// factor = 2 * sqrt(r) / (1 + r), r = p1 / p0. Equals 1 when the price is
/// unchanged and falls below 1 in both directions.
pub fn divergence_factor(price_ratio: f64) -> f64 {
    if price_ratio <= 0.0 {
        return 1.0;
    }
    2.0 * price_ratio.sqrt() / (1.0 + price_ratio)
}

/// Value of a constant product LP position at the scenario price.
///
/// value = initial * 2 * sqrt(p1/p0) / (1 + p1/p0). Falls back to
/// `initial_value` when the reference price is degenerate.
pub fn position_value_at(p1: f64, initial_value: f64, p0: f64) -> f64 {
    if p0 <= 0.0 {
        return initial_value;
    }
    initial_value * divergence_factor(p1 / p0)
}
