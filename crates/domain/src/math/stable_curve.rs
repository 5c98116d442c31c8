//! Stable curve position valuation and quoting.
//!
//! Stable pools trade pegged pairs on a flattened curve, so price
//! deviations cost far less than on a constant product curve. The default
//! valuation uses a quadratic deviation penalty; when reserves are known a
//! curve quote replaces the fixed coefficient with a slippage-derived term.

/// Amplification used by the simplified curve quote.
pub const DEFAULT_AMPLIFICATION: f64 = 100.0;

/// Result of a simplified stable curve quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StableQuote {
    /// Output amount for the quoted input.
    pub amount_out: f64,
    /// Pool price after the trade.
    pub new_price: f64,
}

/// Quotes a swap of `amount_in` against reserves on a flattened curve.
///
/// dy = amount_in * (reserve_out / reserve_in) * slippage_factor, where the
/// amplification controls how slowly the slippage factor decays. The
/// factor is floored at 0.01 so a quote never collapses to zero output.
pub fn quote(
    amount_in: f64,
    reserve_in: f64,
    reserve_out: f64,
    amplification: f64,
) -> StableQuote {
    if amount_in <= 0.0 || reserve_in <= 0.0 || reserve_out <= 0.0 {
        return StableQuote {
            amount_out: 0.0,
            new_price: 0.0,
        };
    }

    let base_price = reserve_out / reserve_in;
    let slippage_factor = 1.0 - amount_in / (reserve_in * amplification);
    let amount_out = amount_in * base_price * slippage_factor.max(0.01);
    let new_price = (reserve_out - amount_out) / (reserve_in + amount_in);

    StableQuote {
        amount_out,
        new_price,
    }
}

/// Value of a stable pool LP position at the scenario price.
///
/// Default form: value = initial * (1 - 0.1 * dev^2), dev = |p1/p0 - 1|.
/// With both reserves known, a trade sized to the price change is quoted
/// and the squared slippage replaces the fixed coefficient:
/// value = initial * (1 - 0.05 * slip^2). Falls back to `initial_value`
/// when the reference price is degenerate.
pub fn position_value_at(
    p1: f64,
    initial_value: f64,
    p0: f64,
    reserves: Option<(f64, f64)>,
) -> f64 {
    if p0 <= 0.0 {
        return initial_value;
    }

    if let Some((reserve0, reserve1)) = reserves
        && reserve0 > 0.0
        && reserve1 > 0.0
    {
        let price_change = (p1 - p0) / p0;
        let trade_size = price_change.abs() * reserve0 * 0.1;
        let curve_quote = quote(trade_size, reserve0, reserve1, DEFAULT_AMPLIFICATION);
        let slippage = (curve_quote.new_price - p0).abs() / p0;
        let il_factor = 1.0 - slippage * slippage * 0.05;
        return initial_value * il_factor;
    }

    let deviation = (p1 / p0 - 1.0).abs();
    initial_value * (1.0 - deviation * deviation * 0.1)
}
