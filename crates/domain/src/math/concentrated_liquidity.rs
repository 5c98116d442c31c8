//! Concentrated liquidity math in sqrt-price space.
//!
//! Prices are expressed through their square roots so liquidity is a single
//! scalar across the whole range: for sa = sqrt(P_lower), sb = sqrt(P_upper),
//! amount0 relates to L via L * (sb - s) / (s * sb) and amount1 via
//! L * (s - sa).

/// Derives liquidity from token amounts over a price range.
///
/// Candidates are computed independently from each amount:
/// l0 = amount0 * sa * sb / (sb - sa), l1 = amount1 / (sb - sa).
/// When both amounts are present the binding (minimum) candidate is
/// returned; otherwise whichever single candidate is defined.
///
/// Returns 0 for an inverted or non-positive range, or when no amount is
/// supplied.
pub fn liquidity_from_amounts(
    amount0: Option<f64>,
    amount1: Option<f64>,
    price_lower: f64,
    price_upper: f64,
) -> f64 {
    if !(price_lower > 0.0) || !price_upper.is_finite() || price_lower >= price_upper {
        return 0.0;
    }

    let sa = price_lower.sqrt();
    let sb = price_upper.sqrt();

    let l0 = match amount0 {
        Some(a0) if a0 > 0.0 => a0 * (sa * sb) / (sb - sa),
        _ => 0.0,
    };
    let l1 = match amount1 {
        Some(a1) if a1 > 0.0 => a1 / (sb - sa),
        _ => 0.0,
    };

    if l0 > 0.0 && l1 > 0.0 { l0.min(l1) } else if l0 > 0.0 { l0 } else { l1 }
}

/// Token amounts held by a position of liquidity `liquidity` at `price`.
///
/// Below the range the position is all token0, above it all token1, and
/// in between it splits as amount0 = L * (sb - s) / (s * sb),
/// amount1 = L * (s - sa).
///
/// Degenerate inputs (non-positive liquidity or inverted bounds) yield
/// (0, 0). A non-positive price reads as below the range.
pub fn amounts_from_liquidity(
    liquidity: f64,
    price: f64,
    price_lower: f64,
    price_upper: f64,
) -> (f64, f64) {
    if !(liquidity > 0.0) || !(price_lower > 0.0) || !price_upper.is_finite()
        || price_lower >= price_upper
    {
        return (0.0, 0.0);
    }

    let sa = price_lower.sqrt();
    let sb = price_upper.sqrt();
    let s = price.max(0.0).sqrt();

    if s <= sa {
        (liquidity * (sb - sa) / (sa * sb), 0.0)
    } else if s >= sb {
        (0.0, liquidity * (sb - sa))
    } else {
        (liquidity * (sb - s) / (s * sb), liquidity * (s - sa))
    }
}

/// USD value of a position at `price`, valuing token0 at `price` and
/// token1 at 1.
///
/// Falls back to `initial_value` unchanged when the liquidity or the range
/// is degenerate.
pub fn value_at(
    price: f64,
    liquidity: f64,
    price_lower: f64,
    price_upper: f64,
    initial_value: f64,
) -> f64 {
    if !(liquidity > 0.0) || !(price > 0.0) || !(price_lower > 0.0)
        || !price_upper.is_finite() || price_lower >= price_upper
    {
        return initial_value;
    }
    let (amount0, amount1) = amounts_from_liquidity(liquidity, price, price_lower, price_upper);
    amount0 * price + amount1
}
