/// Concentrated liquidity math in sqrt-price space.
pub mod concentrated_liquidity;
/// Constant product (x * y = k) position valuation.
pub mod constant_product;
/// Stable curve position valuation and quoting.
pub mod stable_curve;
