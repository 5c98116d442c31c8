//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use clmm_econ_engine::prelude::*;
//!
//! let metrics = compute_metrics(&PositionSnapshot::default());
//! assert!(metrics.dynamic_fee >= 0.008);
//! ```

// Entry point
pub use crate::compute::compute_metrics;

// Component breakdowns
pub use crate::fee::{FeeBreakdown, dynamic_fee};
pub use crate::frictions::FrictionBreakdown;
pub use crate::rewards::RewardBreakdown;
pub use crate::valuation::ValuationBreakdown;

// Data model
pub use clmm_econ_domain::enums::{AprDenominator, PoolType};
pub use clmm_econ_domain::outputs::PositionMetrics;
pub use clmm_econ_domain::snapshot::{PositionSnapshot, SnapshotIssue};
