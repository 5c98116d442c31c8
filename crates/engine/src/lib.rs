//! Fee and position economics calculation engine.
//!
//! The engine is a pure, synchronous function of one input snapshot. It
//! performs no I/O and keeps no state between calls, so identical
//! snapshots always produce identical output records and callers may
//! invoke it concurrently or memoize on input equality as they see fit.
//!
//! Entry point: [`compute::compute_metrics`].

/// Prelude module for convenient imports.
pub mod prelude;

/// Aggregator producing the full output record.
pub mod compute;
/// Dynamic fee model.
pub mod fee;
/// Friction model: range occupancy, LVR, MEV and rebalancing drag.
pub mod frictions;
/// Vote-escrow emission and bribe accrual.
pub mod rewards;
/// Scenario valuation against the HODL baseline.
pub mod valuation;
