//! Vote-escrow emission and bribe accrual.
//!
//! Models a ve(3,3) gauge: weekly emissions are split across pools by
//! vote weight, the position earns its LP share of the pool's slice
//! (scaled by the vote-escrow boost), and bribes accrue per vote.

use clmm_econ_domain::sanitize::{clamp01, finite_or, non_negative};
use clmm_econ_domain::snapshot::PositionSnapshot;

/// Days per emission epoch.
const EPOCH_DAYS: f64 = 7.0;

/// Daily reward accrual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardBreakdown {
    /// Emission rewards, USD/day.
    pub emissions_usd: f64,
    /// Bribe rewards, USD/day.
    pub bribes_usd: f64,
    /// Emissions plus bribes, USD/day.
    pub total_rewards_usd: f64,
}

/// Accrues daily emissions and bribes for a snapshot.
///
/// The total vote count is floored at 1 and the boost at 1, so an empty
/// gauge or a missing boost never divides by zero or penalizes the
/// position.
pub fn accrue(snapshot: &PositionSnapshot) -> RewardBreakdown {
    let weekly_pool = non_negative(snapshot.weekly_emission_pool);
    let pool_votes = non_negative(snapshot.pool_votes);
    let total_votes = finite_or(snapshot.total_votes, 1.0).max(1.0);
    let lp_share = clamp01(snapshot.lp_share_of_pool);
    let boost = finite_or(snapshot.ve_boost, 1.0).max(1.0);
    let token_price = non_negative(snapshot.reward_token_price);
    let bribe_per_vote = non_negative(snapshot.bribe_per_vote_usd);

    let pool_emission_share = pool_votes / total_votes;
    let your_weekly_emissions = weekly_pool * pool_emission_share * lp_share * boost;
    let emissions_usd = your_weekly_emissions * token_price / EPOCH_DAYS;

    let bribes_usd = bribe_per_vote * pool_votes * lp_share / EPOCH_DAYS;

    RewardBreakdown {
        emissions_usd,
        bribes_usd,
        total_rewards_usd: emissions_usd + bribes_usd,
    }
}
