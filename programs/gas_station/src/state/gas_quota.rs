use anchor_lang::prelude::*;

use crate::internal::UsageWindow;

/// A capped, day-windowed gas consumption right issued by the guardian.
///
/// The id is assigned monotonically from `Cfg::next_quota_id` and fixed at
/// issuance, as is the `[valid_from_day, valid_to_day)` validity window.
/// Quotas are never deleted; one whose window has elapsed simply stops
/// being honored by the execution engine.
#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct GasQuota {
    pub id: u64,
    /// Account entitled to spend against this quota
    pub owner: Pubkey,
    /// First day number (inclusive) the quota may be used
    pub valid_from_day: u64,
    /// Day number (exclusive) the quota stops being usable
    pub valid_to_day: u64,
    /// Maximum gas reservable per day
    pub max_per_day: u64,
    /// Usage in the current day
    pub window: UsageWindow,
    pub bump: u8,
}
