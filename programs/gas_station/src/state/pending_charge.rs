use anchor_lang::prelude::*;

/// In-flight reservation between pre-charge and settlement.
///
/// Created when a pre-charge commits, consumed exactly once by `settle` or
/// `revert_charge`. The record is not closed at settlement so that a replay
/// surfaces a protocol error instead of a missing account; rent is
/// reclaimed separately through `close_pending_charge`.
#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct PendingCharge {
    /// Account whose allowance was charged
    pub payer: Pubkey,
    /// Account that funded this record's rent
    pub original_payer: Pubkey,
    /// The quota or credit account the reservation was taken from
    pub allowance: Pubkey,
    /// Quota id, or `CREDIT_CHARGE_ID` for a credit-balance charge
    pub quota_id: u64,
    /// Gas reserved at pre-charge time
    pub amount: u64,
    /// Validity window start, unix seconds (inclusive)
    pub valid_from: u64,
    /// Validity window end, unix seconds (exclusive)
    pub valid_until: u64,
    /// Set once settlement or revert has consumed this charge
    pub settled: bool,
}

impl PendingCharge {
    /// `quota_id` marker for charges drawn from a credit balance.
    pub const CREDIT_CHARGE_ID: u64 = u64::MAX;
}
