use anchor_lang::prelude::*;

/// Prepaid fungible gas units redeemable by their owner.
#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct CreditBalance {
    pub owner: Pubkey,
    /// Unredeemed gas units
    pub units: u64,
    pub bump: u8,
}
