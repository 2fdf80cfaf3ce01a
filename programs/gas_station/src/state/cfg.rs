use anchor_lang::prelude::*;

use crate::internal::{MintState, UsageWindow};

#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct Cfg {
    /// Authority for issuance, settlement and reconfiguration
    pub guardian: Pubkey,
    pub gas_config: GasConfig,
    pub mint_fee_config: MintFeeConfig,
    /// Aggregate gas reserved in the current slot (runtime state)
    pub block_window: UsageWindow,
    /// Credit mint demand signal (runtime state)
    pub mint_state: MintState,
    /// Id assigned to the next issued quota
    pub next_quota_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, InitSpace, AnchorSerialize, AnchorDeserialize)]
pub struct GasConfig {
    /// Sponsor deposit level below which the off-chain funder tops up
    pub low_water_mark: u64,
    /// Sponsor deposit level the funder refills to
    pub high_water_mark: u64,
    /// Gas the settlement callback itself is expected to consume
    pub refund_cost_estimate: u64,
    /// Maximum gas reservable per slot across all payers
    pub block_gas_cap: u64,
    /// Account that receives credit mint payments
    pub fee_receiver: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq, InitSpace, AnchorSerialize, AnchorDeserialize)]
pub struct MintFeeConfig {
    /// Floor price of one gas credit unit, in lamports
    pub min_mint_fee: u64,
    /// Fee curve steepness denominator
    pub fee_update_fraction: u64,
    /// Excess decay per slot (the targeted issuance rate)
    pub target_units_per_slot: u64,
}
