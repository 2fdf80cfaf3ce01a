use anchor_lang::prelude::*;

use crate::{
    constants::CFG_SEED,
    instructions::set_config::validate_config,
    state::{Cfg, GasConfig, MintFeeConfig},
};

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The account that pays for the transaction and config account creation.
    /// Must be mutable to deduct lamports for account rent.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The gas station config state account.
    /// - Uses PDA with CFG_SEED for deterministic address
    /// - Holds the slot window, mint state and quota id counter
    #[account(init, payer = payer, seeds = [CFG_SEED], bump, space = 8 + Cfg::INIT_SPACE)]
    pub cfg: Account<'info, Cfg>,

    /// System program required for creating new accounts.
    /// Used internally by Anchor for account initialization.
    pub system_program: Program<'info, System>,
}

pub fn initialize_handler(
    ctx: Context<Initialize>,
    guardian: Pubkey,
    gas_config: GasConfig,
    mint_fee_config: MintFeeConfig,
) -> Result<()> {
    validate_config(&gas_config, &mint_fee_config)?;

    let cfg = &mut ctx.accounts.cfg;
    cfg.guardian = guardian;
    cfg.gas_config = gas_config;
    cfg.mint_fee_config = mint_fee_config;
    // the slot window, mint state and quota id counter start zeroed
    Ok(())
}
