use anchor_lang::prelude::*;

use crate::{
    constants::{CFG_SEED, CREDITS_SEED, QUOTA_SEED},
    internal::{pre_charge, AllowanceMut, PreChargeArgs, PreChargeOutcome},
    state::{Cfg, CreditBalance, GasQuota, PendingCharge},
};

#[derive(Accounts)]
pub struct PreCharge<'info> {
    /// The account requesting sponsorship. Pays rent for the pending
    /// charge record and must own the quota.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The config state account; mutable for the slot window update
    #[account(mut, seeds = [CFG_SEED], bump)]
    pub cfg: Account<'info, Cfg>,

    /// The quota the reservation is taken from
    #[account(mut, seeds = [QUOTA_SEED, quota.id.to_le_bytes().as_ref()], bump = quota.bump)]
    pub quota: Account<'info, GasQuota>,

    /// The reservation record consumed later by settlement
    #[account(init, payer = payer, space = 8 + PendingCharge::INIT_SPACE)]
    pub pending_charge: Account<'info, PendingCharge>,

    /// System program required for creating new accounts.
    pub system_program: Program<'info, System>,
}

pub fn pre_charge_handler(
    ctx: Context<PreCharge>,
    required_pre_fund: u64,
    max_fee_per_slot: u64,
    post_op_cost_estimate: u64,
    post_op_gas_limit: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let outcome = pre_charge(
        &mut ctx.accounts.cfg,
        AllowanceMut::Quota(&mut ctx.accounts.quota),
        ctx.accounts.payer.key(),
        &PreChargeArgs {
            required_pre_fund,
            max_fee_per_slot,
            post_op_cost_estimate,
            post_op_gas_limit,
        },
        clock.slot,
        clock.unix_timestamp,
    )?;

    record_pending(
        &mut ctx.accounts.pending_charge,
        ctx.accounts.payer.key(),
        ctx.accounts.quota.key(),
        ctx.accounts.quota.id,
        &outcome,
    );

    Ok(())
}

#[derive(Accounts)]
pub struct PreChargeWithCredits<'info> {
    /// The account requesting sponsorship. Pays rent for the pending
    /// charge record and must own the credit balance.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The config state account; mutable for the slot window update
    #[account(mut, seeds = [CFG_SEED], bump)]
    pub cfg: Account<'info, Cfg>,

    /// The payer's prepaid credit balance
    #[account(mut, seeds = [CREDITS_SEED, credits.owner.as_ref()], bump = credits.bump)]
    pub credits: Account<'info, CreditBalance>,

    /// The reservation record consumed later by settlement
    #[account(init, payer = payer, space = 8 + PendingCharge::INIT_SPACE)]
    pub pending_charge: Account<'info, PendingCharge>,

    /// System program required for creating new accounts.
    pub system_program: Program<'info, System>,
}

pub fn pre_charge_with_credits_handler(
    ctx: Context<PreChargeWithCredits>,
    required_pre_fund: u64,
    max_fee_per_slot: u64,
    post_op_cost_estimate: u64,
    post_op_gas_limit: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let outcome = pre_charge(
        &mut ctx.accounts.cfg,
        AllowanceMut::Credits(&mut ctx.accounts.credits),
        ctx.accounts.payer.key(),
        &PreChargeArgs {
            required_pre_fund,
            max_fee_per_slot,
            post_op_cost_estimate,
            post_op_gas_limit,
        },
        clock.slot,
        clock.unix_timestamp,
    )?;

    record_pending(
        &mut ctx.accounts.pending_charge,
        ctx.accounts.payer.key(),
        ctx.accounts.credits.key(),
        PendingCharge::CREDIT_CHARGE_ID,
        &outcome,
    );

    Ok(())
}

fn record_pending(
    pending: &mut PendingCharge,
    payer: Pubkey,
    allowance: Pubkey,
    quota_id: u64,
    outcome: &PreChargeOutcome,
) {
    pending.payer = payer;
    pending.original_payer = payer;
    pending.allowance = allowance;
    pending.quota_id = quota_id;
    pending.amount = outcome.amount;
    pending.valid_from = outcome.valid_from;
    pending.valid_until = outcome.valid_until;
    pending.settled = false;
}
