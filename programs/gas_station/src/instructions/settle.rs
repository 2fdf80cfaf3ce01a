use anchor_lang::prelude::*;

use crate::{
    constants::{CFG_SEED, CREDITS_SEED, QUOTA_SEED},
    instructions::set_config::ConfigError,
    internal::{settle, AllowanceMut},
    state::{Cfg, CreditBalance, GasQuota, PendingCharge},
};

#[derive(Accounts)]
pub struct Settle<'info> {
    /// The guardian, acting for the execution engine that ran the
    /// sponsored work
    pub guardian: Signer<'info>,

    /// The config state account; mutable for the slot window update
    #[account(
        mut,
        has_one = guardian @ ConfigError::UnauthorizedConfigUpdate,
        seeds = [CFG_SEED],
        bump
    )]
    pub cfg: Account<'info, Cfg>,

    /// The quota the pre-charge was reserved against
    #[account(
        mut,
        seeds = [QUOTA_SEED, quota.id.to_le_bytes().as_ref()],
        bump = quota.bump,
        constraint = pending_charge.allowance == quota.key() @ SettleError::AllowanceMismatch
    )]
    pub quota: Account<'info, GasQuota>,

    /// The reservation being consumed. Not closed here so that a replay
    /// surfaces a protocol error; rent is reclaimed via
    /// `close_pending_charge`.
    #[account(mut)]
    pub pending_charge: Account<'info, PendingCharge>,
}

pub fn settle_handler(
    ctx: Context<Settle>,
    actual_cost: u64,
    actual_fee_per_slot: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let actual_charge = settle(
        &mut ctx.accounts.cfg,
        AllowanceMut::Quota(&mut ctx.accounts.quota),
        &mut ctx.accounts.pending_charge,
        actual_cost,
        actual_fee_per_slot,
        clock.slot,
        clock.unix_timestamp,
    )?;

    emit!(SponsorshipCompleted {
        payer: ctx.accounts.pending_charge.payer,
        actual_charge,
        allowance: ctx.accounts.pending_charge.allowance,
        quota_id: ctx.accounts.pending_charge.quota_id,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SettleCredits<'info> {
    /// The guardian, acting for the execution engine that ran the
    /// sponsored work
    pub guardian: Signer<'info>,

    /// The config state account; mutable for the slot window update
    #[account(
        mut,
        has_one = guardian @ ConfigError::UnauthorizedConfigUpdate,
        seeds = [CFG_SEED],
        bump
    )]
    pub cfg: Account<'info, Cfg>,

    /// The credit balance the pre-charge was debited from
    #[account(
        mut,
        seeds = [CREDITS_SEED, credits.owner.as_ref()],
        bump = credits.bump,
        constraint = pending_charge.allowance == credits.key() @ SettleError::AllowanceMismatch
    )]
    pub credits: Account<'info, CreditBalance>,

    /// The reservation being consumed
    #[account(mut)]
    pub pending_charge: Account<'info, PendingCharge>,
}

pub fn settle_credits_handler(
    ctx: Context<SettleCredits>,
    actual_cost: u64,
    actual_fee_per_slot: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let actual_charge = settle(
        &mut ctx.accounts.cfg,
        AllowanceMut::Credits(&mut ctx.accounts.credits),
        &mut ctx.accounts.pending_charge,
        actual_cost,
        actual_fee_per_slot,
        clock.slot,
        clock.unix_timestamp,
    )?;

    emit!(SponsorshipCompleted {
        payer: ctx.accounts.pending_charge.payer,
        actual_charge,
        allowance: ctx.accounts.pending_charge.allowance,
        quota_id: ctx.accounts.pending_charge.quota_id,
    });

    Ok(())
}

/// Emitted once per settled sponsorship for external telemetry
#[event]
pub struct SponsorshipCompleted {
    pub payer: Pubkey,
    pub actual_charge: u64,
    pub allowance: Pubkey,
    pub quota_id: u64,
}

#[error_code]
pub enum SettleError {
    #[msg("Pending charge was reserved against a different allowance")]
    AllowanceMismatch = 600,
}
