use anchor_lang::prelude::*;

use crate::{
    constants::{CFG_SEED, CREDITS_SEED, QUOTA_SEED},
    instructions::{set_config::ConfigError, settle::SettleError},
    internal::{revert, AllowanceMut},
    state::{Cfg, CreditBalance, GasQuota, PendingCharge},
};

#[derive(Accounts)]
pub struct RevertCharge<'info> {
    /// The guardian, reporting that the sponsored work failed to execute
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

    /// The reservation being unwound
    #[account(mut)]
    pub pending_charge: Account<'info, PendingCharge>,
}

pub fn revert_charge_handler(ctx: Context<RevertCharge>) -> Result<()> {
    let clock = Clock::get()?;
    revert(
        &mut ctx.accounts.cfg,
        AllowanceMut::Quota(&mut ctx.accounts.quota),
        &mut ctx.accounts.pending_charge,
        clock.slot,
        clock.unix_timestamp,
    )?;

    emit!(ChargeReverted {
        payer: ctx.accounts.pending_charge.payer,
        amount: ctx.accounts.pending_charge.amount,
        allowance: ctx.accounts.pending_charge.allowance,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RevertChargeCredits<'info> {
    /// The guardian, reporting that the sponsored work failed to execute
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

    /// The reservation being unwound
    #[account(mut)]
    pub pending_charge: Account<'info, PendingCharge>,
}

pub fn revert_charge_credits_handler(ctx: Context<RevertChargeCredits>) -> Result<()> {
    let clock = Clock::get()?;
    revert(
        &mut ctx.accounts.cfg,
        AllowanceMut::Credits(&mut ctx.accounts.credits),
        &mut ctx.accounts.pending_charge,
        clock.slot,
        clock.unix_timestamp,
    )?;

    emit!(ChargeReverted {
        payer: ctx.accounts.pending_charge.payer,
        amount: ctx.accounts.pending_charge.amount,
        allowance: ctx.accounts.pending_charge.allowance,
    });

    Ok(())
}

/// Emitted when a pre-charge is unwound without execution
#[event]
pub struct ChargeReverted {
    pub payer: Pubkey,
    pub amount: u64,
    pub allowance: Pubkey,
}
