use anchor_lang::prelude::*;

use crate::{
    constants::{CFG_SEED, QUOTA_SEED},
    instructions::set_config::ConfigError,
    internal::UsageWindow,
    state::{Cfg, GasQuota},
};

#[derive(Accounts)]
pub struct IssueQuota<'info> {
    /// The account that pays for quota account creation.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The guardian account authorized to issue quotas
    pub guardian: Signer<'info>,

    /// Config account; holds the id counter the new quota is addressed by
    #[account(
        mut,
        has_one = guardian @ ConfigError::UnauthorizedConfigUpdate,
        seeds = [CFG_SEED],
        bump
    )]
    pub cfg: Account<'info, Cfg>,

    /// The quota account, addressed by the next unissued id
    #[account(
        init,
        payer = payer,
        seeds = [QUOTA_SEED, cfg.next_quota_id.to_le_bytes().as_ref()],
        bump,
        space = 8 + GasQuota::INIT_SPACE
    )]
    pub quota: Account<'info, GasQuota>,

    /// System program required for creating new accounts.
    pub system_program: Program<'info, System>,
}

pub fn issue_quota_handler(
    ctx: Context<IssueQuota>,
    owner: Pubkey,
    valid_from_day: u64,
    valid_to_day: u64,
    max_per_day: u64,
) -> Result<()> {
    require!(
        valid_from_day <= valid_to_day,
        QuotaError::InvalidQuotaWindow
    );

    let cfg = &mut ctx.accounts.cfg;
    let quota = &mut ctx.accounts.quota;

    quota.id = cfg.next_quota_id;
    quota.owner = owner;
    quota.valid_from_day = valid_from_day;
    quota.valid_to_day = valid_to_day;
    quota.max_per_day = max_per_day;
    // the usage window starts zeroed, exactly once, here
    quota.window = UsageWindow::default();
    quota.bump = ctx.bumps.quota;

    cfg.next_quota_id = cfg
        .next_quota_id
        .checked_add(1)
        .ok_or(QuotaError::QuotaIdExhausted)?;

    emit!(QuotaIssued {
        id: quota.id,
        owner,
        valid_from_day,
        valid_to_day,
        max_per_day,
    });

    Ok(())
}

#[event]
pub struct QuotaIssued {
    pub id: u64,
    pub owner: Pubkey,
    pub valid_from_day: u64,
    pub valid_to_day: u64,
    pub max_per_day: u64,
}

#[error_code]
pub enum QuotaError {
    #[msg("Quota validity window start is after its end")]
    InvalidQuotaWindow = 500,
    #[msg("Quota id space exhausted")]
    QuotaIdExhausted,
}
