use anchor_lang::prelude::*;

use crate::{
    constants::{CFG_SEED, QUOTA_SEED},
    instructions::set_config::ConfigError,
    state::{Cfg, GasQuota},
};

#[derive(Accounts)]
pub struct SetQuotaLimit<'info> {
    #[account(
        has_one = guardian @ ConfigError::UnauthorizedConfigUpdate,
        seeds = [CFG_SEED],
        bump
    )]
    pub cfg: Account<'info, Cfg>,

    /// The guardian account authorized to reconfigure quotas
    pub guardian: Signer<'info>,

    #[account(mut, seeds = [QUOTA_SEED, quota.id.to_le_bytes().as_ref()], bump = quota.bump)]
    pub quota: Account<'info, GasQuota>,
}

pub fn set_quota_limit_handler(ctx: Context<SetQuotaLimit>, new_max_per_day: u64) -> Result<()> {
    let quota = &mut ctx.accounts.quota;
    let old_max_per_day = quota.max_per_day;
    quota.max_per_day = new_max_per_day;

    emit!(QuotaLimitUpdated {
        id: quota.id,
        old_max_per_day,
        new_max_per_day,
    });

    Ok(())
}

#[event]
pub struct QuotaLimitUpdated {
    pub id: u64,
    pub old_max_per_day: u64,
    pub new_max_per_day: u64,
}
