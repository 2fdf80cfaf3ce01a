use anchor_lang::prelude::*;

use crate::state::PendingCharge;

#[derive(Accounts)]
pub struct ClosePendingCharge<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Recipient of the reclaimed rent
    /// CHECK: This account is validated against the recorded original payer
    #[account(mut)]
    pub original_payer: AccountInfo<'info>,

    #[account(
        mut,
        close = original_payer,
        constraint = pending_charge.original_payer == original_payer.key() @ ClosePendingChargeError::IncorrectOriginalPayer,
        constraint = pending_charge.settled @ ClosePendingChargeError::ChargeNotSettled
    )]
    pub pending_charge: Account<'info, PendingCharge>,
}

pub fn close_pending_charge_handler(_ctx: Context<ClosePendingCharge>) -> Result<()> {
    Ok(())
}

#[error_code]
pub enum ClosePendingChargeError {
    #[msg("Incorrect original payer")]
    IncorrectOriginalPayer = 700,
    #[msg("Pending charge has not been settled yet")]
    ChargeNotSettled,
}
