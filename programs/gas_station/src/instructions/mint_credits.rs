use anchor_lang::prelude::*;

use crate::{
    constants::{CFG_SEED, CREDITS_SEED},
    internal::mint_fee,
    state::{Cfg, CreditBalance},
};

#[derive(Accounts)]
pub struct QuoteMintFee<'info> {
    /// The config state account; read-only, the quote mutates nothing
    #[account(seeds = [CFG_SEED], bump)]
    pub cfg: Account<'info, Cfg>,
}

/// Returned by `quote_mint_fee`
#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct MintFeeQuote {
    /// Lamport price of one credit unit at the current excess
    pub fee_per_unit: u64,
    /// Excess the accumulator would hold after minting the quoted amount
    pub new_excess: u64,
}

pub fn quote_mint_fee_handler(ctx: Context<QuoteMintFee>, amount: u64) -> Result<MintFeeQuote> {
    quote(&ctx.accounts.cfg, amount, Clock::get()?.slot)
}

pub(crate) fn quote(cfg: &Cfg, amount: u64, slot: u64) -> Result<MintFeeQuote> {
    let excess = cfg
        .mint_state
        .current_excess(slot, cfg.mint_fee_config.target_units_per_slot)?;
    let fee_per_unit = mint_fee(
        cfg.mint_fee_config.min_mint_fee,
        excess,
        cfg.mint_fee_config.fee_update_fraction,
    )?;
    let new_excess = excess
        .checked_add(amount)
        .ok_or(MintError::MathOverflow)?;

    Ok(MintFeeQuote {
        fee_per_unit,
        new_excess,
    })
}

#[derive(Accounts)]
#[instruction(recipient: Pubkey)]
pub struct MintCredits<'info> {
    /// The account paying for the credits
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The config state account; mutable for the mint state update
    #[account(mut, seeds = [CFG_SEED], bump)]
    pub cfg: Account<'info, Cfg>,

    /// The recipient's credit balance, created on first mint
    #[account(
        init_if_needed,
        payer = payer,
        seeds = [CREDITS_SEED, recipient.as_ref()],
        bump,
        space = 8 + CreditBalance::INIT_SPACE
    )]
    pub credits: Account<'info, CreditBalance>,

    /// The account that receives the mint payment
    /// CHECK: This account is validated to be the same as cfg.gas_config.fee_receiver
    #[account(mut, address = cfg.gas_config.fee_receiver @ MintError::IncorrectFeeReceiver)]
    pub fee_receiver: AccountInfo<'info>,

    /// System program required for the payment transfer and account
    /// initialization.
    pub system_program: Program<'info, System>,
}

pub fn mint_credits_handler(
    ctx: Context<MintCredits>,
    recipient: Pubkey,
    amount: u64,
    max_payment: u64,
) -> Result<()> {
    let slot = Clock::get()?.slot;

    let fee_quote = quote(&ctx.accounts.cfg, amount, slot)?;
    let total = (fee_quote.fee_per_unit as u128)
        .checked_mul(amount as u128)
        .ok_or(MintError::MathOverflow)?;
    let total = u64::try_from(total).map_err(|_| error!(MintError::MathOverflow))?;
    // only the owed amount is ever transferred; any excess of the payer's
    // declared budget stays with the payer
    require!(max_payment >= total, MintError::InsufficientPayment);

    let cpi_ctx = CpiContext::new(
        ctx.accounts.system_program.to_account_info(),
        anchor_lang::system_program::Transfer {
            from: ctx.accounts.payer.to_account_info(),
            to: ctx.accounts.fee_receiver.to_account_info(),
        },
    );
    anchor_lang::system_program::transfer(cpi_ctx, total)?;

    let cfg = &mut ctx.accounts.cfg;
    let target = cfg.mint_fee_config.target_units_per_slot;
    cfg.mint_state.record_mint(amount, slot, target)?;

    let credits = &mut ctx.accounts.credits;
    credits.owner = recipient;
    credits.bump = ctx.bumps.credits;
    credits.units = credits
        .units
        .checked_add(amount)
        .ok_or(MintError::MathOverflow)?;

    emit!(CreditsMinted {
        to: recipient,
        amount,
        fee_per_unit: fee_quote.fee_per_unit,
        payment: total,
    });

    Ok(())
}

/// Emitted once per credit mint
#[event]
pub struct CreditsMinted {
    pub to: Pubkey,
    pub amount: u64,
    pub fee_per_unit: u64,
    pub payment: u64,
}

#[error_code]
pub enum MintError {
    #[msg("Payment below the quoted mint fee")]
    InsufficientPayment = 800,
    #[msg("Incorrect fee receiver")]
    IncorrectFeeReceiver,
    #[msg("Math overflow")]
    MathOverflow,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::{MintState, UsageWindow};
    use crate::state::{GasConfig, MintFeeConfig};

    fn test_cfg() -> Cfg {
        Cfg {
            guardian: Pubkey::new_unique(),
            gas_config: GasConfig {
                low_water_mark: 1_000_000,
                high_water_mark: 2_000_000,
                refund_cost_estimate: 40_000,
                block_gas_cap: 10_000_000,
                fee_receiver: Pubkey::new_unique(),
            },
            mint_fee_config: MintFeeConfig {
                min_mint_fee: 1_000,
                fee_update_fraction: 1_000_000,
                target_units_per_slot: 1_000,
            },
            block_window: UsageWindow::default(),
            mint_state: MintState::default(),
            next_quota_id: 0,
        }
    }

    #[test]
    fn test_quote_at_zero_excess_is_base_fee() {
        let cfg = test_cfg();
        let fee_quote = quote(&cfg, 500, 10).unwrap();
        assert_eq!(fee_quote.fee_per_unit, 1_000);
        assert_eq!(fee_quote.new_excess, 500);
    }

    #[test]
    fn test_quote_prices_at_decayed_excess() {
        let mut cfg = test_cfg();
        cfg.mint_state = MintState {
            excess: 10_000,
            last_update_slot: 100,
        };

        // 5 slots of decay at 1_000 per slot leave 5_000 excess
        let fee_quote = quote(&cfg, 2_000, 105).unwrap();
        assert_eq!(fee_quote.new_excess, 7_000);
        // e^(5_000 / 1_000_000) barely moves a 1_000 lamport base fee
        assert!(fee_quote.fee_per_unit >= 1_000);

        // fully decayed: back to the base fee
        let fee_quote = quote(&cfg, 0, 200).unwrap();
        assert_eq!(fee_quote.fee_per_unit, 1_000);
        assert_eq!(fee_quote.new_excess, 0);
    }

    #[test]
    fn test_quote_fee_grows_with_standing_excess() {
        let mut cfg = test_cfg();
        let base = quote(&cfg, 0, 0).unwrap().fee_per_unit;

        cfg.mint_state = MintState {
            excess: 3_000_000,
            last_update_slot: 0,
        };
        let elevated = quote(&cfg, 0, 0).unwrap().fee_per_unit;
        // e^3 over the base fee
        assert!(elevated > base * 19 && elevated < base * 21);
    }
}
