use anchor_lang::prelude::*;

use crate::{
    constants::SECONDS_PER_DAY,
    internal::window::UsageWindow,
    state::{Cfg, CreditBalance, GasQuota, PendingCharge},
};

/// The allowance a charge draws from: a guardian-issued daily quota or a
/// prepaid credit balance. One engine serves both; only the reservation
/// and reconciliation of the allowance side differ.
pub enum AllowanceMut<'a> {
    Quota(&'a mut GasQuota),
    Credits(&'a mut CreditBalance),
}

pub struct PreChargeArgs {
    /// Gas the sponsored work itself may consume
    pub required_pre_fund: u64,
    /// Highest per-slot fee the payer accepts
    pub max_fee_per_slot: u64,
    /// Expected gas cost of the settlement callback
    pub post_op_cost_estimate: u64,
    /// Gas the payer declared for the settlement callback
    pub post_op_gas_limit: u64,
}

#[derive(Debug)]
pub struct PreChargeOutcome {
    /// Amount reserved against both counters
    pub amount: u64,
    /// Validity window start, unix seconds (inclusive)
    pub valid_from: u64,
    /// Validity window end, unix seconds (exclusive)
    pub valid_until: u64,
}

/// Reserves the estimated cost of a sponsored unit of work against the
/// global slot window and the payer's allowance.
///
/// Every check runs against rolled copies before anything is committed:
/// a rejection leaves both counters bit-identical, including the lazy
/// rollover itself.
pub fn pre_charge(
    cfg: &mut Cfg,
    allowance: AllowanceMut,
    payer: Pubkey,
    args: &PreChargeArgs,
    current_slot: u64,
    now: i64,
) -> Result<PreChargeOutcome> {
    require!(
        args.post_op_cost_estimate < args.post_op_gas_limit,
        ChargeError::PostOpEstimateTooHigh
    );

    let amount = charge_amount(
        args.required_pre_fund,
        args.post_op_cost_estimate,
        args.max_fee_per_slot,
    )?;

    let mut block_window = cfg.block_window.rolled(current_slot)?;
    require!(
        block_window.try_increment(amount, cfg.gas_config.block_gas_cap)?,
        ChargeError::BlockCapacityExceeded
    );

    match allowance {
        AllowanceMut::Quota(quota) => {
            let mut window = quota.window.rolled(day_number(now))?;
            require!(
                window.try_increment(amount, quota.max_per_day)?,
                ChargeError::QuotaCapacityExceeded
            );
            require_keys_eq!(payer, quota.owner, ChargeError::UnauthorizedPayer);

            let valid_from = quota
                .valid_from_day
                .checked_mul(SECONDS_PER_DAY)
                .ok_or(ChargeError::MathOverflow)?;
            let valid_until = quota
                .valid_to_day
                .checked_mul(SECONDS_PER_DAY)
                .ok_or(ChargeError::MathOverflow)?;

            cfg.block_window = block_window;
            quota.window = window;

            Ok(PreChargeOutcome {
                amount,
                valid_from,
                valid_until,
            })
        }
        AllowanceMut::Credits(credits) => {
            require!(credits.units >= amount, ChargeError::InsufficientCredits);
            require_keys_eq!(payer, credits.owner, ChargeError::UnauthorizedPayer);

            cfg.block_window = block_window;
            credits.units -= amount;

            Ok(PreChargeOutcome {
                amount,
                valid_from: 0,
                valid_until: u64::MAX,
            })
        }
    }
}

/// Reconciles a pre-charge against the actual cost reported by the
/// execution engine and consumes the pending charge.
///
/// A surplus is refunded to both counters; a deficit is clawed back with
/// no cap check, because the sponsored work has already run — a transient
/// overshoot is recorded rather than rejected, and settlement never fails
/// outward except on replay.
pub fn settle(
    cfg: &mut Cfg,
    allowance: AllowanceMut,
    pending: &mut PendingCharge,
    actual_cost: u64,
    actual_fee_per_slot: u64,
    current_slot: u64,
    now: i64,
) -> Result<u64> {
    require!(!pending.settled, ChargeError::AlreadySettled);

    let actual_charge = charge_amount(
        actual_cost,
        cfg.gas_config.refund_cost_estimate,
        actual_fee_per_slot,
    )?;

    let mut block_window = cfg.block_window.rolled(current_slot)?;

    if pending.amount > actual_charge {
        let surplus = pending.amount - actual_charge;
        refund(&mut block_window, allowance, surplus, now)?;
    } else if pending.amount < actual_charge {
        let deficit = actual_charge - pending.amount;
        block_window.force_increment(deficit)?;
        match allowance {
            AllowanceMut::Quota(quota) => {
                let mut window = quota.window.rolled(day_number(now))?;
                window.force_increment(deficit)?;
                quota.window = window;
            }
            AllowanceMut::Credits(credits) => {
                // the balance cannot go negative; the shortfall is the
                // sponsor's loss, recorded via the emitted actual charge
                credits.units = credits.units.saturating_sub(deficit);
            }
        }
    }

    cfg.block_window = block_window;
    pending.settled = true;

    Ok(actual_charge)
}

/// Unwinds a pre-charge whose external execution failed: the inverse of
/// the increments made at pre-charge time, and the charge's terminal
/// state.
pub fn revert(
    cfg: &mut Cfg,
    allowance: AllowanceMut,
    pending: &mut PendingCharge,
    current_slot: u64,
    now: i64,
) -> Result<()> {
    require!(!pending.settled, ChargeError::AlreadySettled);

    let mut block_window = cfg.block_window.rolled(current_slot)?;
    refund(&mut block_window, allowance, pending.amount, now)?;

    cfg.block_window = block_window;
    pending.settled = true;

    Ok(())
}

/// Returns `amount` of reserved gas to the block window and the
/// allowance. Usage recorded in a window that has since rolled over is
/// already forgotten, so the window refunds are clamped to what the live
/// window still holds; the fatal-underflow contract of the counter is
/// never tripped by a protocol-legal sequence.
fn refund(
    block_window: &mut UsageWindow,
    allowance: AllowanceMut,
    amount: u64,
    now: i64,
) -> Result<()> {
    block_window.decrement(amount.min(block_window.used))?;

    match allowance {
        AllowanceMut::Quota(quota) => {
            let mut window = quota.window.rolled(day_number(now))?;
            window.decrement(amount.min(window.used))?;
            quota.window = window;
        }
        AllowanceMut::Credits(credits) => {
            credits.units = credits
                .units
                .checked_add(amount)
                .ok_or(ChargeError::MathOverflow)?;
        }
    }

    Ok(())
}

/// `base + gas * fee_per_slot`, widened through u128 so the product
/// cannot wrap before the range check.
fn charge_amount(base: u64, gas: u64, fee_per_slot: u64) -> Result<u64> {
    let scaled = (gas as u128)
        .checked_mul(fee_per_slot as u128)
        .ok_or(ChargeError::MathOverflow)?;
    let total = (base as u128)
        .checked_add(scaled)
        .ok_or(ChargeError::MathOverflow)?;
    u64::try_from(total).map_err(|_| error!(ChargeError::MathOverflow))
}

/// Whole days since the unix epoch. The runtime clock never reports a
/// pre-epoch time.
pub fn day_number(unix_timestamp: i64) -> u64 {
    (unix_timestamp as u64) / SECONDS_PER_DAY
}

#[error_code]
pub enum ChargeError {
    #[msg("Post-op cost estimate exceeds the declared post-op gas limit")]
    PostOpEstimateTooHigh = 200,
    #[msg("Slot gas capacity exceeded")]
    BlockCapacityExceeded,
    #[msg("Daily quota capacity exceeded")]
    QuotaCapacityExceeded,
    #[msg("Insufficient prepaid credits")]
    InsufficientCredits,
    #[msg("Payer does not own this allowance")]
    UnauthorizedPayer,
    #[msg("Pending charge already settled")]
    AlreadySettled,
    #[msg("Math overflow")]
    MathOverflow,
}
