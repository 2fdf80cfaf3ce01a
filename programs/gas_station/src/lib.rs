#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

mod constants;
mod instructions;
mod internal;
mod state;

use instructions::*;
use state::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod gas_station {

    use super::*;

    /// Initializes the gas station program configuration.
    /// Creates the `Cfg` PDA with guardian authority, capacity parameters
    /// and the credit mint fee curve. The global slot window, the mint
    /// state and the quota id counter start zeroed. Must be called once
    /// during deployment.
    ///
    /// # Arguments
    /// * `ctx`             - The context containing accounts for
    ///                       initialization: `payer` funds account
    ///                       creation and `cfg` PDA is created with seeds.
    /// * `guardian`        - The admin authority recorded in the config.
    /// * `gas_config`      - Capacity and settlement parameters; rejected
    ///                       if the high water mark is below the low one.
    /// * `mint_fee_config` - Credit mint fee curve parameters.
    pub fn initialize(
        ctx: Context<Initialize>,
        guardian: Pubkey,
        gas_config: GasConfig,
        mint_fee_config: MintFeeConfig,
    ) -> Result<()> {
        initialize_handler(ctx, guardian, gas_config, mint_fee_config)
    }

    /// Updates the gas station configuration.
    /// Only the recorded `guardian` may call this instruction. Replaces
    /// the guardian, gas configuration and mint fee configuration
    /// atomically after validation; the runtime counters are untouched.
    ///
    /// # Arguments
    /// * `ctx` - The context containing the `cfg` PDA and the `guardian`
    ///           signer. Authorization is enforced via an Anchor `has_one`
    ///           constraint.
    /// * `new_guardian`    - The guardian to record from now on.
    /// * `gas_config`      - The new capacity and settlement parameters.
    /// * `mint_fee_config` - The new credit mint fee curve parameters.
    pub fn set_config(
        ctx: Context<SetConfig>,
        new_guardian: Pubkey,
        gas_config: GasConfig,
        mint_fee_config: MintFeeConfig,
    ) -> Result<()> {
        set_config_handler(ctx, new_guardian, gas_config, mint_fee_config)
    }

    /// Issues a new gas quota to `owner`.
    /// Only the guardian may issue. The quota is addressed by the next
    /// unissued id from the config counter and starts with a zeroed daily
    /// usage window. Fails if the validity window is inverted.
    ///
    /// # Arguments
    /// * `ctx`            - The context with the `cfg` PDA (id counter)
    ///                      and the new `quota` PDA.
    /// * `owner`          - The account entitled to spend the quota.
    /// * `valid_from_day` - First day number (inclusive) of validity.
    /// * `valid_to_day`   - Day number (exclusive) validity ends.
    /// * `max_per_day`    - Gas reservable per day against this quota.
    pub fn issue_quota(
        ctx: Context<IssueQuota>,
        owner: Pubkey,
        valid_from_day: u64,
        valid_to_day: u64,
        max_per_day: u64,
    ) -> Result<()> {
        issue_quota_handler(ctx, owner, valid_from_day, valid_to_day, max_per_day)
    }

    /// Changes the daily limit of an issued quota.
    /// Only the guardian may reconfigure a quota; consumption never does.
    pub fn set_quota_limit(ctx: Context<SetQuotaLimit>, new_max_per_day: u64) -> Result<()> {
        set_quota_limit_handler(ctx, new_max_per_day)
    }

    /// Reserves the estimated cost of a sponsored unit of work against a
    /// quota and the global slot window, and records a `PendingCharge`
    /// to be settled once the work has run and its actual cost is known.
    /// The reservation is `required_pre_fund + post_op_cost_estimate *
    /// max_fee_per_slot`; either both counters admit it or neither is
    /// touched.
    ///
    /// # Arguments
    /// * `ctx`                   - The context including the signing
    ///                             `payer` (must own the quota), mutable
    ///                             `cfg` and `quota`, and a new
    ///                             `pending_charge` account.
    /// * `required_pre_fund`     - Gas the sponsored work itself may use.
    /// * `max_fee_per_slot`      - Highest per-slot fee the payer accepts.
    /// * `post_op_cost_estimate` - Expected settlement callback cost.
    /// * `post_op_gas_limit`     - Gas declared for the settlement
    ///                             callback; the estimate must fit in it.
    ///
    /// # Errors
    /// Returns an error if the estimate exceeds the declared limit, if
    /// either capacity check fails, or if the payer does not own the
    /// quota. A failed pre-charge commits nothing.
    pub fn pre_charge(
        ctx: Context<PreCharge>,
        required_pre_fund: u64,
        max_fee_per_slot: u64,
        post_op_cost_estimate: u64,
        post_op_gas_limit: u64,
    ) -> Result<()> {
        pre_charge_handler(
            ctx,
            required_pre_fund,
            max_fee_per_slot,
            post_op_cost_estimate,
            post_op_gas_limit,
        )
    }

    /// Same reservation as `pre_charge`, drawn from the payer's prepaid
    /// credit balance instead of a quota.
    pub fn pre_charge_with_credits(
        ctx: Context<PreChargeWithCredits>,
        required_pre_fund: u64,
        max_fee_per_slot: u64,
        post_op_cost_estimate: u64,
        post_op_gas_limit: u64,
    ) -> Result<()> {
        pre_charge_with_credits_handler(
            ctx,
            required_pre_fund,
            max_fee_per_slot,
            post_op_cost_estimate,
            post_op_gas_limit,
        )
    }

    /// Settles a pending charge against the actual cost reported by the
    /// execution engine. Only the guardian may settle. A surplus is
    /// refunded to the quota and the slot window; a deficit is clawed
    /// back with no cap check, since the work has already run. Emits
    /// `SponsorshipCompleted`. Settling the same charge twice fails.
    pub fn settle(ctx: Context<Settle>, actual_cost: u64, actual_fee_per_slot: u64) -> Result<()> {
        settle_handler(ctx, actual_cost, actual_fee_per_slot)
    }

    /// Settles a pending charge drawn from a credit balance.
    pub fn settle_credits(
        ctx: Context<SettleCredits>,
        actual_cost: u64,
        actual_fee_per_slot: u64,
    ) -> Result<()> {
        settle_credits_handler(ctx, actual_cost, actual_fee_per_slot)
    }

    /// Unwinds a pending charge whose sponsored work failed to execute,
    /// restoring exactly the amounts reserved at pre-charge time. Only
    /// the guardian may revert. Emits `ChargeReverted`.
    pub fn revert_charge(ctx: Context<RevertCharge>) -> Result<()> {
        revert_charge_handler(ctx)
    }

    /// Unwinds a pending charge drawn from a credit balance.
    pub fn revert_charge_credits(ctx: Context<RevertChargeCredits>) -> Result<()> {
        revert_charge_credits_handler(ctx)
    }

    /// Closes a settled pending charge and returns its rent to the
    /// account that funded it.
    pub fn close_pending_charge(ctx: Context<ClosePendingCharge>) -> Result<()> {
        close_pending_charge_handler(ctx)
    }

    /// Quotes the lamport fee to mint `amount` credit units at the
    /// current decayed excess. Read-only.
    pub fn quote_mint_fee(ctx: Context<QuoteMintFee>, amount: u64) -> Result<MintFeeQuote> {
        quote_mint_fee_handler(ctx, amount)
    }

    /// Mints `amount` prepaid gas credit units to `recipient`.
    /// The payer covers `fee_per_unit * amount` lamports at the current
    /// excess-driven price, transferred to the configured fee receiver;
    /// `max_payment` bounds what the payer is willing to spend and only
    /// the owed amount is taken. Recording the mint raises the excess,
    /// and with it the price of the next mint.
    ///
    /// # Errors
    /// Returns an error if `max_payment` is below the owed fee or the
    /// payer lacks sufficient lamports.
    pub fn mint_credits(
        ctx: Context<MintCredits>,
        recipient: Pubkey,
        amount: u64,
        max_payment: u64,
    ) -> Result<()> {
        mint_credits_handler(ctx, recipient, amount, max_payment)
    }
}
