use anchor_lang::prelude::*;

use crate::{
    constants::CFG_SEED,
    state::{Cfg, GasConfig, MintFeeConfig},
};

/// Accounts struct for configuration setter instructions
/// Only the guardian can update these parameters
#[derive(Accounts)]
pub struct SetConfig<'info> {
    /// The config account holding pricing and capacity parameters
    #[account(
        mut,
        has_one = guardian @ ConfigError::UnauthorizedConfigUpdate,
        seeds = [CFG_SEED],
        bump
    )]
    pub cfg: Account<'info, Cfg>,

    /// The guardian account authorized to update configuration
    pub guardian: Signer<'info>,
}

pub fn set_config_handler(
    ctx: Context<SetConfig>,
    new_guardian: Pubkey,
    gas_config: GasConfig,
    mint_fee_config: MintFeeConfig,
) -> Result<()> {
    validate_config(&gas_config, &mint_fee_config)?;

    let cfg = &mut ctx.accounts.cfg;
    cfg.guardian = new_guardian;
    cfg.gas_config = gas_config.clone();
    cfg.mint_fee_config = mint_fee_config.clone();

    emit!(ConfigUpdated {
        guardian: new_guardian,
        gas_config,
        mint_fee_config,
    });

    Ok(())
}

/// Shared by `initialize` and `set_config`: a config that fails here is
/// rejected before any state is written.
pub fn validate_config(gas_config: &GasConfig, mint_fee_config: &MintFeeConfig) -> Result<()> {
    require!(
        gas_config.high_water_mark >= gas_config.low_water_mark,
        ConfigError::InvalidWaterMarks
    );
    require!(
        mint_fee_config.fee_update_fraction > 0,
        ConfigError::InvalidFeeUpdateFraction
    );
    Ok(())
}

/// Event for monitoring configuration changes
#[event]
pub struct ConfigUpdated {
    pub guardian: Pubkey,
    pub gas_config: GasConfig,
    pub mint_fee_config: MintFeeConfig,
}

/// Error codes for configuration updates
#[error_code]
pub enum ConfigError {
    #[msg("Unauthorized to update configuration")]
    UnauthorizedConfigUpdate = 400,
    #[msg("High water mark below low water mark")]
    InvalidWaterMarks,
    #[msg("Fee update fraction must be non-zero")]
    InvalidFeeUpdateFraction,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_gas_config() -> GasConfig {
        GasConfig {
            low_water_mark: 1_000_000,
            high_water_mark: 2_000_000,
            refund_cost_estimate: 40_000,
            block_gas_cap: 10_000_000,
            fee_receiver: Pubkey::new_unique(),
        }
    }

    fn valid_mint_fee_config() -> MintFeeConfig {
        MintFeeConfig {
            min_mint_fee: 1,
            fee_update_fraction: 1_000_000,
            target_units_per_slot: 1_000,
        }
    }

    #[test]
    fn test_watermark_order_enforced() {
        let mut gas_config = valid_gas_config();
        validate_config(&gas_config, &valid_mint_fee_config()).unwrap();

        gas_config.high_water_mark = gas_config.low_water_mark;
        validate_config(&gas_config, &valid_mint_fee_config()).unwrap();

        gas_config.high_water_mark = gas_config.low_water_mark - 1;
        let err = validate_config(&gas_config, &valid_mint_fee_config()).unwrap_err();
        assert_eq!(err, ConfigError::InvalidWaterMarks.into());
    }

    #[test]
    fn test_zero_update_fraction_rejected() {
        let mut mint_fee_config = valid_mint_fee_config();
        mint_fee_config.fee_update_fraction = 0;
        let err = validate_config(&valid_gas_config(), &mint_fee_config).unwrap_err();
        assert_eq!(err, ConfigError::InvalidFeeUpdateFraction.into());
    }
}
