use anchor_lang::prelude::*;

use crate::internal::window::WindowError;

/// Demand signal behind the credit mint fee.
///
/// Grows by the amount of every mint and decays linearly with elapsed
/// slots, floored at zero. The decay is folded in lazily: reads compute it
/// on the fly, `record_mint` commits it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, InitSpace, AnchorSerialize, AnchorDeserialize,
)]
pub struct MintState {
    pub excess: u64,
    pub last_update_slot: u64,
}

impl MintState {
    /// Excess as of `now_slot` with decay applied. Pure read.
    pub fn current_excess(&self, now_slot: u64, decay_per_slot: u64) -> Result<u64> {
        require!(
            now_slot >= self.last_update_slot,
            WindowError::UnitRegression
        );

        let elapsed = now_slot - self.last_update_slot;
        let decay = (decay_per_slot as u128) * (elapsed as u128);
        if decay >= self.excess as u128 {
            Ok(0)
        } else {
            Ok(self.excess - decay as u64)
        }
    }

    /// Folds the decay in and records `amount` freshly minted units.
    pub fn record_mint(&mut self, amount: u64, now_slot: u64, decay_per_slot: u64) -> Result<()> {
        let current = self.current_excess(now_slot, decay_per_slot)?;
        self.excess = current
            .checked_add(amount)
            .ok_or(WindowError::MathOverflow)?;
        self.last_update_slot = now_slot;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excess_decays_linearly() {
        let state = MintState {
            excess: 1_000,
            last_update_slot: 100,
        };
        assert_eq!(state.current_excess(100, 10).unwrap(), 1_000);
        assert_eq!(state.current_excess(105, 10).unwrap(), 950);
        assert_eq!(state.current_excess(199, 10).unwrap(), 10);
    }

    #[test]
    fn test_excess_floors_at_zero() {
        let state = MintState {
            excess: 1_000,
            last_update_slot: 100,
        };
        assert_eq!(state.current_excess(200, 10).unwrap(), 0);
        assert_eq!(state.current_excess(1_000_000, 10).unwrap(), 0);
    }

    #[test]
    fn test_large_elapsed_does_not_overflow() {
        let state = MintState {
            excess: u64::MAX,
            last_update_slot: 0,
        };
        assert_eq!(state.current_excess(u64::MAX, u64::MAX).unwrap(), 0);
    }

    #[test]
    fn test_slot_regression_is_rejected() {
        let state = MintState {
            excess: 1_000,
            last_update_slot: 100,
        };
        let err = state.current_excess(99, 10).unwrap_err();
        assert_eq!(err, WindowError::UnitRegression.into());
    }

    #[test]
    fn test_record_mint_folds_decay_then_adds() {
        let mut state = MintState {
            excess: 1_000,
            last_update_slot: 100,
        };
        state.record_mint(500, 110, 10).unwrap();
        // 1_000 - 10 * 10 + 500
        assert_eq!(state.excess, 1_400);
        assert_eq!(state.last_update_slot, 110);

        // a second mint in the same slot decays nothing further
        state.record_mint(100, 110, 10).unwrap();
        assert_eq!(state.excess, 1_500);
    }
}
