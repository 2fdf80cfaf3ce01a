use anchor_lang::prelude::*;

/// Fixed-window usage counter with lazy rollover.
///
/// One instance tracks aggregate reservations per slot, one per quota
/// tracks reservations per day. The unit is caller-supplied; the counter
/// only requires it to be non-decreasing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, InitSpace, AnchorSerialize, AnchorDeserialize,
)]
pub struct UsageWindow {
    /// Unit (slot or day number) the usage belongs to
    pub unit: u64,
    /// Usage recorded within `unit`
    pub used: u64,
}

impl UsageWindow {
    /// Returns the window as it stands at `current_unit` without committing
    /// the rollover. A unit below the stored one indicates caller misuse or
    /// clock regression and is rejected, never silently accepted.
    pub fn rolled(&self, current_unit: u64) -> Result<UsageWindow> {
        require!(current_unit >= self.unit, WindowError::UnitRegression);

        if current_unit > self.unit {
            Ok(UsageWindow {
                unit: current_unit,
                used: 0,
            })
        } else {
            Ok(*self)
        }
    }

    /// Adds `amount` if the cap allows it and reports whether the increment
    /// was applied. The counter is untouched when it was not.
    pub fn try_increment(&mut self, amount: u64, cap: u64) -> Result<bool> {
        let next = self
            .used
            .checked_add(amount)
            .ok_or(WindowError::MathOverflow)?;

        if next < cap {
            self.used = next;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Adds `amount` with no cap check. Settlement claw-back only.
    pub fn force_increment(&mut self, amount: u64) -> Result<()> {
        self.used = self
            .used
            .checked_add(amount)
            .ok_or(WindowError::MathOverflow)?;
        Ok(())
    }

    /// Subtracts `amount`. Underflow means the caller refunded usage the
    /// window never recorded; that is an invariant violation, not a wrap.
    pub fn decrement(&mut self, amount: u64) -> Result<()> {
        self.used = self
            .used
            .checked_sub(amount)
            .ok_or(WindowError::UsageUnderflow)?;
        Ok(())
    }
}

#[error_code]
pub enum WindowError {
    #[msg("Window unit regressed")]
    UnitRegression = 100,
    #[msg("Usage counter underflow")]
    UsageUnderflow,
    #[msg("Math overflow")]
    MathOverflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolled_same_unit_keeps_usage() {
        let window = UsageWindow { unit: 7, used: 42 };
        assert_eq!(window.rolled(7).unwrap(), window);
    }

    #[test]
    fn test_rolled_newer_unit_resets_usage() {
        let window = UsageWindow { unit: 7, used: 42 };
        assert_eq!(
            window.rolled(9).unwrap(),
            UsageWindow { unit: 9, used: 0 }
        );
        // the original is untouched until the caller commits
        assert_eq!(window, UsageWindow { unit: 7, used: 42 });
    }

    #[test]
    fn test_rolled_older_unit_is_rejected() {
        let window = UsageWindow { unit: 7, used: 42 };
        let err = window.rolled(6).unwrap_err();
        assert_eq!(err, WindowError::UnitRegression.into());
    }

    #[test]
    fn test_try_increment_below_cap() {
        let mut window = UsageWindow { unit: 0, used: 100 };
        assert!(window.try_increment(50, 1_000).unwrap());
        assert_eq!(window.used, 150);
    }

    #[test]
    fn test_try_increment_cap_is_strict() {
        // reaching the cap exactly is already a rejection
        let mut window = UsageWindow { unit: 0, used: 0 };
        assert!(!window.try_increment(1_000, 1_000).unwrap());
        assert_eq!(window.used, 0);

        assert!(window.try_increment(999, 1_000).unwrap());
        assert_eq!(window.used, 999);
    }

    #[test]
    fn test_try_increment_rejection_leaves_usage() {
        let mut window = UsageWindow { unit: 0, used: 500_000 };
        assert!(!window.try_increment(600_000, 1_000_000).unwrap());
        assert_eq!(window.used, 500_000);
    }

    #[test]
    fn test_try_increment_overflow() {
        let mut window = UsageWindow {
            unit: 0,
            used: u64::MAX - 1,
        };
        let err = window.try_increment(2, u64::MAX).unwrap_err();
        assert_eq!(err, WindowError::MathOverflow.into());
    }

    #[test]
    fn test_force_increment_ignores_cap() {
        let mut window = UsageWindow { unit: 0, used: 900 };
        window.force_increment(500).unwrap();
        assert_eq!(window.used, 1_400);
    }

    #[test]
    fn test_decrement_underflow_is_fatal() {
        let mut window = UsageWindow { unit: 0, used: 10 };
        let err = window.decrement(11).unwrap_err();
        assert_eq!(err, WindowError::UsageUnderflow.into());

        window.decrement(10).unwrap();
        assert_eq!(window.used, 0);
    }
}
