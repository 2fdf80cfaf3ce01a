use alloy_primitives::U256;
use anchor_lang::prelude::*;

/// Price of one credit unit: `min_fee * e^(excess / update_fraction)`,
/// approximated by the discrete series `sum_i x^i / i!` evaluated in
/// integer arithmetic.
///
/// The running term starts at `min_fee * update_fraction` and each step
/// multiplies by `excess` before dividing by `update_fraction * i`, so no
/// precision is lost to early division. The loop terminates once integer
/// division drives the term to zero. Intermediate products are 256-bit;
/// u128 is not wide enough for realistic lamport-scale inputs. The
/// iteration must stay term-for-term identical to the reference series so
/// that independent implementations price identically on the same inputs.
pub fn mint_fee(min_fee: u64, excess: u64, update_fraction: u64) -> Result<u64> {
    require!(update_fraction > 0, FeeCurveError::ZeroUpdateFraction);

    let numerator = U256::from(excess);
    let denominator = U256::from(update_fraction);

    let mut i = U256::from(1u64);
    let mut output = U256::ZERO;
    let mut accum = U256::from(min_fee) * denominator;

    while accum > U256::ZERO {
        output = output
            .checked_add(accum)
            .ok_or(FeeCurveError::FeeOverflow)?;

        let divisor = denominator
            .checked_mul(i)
            .ok_or(FeeCurveError::FeeOverflow)?;
        accum = accum
            .checked_mul(numerator)
            .ok_or(FeeCurveError::FeeOverflow)?
            / divisor;

        i += U256::from(1u64);
    }

    let fee = output / denominator;
    u64::try_from(fee).map_err(|_| error!(FeeCurveError::FeeOverflow))
}

#[error_code]
pub enum FeeCurveError {
    #[msg("Fee computation overflowed")]
    FeeOverflow = 300,
    #[msg("Fee update fraction must be non-zero")]
    ZeroUpdateFraction,
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_zero_excess_yields_base_fee() {
        assert_eq!(mint_fee(1, 0, 1).unwrap(), 1);
        assert_eq!(mint_fee(38, 0, 1).unwrap(), 38);
        assert_eq!(mint_fee(1_000, 0, 170_000).unwrap(), 1_000);
    }

    #[test]
    fn test_matches_reference_series() {
        // 2 * e^(5/2): terms 4, 10, 12, 10, 6, 3, 1 sum to 46, / 2 = 23
        assert_eq!(mint_fee(2, 5, 2).unwrap(), 23);
        // 1 * e^(2/1): terms 1, 2, 2, 1 sum to 6, / 1 = 6
        assert_eq!(mint_fee(1, 2, 1).unwrap(), 6);
    }

    #[test]
    fn test_tracks_exponential_growth() {
        // e^4 = 54.59..; integer truncation in every term keeps the
        // result at or below the real value
        let fee = mint_fee(1_000_000, 4_000_000, 1_000_000).unwrap();
        assert!(fee > 54_000_000 && fee < 54_600_000, "fee = {fee}");
    }

    #[test]
    fn test_zero_update_fraction_is_rejected() {
        let err = mint_fee(1, 1, 0).unwrap_err();
        assert_eq!(err, FeeCurveError::ZeroUpdateFraction.into());
    }

    #[test]
    fn test_large_exponent_overflows_cleanly() {
        let err = mint_fee(u64::MAX, u64::MAX, 1).unwrap_err();
        assert_eq!(err, FeeCurveError::FeeOverflow.into());
    }

    #[test]
    fn test_monotone_in_excess() {
        let mut previous = 0;
        for excess in (0..5_000_000).step_by(250_000) {
            let fee = mint_fee(1_000, excess, 1_000_000).unwrap();
            assert!(fee >= previous);
            previous = fee;
        }
    }

    proptest! {
        #[test]
        fn prop_fee_monotone_in_excess(
            min_fee in 1u64..=1_000_000_000,
            excess in 0u64..=10_000_000,
            update_fraction in 1_000_000u64..=1_000_000_000,
        ) {
            let lower = mint_fee(min_fee, excess, update_fraction).unwrap();
            let higher = mint_fee(min_fee, excess + 1, update_fraction).unwrap();
            prop_assert!(higher >= lower);
        }

        #[test]
        fn prop_fee_never_below_minimum(
            min_fee in 1u64..=1_000_000_000,
            excess in 0u64..=10_000_000,
            update_fraction in 1_000_000u64..=1_000_000_000,
        ) {
            let fee = mint_fee(min_fee, excess, update_fraction).unwrap();
            prop_assert!(fee >= min_fee);
        }
    }
}
