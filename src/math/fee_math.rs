//! # Fee Decay Math
//!
//! The exponential fee-scheduler kernel: a cliff fee numerator multiplied by
//! `(1 - reduction_factor/10000)^period`, evaluated in Q64.64.

use crate::constants::{BASIS_POINT_MAX, ONE_Q64, RESOLUTION};
use crate::errors::{CurveError, CurveResult};
use crate::math::big_int::U256;
use crate::math::fixed_point::pow;
use crate::math::safe_math::{safe_div_u128, safe_shl_u128, safe_sub_u128};

/// Fee numerator after `period` exponential decay steps
pub fn get_fee_in_period(
    cliff_fee_numerator: u64,
    reduction_factor: u64,
    period: u64,
) -> CurveResult<u64> {
    let bps = safe_div_u128(
        safe_shl_u128(reduction_factor as u128, RESOLUTION)?,
        BASIS_POINT_MAX as u128,
    )?;
    let base = safe_sub_u128(ONE_Q64, bps)?;

    let exponent = i32::try_from(period).map_err(|_| CurveError::MathOverflow)?;
    let multiplier = pow(base, exponent)?;

    // cliff * multiplier can exceed 128 bits before the shift
    let fee = U256::from(cliff_fee_numerator)
        .checked_mul(U256::from(multiplier))
        .ok_or(CurveError::MathOverflow)?
        >> RESOLUTION;
    fee.to_u64().ok_or(CurveError::MathOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_reduction_keeps_cliff() {
        assert_eq!(get_fee_in_period(1000, 0, 1), Ok(1000));
        assert_eq!(get_fee_in_period(1000, 0, 1000), Ok(1000));
    }

    #[test]
    fn test_zero_period_keeps_cliff() {
        assert_eq!(get_fee_in_period(1000, 100, 0), Ok(1000));
    }

    #[test]
    fn test_one_percent_reduction() {
        // One period of 100 bps: 1000 * 0.99 = 990
        let fee = get_fee_in_period(1000, 100, 1).unwrap();
        assert_eq!(fee, 990);
        assert!(fee > 989 && fee < 991);
    }

    #[test]
    fn test_decay_is_monotonic_in_period() {
        let mut previous = u64::MAX;
        for period in [0u64, 1, 2, 5, 10, 50, 200] {
            let fee = get_fee_in_period(1_000_000, 250, period).unwrap();
            assert!(fee <= previous);
            previous = fee;
        }
    }

    #[test]
    fn test_reduction_above_denominator_fails() {
        // 10001 bps would make the decay base negative
        assert_eq!(
            get_fee_in_period(1000, BASIS_POINT_MAX + 1, 1),
            Err(CurveError::MathOverflow)
        );
    }

    #[test]
    fn test_period_beyond_i32_fails() {
        assert_eq!(
            get_fee_in_period(1000, 100, u64::MAX),
            Err(CurveError::MathOverflow)
        );
    }
}
