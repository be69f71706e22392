//! Big integer operations for high-precision math
//!
//! This module provides the 256/512-bit intermediates and the mul_div
//! kernels the delta formulas are built on. Widening happens before every
//! multiply-before-divide step so nothing truncates ahead of the division.

use uint::construct_uint;

use crate::errors::{CurveError, CurveResult};

construct_uint! {
    /// 256-bit unsigned integer for intermediate calculations
    pub struct U256(4);
}

construct_uint! {
    /// 512-bit unsigned integer backing `mul_div_u256`
    pub struct U512(8);
}

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round up (away from zero)
    Up,
    /// Round down (towards zero)
    Down,
}

impl U256 {
    /// Convert to u128, returning None if the high words are set
    pub fn to_u128(self) -> Option<u128> {
        if self.0[2] != 0 || self.0[3] != 0 {
            return None;
        }
        Some(((self.0[1] as u128) << 64) | self.0[0] as u128)
    }

    /// Convert to u64, returning None if anything above the low word is set
    pub fn to_u64(self) -> Option<u64> {
        if self.0[1] != 0 || self.0[2] != 0 || self.0[3] != 0 {
            return None;
        }
        Some(self.0[0])
    }

    /// Widen to 512 bits
    pub fn to_u512(self) -> U512 {
        let mut words = [0u64; 8];
        words[..4].copy_from_slice(&self.0);
        U512(words)
    }
}

impl U512 {
    /// Narrow to 256 bits, returning None if the high words are set
    pub fn to_u256(self) -> Option<U256> {
        if self.0[4..].iter().any(|&word| word != 0) {
            return None;
        }
        let mut words = [0u64; 4];
        words.copy_from_slice(&self.0[..4]);
        Some(U256(words))
    }
}

/// Multiply two values and divide by a third with explicit rounding:
/// `result = (a * b) / denominator`
///
/// The product is taken in 512 bits, so no `a * b` a caller can form from
/// in-range prices and liquidity can truncate before the division.
pub fn mul_div_u256(a: U256, b: U256, denominator: U256, rounding: Rounding) -> CurveResult<U256> {
    if denominator.is_zero() {
        return Err(CurveError::DivisionByZero);
    }

    let product = a
        .to_u512()
        .checked_mul(b.to_u512())
        .ok_or(CurveError::MathOverflow)?;
    let (quotient, remainder) = product.div_mod(denominator.to_u512());

    let result = if rounding == Rounding::Up && !remainder.is_zero() {
        quotient
            .checked_add(U512::one())
            .ok_or(CurveError::MathOverflow)?
    } else {
        quotient
    };

    result.to_u256().ok_or(CurveError::MathOverflow)
}

/// `(a * b) / denominator` over u64 operands with a u128 intermediate
pub fn mul_div_u64(a: u64, b: u64, denominator: u64, rounding: Rounding) -> CurveResult<u64> {
    if denominator == 0 {
        return Err(CurveError::DivisionByZero);
    }

    let product = (a as u128) * (b as u128);
    let denominator = denominator as u128;
    let (quotient, remainder) = (product / denominator, product % denominator);

    let result = if rounding == Rounding::Up && remainder != 0 {
        quotient + 1
    } else {
        quotient
    };

    if result > u64::MAX as u128 {
        return Err(CurveError::MathOverflow);
    }
    Ok(result as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowing_conversions() {
        assert_eq!(U256::from(u128::MAX).to_u128(), Some(u128::MAX));
        assert_eq!((U256::from(u128::MAX) + U256::one()).to_u128(), None);

        assert_eq!(U256::from(u64::MAX).to_u64(), Some(u64::MAX));
        assert_eq!((U256::from(u64::MAX) + U256::one()).to_u64(), None);

        let wide = U256::from(u128::MAX).to_u512() * U512::from(2u64);
        assert_eq!(wide.to_u256().and_then(U256::to_u128), None);
        assert!(wide.to_u256().is_some());
    }

    #[test]
    fn test_mul_div_rounding() {
        let seven = U256::from(7u64);
        let three = U256::from(3u64);
        let two = U256::from(2u64);

        let down = mul_div_u256(seven, three, two, Rounding::Down).unwrap();
        let up = mul_div_u256(seven, three, two, Rounding::Up).unwrap();
        assert_eq!(down, U256::from(10u64));
        assert_eq!(up, U256::from(11u64));

        // Exact division rounds identically in both directions
        let exact_down = mul_div_u256(seven, two, two, Rounding::Down).unwrap();
        let exact_up = mul_div_u256(seven, two, two, Rounding::Up).unwrap();
        assert_eq!(exact_down, exact_up);
    }

    #[test]
    fn test_mul_div_zero_denominator() {
        let err = mul_div_u256(U256::one(), U256::one(), U256::zero(), Rounding::Down);
        assert_eq!(err, Err(CurveError::DivisionByZero));
        assert_eq!(
            mul_div_u64(1, 1, 0, Rounding::Down),
            Err(CurveError::DivisionByZero)
        );
    }

    #[test]
    fn test_mul_div_full_width_product() {
        // u128::MAX * u128::MAX overflows 256 bits only in the product,
        // not after division; the U512 intermediate must carry it
        let max = U256::from(u128::MAX);
        let result = mul_div_u256(max, max, max, Rounding::Down).unwrap();
        assert_eq!(result, max);
    }

    #[test]
    fn test_mul_div_u64_bounds() {
        assert_eq!(mul_div_u64(10, 3, 4, Rounding::Down), Ok(7));
        assert_eq!(mul_div_u64(10, 3, 4, Rounding::Up), Ok(8));
        // Result exceeding u64 is an overflow, not a wrap
        assert_eq!(
            mul_div_u64(u64::MAX, u64::MAX, 1, Rounding::Down),
            Err(CurveError::MathOverflow)
        );
    }
}
