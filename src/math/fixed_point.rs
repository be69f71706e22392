//! # Fixed-Point Arithmetic
//!
//! Q64.64 primitives: multiply-shift, binary exponentiation, and the price
//! conversions built on them. `pow` is the kernel under the exponential fee
//! scheduler and the bin-id price derivation; its bit pattern must match
//! settlement exactly, including the reciprocal normalization of bases
//! at or above one.

use crate::constants::{BASIS_POINT_MAX, MAX_EXPONENTIAL, ONE_Q64, RESOLUTION};
use crate::errors::{CurveError, CurveResult};
use crate::math::big_int::U256;
use crate::math::safe_math::{safe_add_u128, safe_div_u128, safe_shl_u128};

// ============================================================================
// Multiply-Shift
// ============================================================================

/// `(a * b) >> shift` with a 256-bit intermediate product
pub fn mul_shr(a: u128, b: u128, shift: u32) -> CurveResult<u128> {
    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(CurveError::MathOverflow)?;
    (product >> shift).to_u128().ok_or(CurveError::MathOverflow)
}

// ============================================================================
// Exponentiation
// ============================================================================

/// Raise a Q64.64 base to an integer exponent.
///
/// Bases at or above one are replaced by their reciprocal (`u128::MAX /
/// base`) before the squaring loop and the inversion is undone at the end;
/// squaring a value below one can only shrink, which is what keeps every
/// intermediate inside 128 bits. An intermediate that underflows to zero is
/// reported as overflow, as is any exponent magnitude at or beyond
/// `MAX_EXPONENTIAL`.
pub fn pow(base: u128, exp: i32) -> CurveResult<u128> {
    let mut invert = exp.is_negative();

    if exp == 0 {
        return Ok(ONE_Q64);
    }

    let exp = exp.unsigned_abs();
    if exp >= MAX_EXPONENTIAL {
        return Err(CurveError::MathOverflow);
    }

    let mut squared_base = base;
    let mut result = ONE_Q64;

    if squared_base >= result {
        squared_base = u128::MAX
            .checked_div(squared_base)
            .ok_or(CurveError::DivisionByZero)?;
        invert = !invert;
    }

    let mut remaining = exp;
    while remaining > 0 {
        if remaining & 1 != 0 {
            result = mul_shr(result, squared_base, RESOLUTION)?;
        }
        squared_base = mul_shr(squared_base, squared_base, RESOLUTION)?;
        remaining >>= 1;
    }

    if result == 0 {
        return Err(CurveError::MathOverflow);
    }

    if invert {
        result = u128::MAX
            .checked_div(result)
            .ok_or(CurveError::DivisionByZero)?;
    }

    Ok(result)
}

// ============================================================================
// Price Conversions
// ============================================================================

/// Sqrt price for a bin id: `(1 + bin_step/10000)^bin_id` in Q64.64
pub fn sqrt_price_from_bin_id(bin_id: i32, bin_step: u16) -> CurveResult<u128> {
    let step_q64 = safe_shl_u128(bin_step as u128, RESOLUTION)?;
    let base = safe_add_u128(ONE_Q64, safe_div_u128(step_q64, BASIS_POINT_MAX as u128)?)?;
    pow(base, bin_id)
}

/// Price in Q64.64 from a Q64.64 sqrt price: `sqrt_price^2 >> 64`
pub fn price_from_sqrt_price(sqrt_price: u128) -> CurveResult<u128> {
    mul_shr(sqrt_price, sqrt_price, RESOLUTION)
}
