//! # Liquidity Range Math
//!
//! Delta-amount formulas over a sqrt-price range at constant liquidity, and
//! the next-sqrt-price formulas for an exact input. Rounding direction is
//! part of the contract at every call site: amounts the trader must supply
//! round up, amounts the trader receives round down.

use crate::constants::RESOLUTION;
use crate::errors::{CurveError, CurveResult};
use crate::math::big_int::{mul_div_u256, Rounding, U256};
use crate::math::safe_math::safe_sub_u128;

// ============================================================================
// Delta Amounts
// ============================================================================

/// Base-token amount between two sqrt prices, full 256-bit result:
/// `liquidity * (upper - lower) / (upper * lower)`
pub fn get_delta_amount_base_unsigned_256(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    round: Rounding,
) -> CurveResult<U256> {
    if liquidity == 0 {
        return Err(CurveError::MathOverflow);
    }
    if lower_sqrt_price >= upper_sqrt_price {
        return Err(CurveError::InvalidPrice);
    }

    let numerator_1 = U256::from(liquidity);
    let numerator_2 = U256::from(safe_sub_u128(upper_sqrt_price, lower_sqrt_price)?);
    let denominator = U256::from(lower_sqrt_price)
        .checked_mul(U256::from(upper_sqrt_price))
        .ok_or(CurveError::MathOverflow)?;

    mul_div_u256(numerator_1, numerator_2, denominator, round)
}

/// Base-token amount between two sqrt prices, checked into u64
pub fn get_delta_amount_base_unsigned(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    round: Rounding,
) -> CurveResult<u64> {
    get_delta_amount_base_unsigned_256(lower_sqrt_price, upper_sqrt_price, liquidity, round)?
        .to_u64()
        .ok_or(CurveError::MathOverflow)
}

/// Quote-token amount between two sqrt prices, full 256-bit result:
/// `liquidity * (upper - lower) / 2^128`
pub fn get_delta_amount_quote_unsigned_256(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    round: Rounding,
) -> CurveResult<U256> {
    if liquidity == 0 {
        return Err(CurveError::MathOverflow);
    }
    if lower_sqrt_price >= upper_sqrt_price {
        return Err(CurveError::InvalidPrice);
    }

    let delta_sqrt_price = safe_sub_u128(upper_sqrt_price, lower_sqrt_price)?;
    let product = U256::from(liquidity)
        .checked_mul(U256::from(delta_sqrt_price))
        .ok_or(CurveError::MathOverflow)?;

    match round {
        Rounding::Up => {
            let denominator = U256::one() << (RESOLUTION * 2);
            let (quotient, remainder) = product.div_mod(denominator);
            if remainder.is_zero() {
                Ok(quotient)
            } else {
                quotient
                    .checked_add(U256::one())
                    .ok_or(CurveError::MathOverflow)
            }
        }
        Rounding::Down => Ok(product >> (RESOLUTION * 2)),
    }
}

/// Quote-token amount between two sqrt prices, checked into u64
pub fn get_delta_amount_quote_unsigned(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    round: Rounding,
) -> CurveResult<u64> {
    get_delta_amount_quote_unsigned_256(lower_sqrt_price, upper_sqrt_price, liquidity, round)?
        .to_u64()
        .ok_or(CurveError::MathOverflow)
}

// ============================================================================
// Next Sqrt Price
// ============================================================================

/// New sqrt price after consuming an exact input amount.
///
/// Base input decreases the price, quote input increases it; both formulas
/// round in the pool's favor (base: result up, quote: offset down).
pub fn get_next_sqrt_price_from_input(
    sqrt_price: u128,
    liquidity: u128,
    amount_in: u64,
    base_for_quote: bool,
) -> CurveResult<u128> {
    if base_for_quote {
        get_next_sqrt_price_from_amount_base_rounding_up(sqrt_price, liquidity, amount_in)
    } else {
        get_next_sqrt_price_from_amount_quote_rounding_down(sqrt_price, liquidity, amount_in)
    }
}

/// `liquidity * sqrt_price / (liquidity + amount * sqrt_price)`, rounded up
fn get_next_sqrt_price_from_amount_base_rounding_up(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
) -> CurveResult<u128> {
    if amount == 0 {
        return Ok(sqrt_price);
    }

    let sqrt_price_u256 = U256::from(sqrt_price);
    let liquidity_u256 = U256::from(liquidity);

    let product = U256::from(amount)
        .checked_mul(sqrt_price_u256)
        .ok_or(CurveError::MathOverflow)?;
    let denominator = liquidity_u256
        .checked_add(product)
        .ok_or(CurveError::MathOverflow)?;

    mul_div_u256(liquidity_u256, sqrt_price_u256, denominator, Rounding::Up)?
        .to_u128()
        .ok_or(CurveError::MathOverflow)
}

/// `sqrt_price + (amount << 128) / liquidity`, offset truncated
fn get_next_sqrt_price_from_amount_quote_rounding_down(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
) -> CurveResult<u128> {
    let quotient = (U256::from(amount) << (RESOLUTION * 2))
        .checked_div(U256::from(liquidity))
        .ok_or(CurveError::DivisionByZero)?;

    U256::from(sqrt_price)
        .checked_add(quotient)
        .ok_or(CurveError::MathOverflow)?
        .to_u128()
        .ok_or(CurveError::MathOverflow)
}
