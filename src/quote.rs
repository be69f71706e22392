//! # Swap Quoting
//!
//! Exact-input swap quotes over the piecewise liquidity curve. The traversal
//! walks segments in the trade direction, consuming input against each
//! segment's capacity until the input is spent, then the orchestrator applies
//! fees on whichever side the fee mode selects.
//!
//! Everything here is a pure function of the snapshot arguments. Amounts and
//! prices are computed with the same fixed-point operations and rounding as
//! settlement, so a quote against a fresh snapshot is exact, not an estimate.

use crate::errors::{CurveError, CurveResult};
use crate::math::big_int::{Rounding, U256};
use crate::math::fixed_point::price_from_sqrt_price;
use crate::math::liquidity_math::{
    get_delta_amount_base_unsigned, get_delta_amount_base_unsigned_256,
    get_delta_amount_quote_unsigned, get_delta_amount_quote_unsigned_256,
    get_next_sqrt_price_from_input,
};
use crate::math::safe_math::{safe_add_u64, safe_sub_u64};
use crate::types::{FeeMode, FeeOnAmount, PoolConfig, PoolState, TradeDirection};

// ============================================================================
// Curve Traversal
// ============================================================================

/// Raw traversal outcome, before any fee is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapAmount {
    /// Gross output produced by the curve
    pub output_amount: u64,
    /// Sqrt price after the input is consumed, Q64.64
    pub next_sqrt_price: u128,
}

/// Consume base input against the curve, producing quote output.
///
/// Walks segments from the top of the curve downward. Input left after the
/// lowest bound is applied against the first segment's liquidity with no
/// further bound, so a base-side swap can always be filled.
pub fn get_swap_amount_from_base_to_quote(
    config: &PoolConfig,
    current_sqrt_price: u128,
    amount_in: u64,
) -> CurveResult<SwapAmount> {
    let mut total_output_amount = 0u64;
    let mut sqrt_price = current_sqrt_price;
    let mut amount_left = amount_in;

    for i in (0..config.curve.len().saturating_sub(1)).rev() {
        if amount_left == 0 {
            break;
        }
        if config.curve[i].sqrt_price_bound < sqrt_price {
            // Segment i+1 spans from bound i up to bound i+1
            let liquidity = config.curve[i + 1].liquidity;
            let max_amount_in = get_delta_amount_base_unsigned_256(
                config.curve[i].sqrt_price_bound,
                sqrt_price,
                liquidity,
                Rounding::Up,
            )?;

            if U256::from(amount_left) < max_amount_in {
                let next_sqrt_price =
                    get_next_sqrt_price_from_input(sqrt_price, liquidity, amount_left, true)?;
                let output_amount = get_delta_amount_quote_unsigned(
                    next_sqrt_price,
                    sqrt_price,
                    liquidity,
                    Rounding::Down,
                )?;
                total_output_amount = safe_add_u64(total_output_amount, output_amount)?;
                sqrt_price = next_sqrt_price;
                amount_left = 0;
                break;
            } else {
                let next_sqrt_price = config.curve[i].sqrt_price_bound;
                let output_amount = get_delta_amount_quote_unsigned(
                    next_sqrt_price,
                    sqrt_price,
                    liquidity,
                    Rounding::Down,
                )?;
                total_output_amount = safe_add_u64(total_output_amount, output_amount)?;
                sqrt_price = next_sqrt_price;
                amount_left = safe_sub_u64(
                    amount_left,
                    max_amount_in.to_u64().ok_or(CurveError::MathOverflow)?,
                )?;
            }
        }
    }

    if amount_left != 0 {
        let first = config.curve.first().ok_or(CurveError::InvalidInput)?;
        let next_sqrt_price =
            get_next_sqrt_price_from_input(sqrt_price, first.liquidity, amount_left, true)?;
        let output_amount = get_delta_amount_quote_unsigned(
            next_sqrt_price,
            sqrt_price,
            first.liquidity,
            Rounding::Down,
        )?;
        total_output_amount = safe_add_u64(total_output_amount, output_amount)?;
        sqrt_price = next_sqrt_price;
    }

    Ok(SwapAmount {
        output_amount: total_output_amount,
        next_sqrt_price: sqrt_price,
    })
}

/// Consume quote input against the curve, producing base output.
///
/// Walks segments in bound order. The curve holds no liquidity past its last
/// bound, so input left over after the final segment fails with
/// `NotEnoughLiquidity` rather than filling against an open range.
pub fn get_swap_amount_from_quote_to_base(
    config: &PoolConfig,
    current_sqrt_price: u128,
    amount_in: u64,
) -> CurveResult<SwapAmount> {
    let mut total_output_amount = 0u64;
    let mut sqrt_price = current_sqrt_price;
    let mut amount_left = amount_in;

    for segment in config.curve.iter() {
        if amount_left == 0 {
            break;
        }
        if segment.sqrt_price_bound > sqrt_price {
            let max_amount_in = get_delta_amount_quote_unsigned_256(
                sqrt_price,
                segment.sqrt_price_bound,
                segment.liquidity,
                Rounding::Up,
            )?;

            if U256::from(amount_left) < max_amount_in {
                let next_sqrt_price = get_next_sqrt_price_from_input(
                    sqrt_price,
                    segment.liquidity,
                    amount_left,
                    false,
                )?;
                let output_amount = get_delta_amount_base_unsigned(
                    sqrt_price,
                    next_sqrt_price,
                    segment.liquidity,
                    Rounding::Down,
                )?;
                total_output_amount = safe_add_u64(total_output_amount, output_amount)?;
                sqrt_price = next_sqrt_price;
                amount_left = 0;
                break;
            } else {
                let next_sqrt_price = segment.sqrt_price_bound;
                let output_amount = get_delta_amount_base_unsigned(
                    sqrt_price,
                    next_sqrt_price,
                    segment.liquidity,
                    Rounding::Down,
                )?;
                total_output_amount = safe_add_u64(total_output_amount, output_amount)?;
                sqrt_price = next_sqrt_price;
                amount_left = safe_sub_u64(
                    amount_left,
                    max_amount_in.to_u64().ok_or(CurveError::MathOverflow)?,
                )?;
            }
        }
    }

    if amount_left != 0 {
        return Err(CurveError::NotEnoughLiquidity);
    }

    Ok(SwapAmount {
        output_amount: total_output_amount,
        next_sqrt_price: sqrt_price,
    })
}

// ============================================================================
// Swap Orchestration
// ============================================================================

/// Traversal outcome with the fee split attached
#[derive(Debug, Clone, Copy)]
struct SwapResult {
    output_amount: u64,
    next_sqrt_price: u128,
    trading_fee: u64,
    protocol_fee: u64,
    referral_fee: u64,
}

fn get_swap_result(
    pool: &PoolState,
    config: &PoolConfig,
    amount_in: u64,
    fee_mode: &FeeMode,
    trade_direction: TradeDirection,
    current_point: u64,
) -> CurveResult<SwapResult> {
    let mut actual_protocol_fee = 0;
    let mut actual_trading_fee = 0;
    let mut actual_referral_fee = 0;

    let actual_amount_in = if fee_mode.fees_on_input {
        let FeeOnAmount {
            amount,
            trading_fee,
            protocol_fee,
            referral_fee,
        } = pool.pool_fees.get_fee_on_amount(
            amount_in,
            fee_mode.has_referral,
            current_point,
            pool.activation_point,
        )?;
        actual_protocol_fee = protocol_fee;
        actual_trading_fee = trading_fee;
        actual_referral_fee = referral_fee;
        amount
    } else {
        amount_in
    };

    let SwapAmount {
        output_amount,
        next_sqrt_price,
    } = match trade_direction {
        TradeDirection::BaseToQuote => {
            get_swap_amount_from_base_to_quote(config, pool.sqrt_price, actual_amount_in)?
        }
        TradeDirection::QuoteToBase => {
            get_swap_amount_from_quote_to_base(config, pool.sqrt_price, actual_amount_in)?
        }
    };

    let actual_amount_out = if fee_mode.fees_on_input {
        output_amount
    } else {
        let FeeOnAmount {
            amount,
            trading_fee,
            protocol_fee,
            referral_fee,
        } = pool.pool_fees.get_fee_on_amount(
            output_amount,
            fee_mode.has_referral,
            current_point,
            pool.activation_point,
        )?;
        actual_protocol_fee = protocol_fee;
        actual_trading_fee = trading_fee;
        actual_referral_fee = referral_fee;
        amount
    };

    Ok(SwapResult {
        output_amount: actual_amount_out,
        next_sqrt_price,
        trading_fee: actual_trading_fee,
        protocol_fee: actual_protocol_fee,
        referral_fee: actual_referral_fee,
    })
}

// ============================================================================
// Quote Entry Point
// ============================================================================

/// Fee breakdown of a quote, in the token the fee mode selected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct QuoteFee {
    /// LP share
    pub trading: u64,
    /// Protocol share net of referral
    pub protocol: u64,
    /// Referral share
    pub referral: u64,
}

/// Pool price around the quoted swap, Q64.64
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct QuotePrice {
    /// `sqrt_price^2 >> 64` at the snapshot
    pub before_swap: u128,
    /// `sqrt_price^2 >> 64` after the quoted swap settles
    pub after_swap: u128,
}

/// Full quote for an exact-input swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct QuoteResult {
    /// Net amount the trader receives
    pub amount_out: u64,
    /// Sqrt price the pool lands on, Q64.64
    pub next_sqrt_price: u128,
    /// Fee split charged by this swap
    pub fee: QuoteFee,
    /// Price before and after
    pub price: QuotePrice,
}

/// Quote an exact-input swap against a pool snapshot.
///
/// `swap_base_for_quote` selects the trade direction. `current_point` is the
/// caller's reading of the pool's activation axis (slot or timestamp per the
/// config) and drives the fee schedule. `has_referral` mirrors whether the
/// settlement transaction will carry a referral account, which changes the
/// fee split.
///
/// The result reflects exactly what settlement would do against the same
/// snapshot. Amounts already include all fees; callers apply their own
/// slippage tolerance to `amount_out`.
pub fn quote_exact_in(
    pool: &PoolState,
    config: &PoolConfig,
    swap_base_for_quote: bool,
    amount_in: u64,
    has_referral: bool,
    current_point: u64,
) -> CurveResult<QuoteResult> {
    if pool.is_curve_complete(config.migration_quote_threshold) {
        return Err(CurveError::PoolIsCompleted);
    }
    if amount_in == 0 {
        return Err(CurveError::AmountIsZero);
    }

    let trade_direction = if swap_base_for_quote {
        TradeDirection::BaseToQuote
    } else {
        TradeDirection::QuoteToBase
    };
    let fee_mode = FeeMode::new(config.collect_fee_mode, trade_direction, has_referral)?;

    let result = get_swap_result(
        pool,
        config,
        amount_in,
        &fee_mode,
        trade_direction,
        current_point,
    )?;

    Ok(QuoteResult {
        amount_out: result.output_amount,
        next_sqrt_price: result.next_sqrt_price,
        fee: QuoteFee {
            trading: result.trading_fee,
            protocol: result.protocol_fee,
            referral: result.referral_fee,
        },
        price: QuotePrice {
            before_swap: price_from_sqrt_price(pool.sqrt_price)?,
            after_swap: price_from_sqrt_price(result.next_sqrt_price)?,
        },
    })
}
