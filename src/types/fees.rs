//! # Fee Types
//!
//! Fee parameters carried in a pool snapshot and the pure fee engine built
//! on them: scheduler decay, the volatility fee term, fee-mode resolution,
//! and the protocol/referral split.

use crate::constants::{FEE_DENOMINATOR, MAX_FEE_NUMERATOR, VARIABLE_FEE_PRECISION};
use crate::errors::{CurveError, CurveResult};
use crate::math::big_int::{mul_div_u64, Rounding};
use crate::math::fee_math::get_fee_in_period;
use crate::math::safe_math::{
    safe_add_u128, safe_add_u64, safe_cast_u128_to_u64, safe_div_u64, safe_mul_u128, safe_mul_u64,
    safe_sub_u64,
};

// ============================================================================
// Modes and Directions
// ============================================================================

/// How the base fee numerator decays over elapsed periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum FeeSchedulerMode {
    /// Always the cliff numerator
    Flat = 0,
    /// `cliff - period * reduction_factor`
    Linear = 1,
    /// `cliff * (1 - reduction_factor/10000)^period`
    Exponential = 2,
}

impl TryFrom<u8> for FeeSchedulerMode {
    type Error = CurveError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FeeSchedulerMode::Flat),
            1 => Ok(FeeSchedulerMode::Linear),
            2 => Ok(FeeSchedulerMode::Exponential),
            _ => Err(CurveError::InvalidInput),
        }
    }
}

/// Which token fees are collected in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CollectFeeMode {
    /// Fees always settle in the quote token
    QuoteToken = 0,
    /// Fees settle in whichever token the trader receives
    OutputToken = 1,
}

impl TryFrom<u8> for CollectFeeMode {
    type Error = CurveError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CollectFeeMode::QuoteToken),
            1 => Ok(CollectFeeMode::OutputToken),
            _ => Err(CurveError::InvalidCollectFeeMode),
        }
    }
}

/// Swap direction over the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum TradeDirection {
    /// Sell the curve token, price moves down
    BaseToQuote,
    /// Buy the curve token, price moves up
    QuoteToBase,
}

/// Resolved fee timing for one swap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeMode {
    /// Deduct fees from the input before traversal (vs from the output after)
    pub fees_on_input: bool,
    /// Fees are denominated in the base token
    pub fees_on_base_token: bool,
    /// A referral account participates in the split
    pub has_referral: bool,
}

impl FeeMode {
    /// Resolve fee timing from the collect mode and trade direction.
    ///
    /// Quote-token collection can never charge the input of a base-to-quote
    /// swap (the input is base), so that cell falls on the output side;
    /// output-token collection charges the receiving side by definition.
    pub fn new(
        collect_fee_mode: u8,
        trade_direction: TradeDirection,
        has_referral: bool,
    ) -> CurveResult<FeeMode> {
        let collect_fee_mode = CollectFeeMode::try_from(collect_fee_mode)?;

        let (fees_on_input, fees_on_base_token) = match (collect_fee_mode, trade_direction) {
            (CollectFeeMode::QuoteToken, TradeDirection::BaseToQuote) => (false, false),
            (CollectFeeMode::QuoteToken, TradeDirection::QuoteToBase) => (true, false),
            (CollectFeeMode::OutputToken, TradeDirection::BaseToQuote) => (false, false),
            (CollectFeeMode::OutputToken, TradeDirection::QuoteToBase) => (false, true),
        };

        Ok(FeeMode {
            fees_on_input,
            fees_on_base_token,
            has_referral,
        })
    }
}

// ============================================================================
// Fee Parameters
// ============================================================================

/// Time-decay schedule for the base trading fee
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "client", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct BaseFeeParams {
    /// Fee numerator at activation, before any decay
    pub cliff_fee_numerator: u64,
    /// Number of decay periods after which the fee stops changing
    pub number_of_period: u16,
    /// Length of one period in the pool's activation unit; zero disables decay
    pub period_frequency: u64,
    /// Per-period reduction: absolute for Linear, basis points for Exponential
    pub reduction_factor: u64,
    /// Raw `FeeSchedulerMode` discriminant
    pub fee_scheduler_mode: u8,
}

impl BaseFeeParams {
    /// Base fee numerator at `current_point`.
    ///
    /// Before activation the schedule is clamped to its final period, so a
    /// pre-activation quote prices with the fully decayed fee.
    pub fn get_current_base_fee_numerator(
        &self,
        current_point: u64,
        activation_point: u64,
    ) -> CurveResult<u64> {
        if self.period_frequency == 0 {
            return Ok(self.cliff_fee_numerator);
        }

        let period = if current_point < activation_point {
            self.number_of_period as u64
        } else {
            let elapsed = safe_sub_u64(current_point, activation_point)?;
            (self.number_of_period as u64).min(safe_div_u64(elapsed, self.period_frequency)?)
        };

        match FeeSchedulerMode::try_from(self.fee_scheduler_mode)? {
            FeeSchedulerMode::Flat => Ok(self.cliff_fee_numerator),
            FeeSchedulerMode::Linear => safe_sub_u64(
                self.cliff_fee_numerator,
                safe_mul_u64(period, self.reduction_factor)?,
            ),
            FeeSchedulerMode::Exponential => {
                get_fee_in_period(self.cliff_fee_numerator, self.reduction_factor, period)
            }
        }
    }
}

/// Volatility tracker feeding the dynamic fee term
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "client", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct DynamicFeeParams {
    /// Non-zero once the tracker has been seeded by settlement
    pub initialized: u8,
    /// Bin step the accumulator is measured against
    pub bin_step: u16,
    /// Scales the squared volatility term into fee-numerator units
    pub variable_fee_control: u32,
    /// Smoothed volatility measure maintained by settlement
    pub volatility_accumulator: u128,
}

impl DynamicFeeParams {
    /// Volatility fee term:
    /// `ceil((accumulator * bin_step)^2 * control / 1e11)`
    pub fn get_variable_fee(&self) -> CurveResult<u128> {
        if self.initialized == 0 {
            return Ok(0);
        }

        let vfa_bin = safe_mul_u128(self.volatility_accumulator, self.bin_step as u128)?;
        let square_vfa_bin = safe_mul_u128(vfa_bin, vfa_bin)?;
        let v_fee = safe_mul_u128(square_vfa_bin, self.variable_fee_control as u128)?;

        // Round up in fee-numerator units
        let scaled = safe_add_u128(v_fee, (VARIABLE_FEE_PRECISION - 1) as u128)?;
        Ok(scaled / VARIABLE_FEE_PRECISION as u128)
    }
}

/// Full fee configuration carried in a pool snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "client", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct PoolFees {
    /// Scheduled base fee
    pub base_fee: BaseFeeParams,
    /// Volatility fee tracker
    pub dynamic_fee: DynamicFeeParams,
    /// Protocol share of the total fee, in percent
    pub protocol_fee_percent: u8,
    /// Referral share of the protocol fee, in percent
    pub referral_fee_percent: u8,
}

/// Split of one charged amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeOnAmount {
    /// Amount remaining after the total fee
    pub amount: u64,
    /// LP share
    pub trading_fee: u64,
    /// Protocol share net of referral
    pub protocol_fee: u64,
    /// Referral share
    pub referral_fee: u64,
}

impl PoolFees {
    /// Total fee numerator at `current_point`: scheduled base fee plus the
    /// volatility term, capped at the absolute ceiling.
    pub fn get_total_fee_numerator(
        &self,
        current_point: u64,
        activation_point: u64,
    ) -> CurveResult<u64> {
        let base_fee_numerator = self
            .base_fee
            .get_current_base_fee_numerator(current_point, activation_point)?;
        let variable_fee = self.dynamic_fee.get_variable_fee()?;

        let total = safe_add_u128(variable_fee, base_fee_numerator as u128)?;
        safe_cast_u128_to_u64(total.min(MAX_FEE_NUMERATOR as u128))
    }

    /// Charge the total fee on `amount` and split it.
    ///
    /// A non-zero numerator always charges at least one unit. The referral
    /// share comes out of the protocol share, not on top of it.
    pub fn get_fee_on_amount(
        &self,
        amount: u64,
        has_referral: bool,
        current_point: u64,
        activation_point: u64,
    ) -> CurveResult<FeeOnAmount> {
        let trade_fee_numerator = self.get_total_fee_numerator(current_point, activation_point)?;

        let total_fee = if trade_fee_numerator == 0 {
            0
        } else {
            mul_div_u64(amount, trade_fee_numerator, FEE_DENOMINATOR, Rounding::Down)?.max(1)
        };

        let protocol_fee = mul_div_u64(
            total_fee,
            self.protocol_fee_percent as u64,
            100,
            Rounding::Down,
        )?;
        let referral_fee = if has_referral {
            mul_div_u64(
                protocol_fee,
                self.referral_fee_percent as u64,
                100,
                Rounding::Down,
            )?
        } else {
            0
        };
        let protocol_fee = safe_sub_u64(protocol_fee, referral_fee)?;

        let trading_fee = safe_sub_u64(total_fee, safe_add_u64(protocol_fee, referral_fee)?)?;
        let amount = safe_sub_u64(amount, total_fee)?;

        Ok(FeeOnAmount {
            amount,
            trading_fee,
            protocol_fee,
            referral_fee,
        })
    }
}
