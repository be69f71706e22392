//! # Pool Snapshot Types
//!
//! Value types describing one observed pool: the static launch configuration
//! and the mutable state captured at a point in time. Both are plain data
//! fetched by the caller; nothing here talks to a chain.

use crate::constants::{MAX_CURVE_POINT, MAX_SQRT_PRICE, MIN_SQRT_PRICE};
use crate::errors::{CurveError, CurveResult};
use crate::types::fees::{CollectFeeMode, PoolFees};

// ============================================================================
// Activation
// ============================================================================

/// Unit of the pool's time axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ActivationType {
    /// `current_point` and `activation_point` are slot numbers
    Slot = 0,
    /// `current_point` and `activation_point` are unix timestamps
    Timestamp = 1,
}

impl TryFrom<u8> for ActivationType {
    type Error = CurveError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ActivationType::Slot),
            1 => Ok(ActivationType::Timestamp),
            _ => Err(CurveError::InvalidInput),
        }
    }
}

// ============================================================================
// Launch Configuration
// ============================================================================

/// One segment of the piecewise liquidity curve.
///
/// The segment covers sqrt prices up to and including `sqrt_price_bound`;
/// the segment after the last bound holds no liquidity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "client", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct CurveSegment {
    /// Upper sqrt price of the segment, Q64.64
    pub sqrt_price_bound: u128,
    /// Constant liquidity inside the segment, Q64.64 scaled
    pub liquidity: u128,
}

/// Static configuration a pool was launched with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "client", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct PoolConfig {
    /// Liquidity segments in ascending bound order
    pub curve: Vec<CurveSegment>,
    /// Sqrt price the pool opened at, Q64.64
    pub sqrt_start_price: u128,
    /// Quote reserve at which the pool stops quoting and migrates
    pub migration_quote_threshold: u64,
    /// Raw `CollectFeeMode` discriminant
    pub collect_fee_mode: u8,
    /// Raw `ActivationType` discriminant
    pub activation_type: u8,
}

impl PoolConfig {
    /// Check the structural invariants every quote relies on.
    ///
    /// Callers deserializing untrusted snapshots should validate once up
    /// front; the quote path itself assumes an ordered, non-empty curve.
    pub fn validate(&self) -> CurveResult<()> {
        if self.curve.is_empty() || self.curve.len() > MAX_CURVE_POINT {
            return Err(CurveError::InvalidInput);
        }
        if self.curve.iter().any(|segment| segment.liquidity == 0) {
            return Err(CurveError::InvalidInput);
        }

        if self.sqrt_start_price < MIN_SQRT_PRICE || self.sqrt_start_price >= MAX_SQRT_PRICE {
            return Err(CurveError::InvalidPrice);
        }

        let first = self.curve.first().ok_or(CurveError::InvalidInput)?;
        if first.sqrt_price_bound <= self.sqrt_start_price {
            return Err(CurveError::InvalidPrice);
        }
        for pair in self.curve.windows(2) {
            if pair[1].sqrt_price_bound <= pair[0].sqrt_price_bound {
                return Err(CurveError::InvalidPrice);
            }
        }
        let last = self.curve.last().ok_or(CurveError::InvalidInput)?;
        if last.sqrt_price_bound > MAX_SQRT_PRICE {
            return Err(CurveError::InvalidPrice);
        }

        CollectFeeMode::try_from(self.collect_fee_mode)?;
        ActivationType::try_from(self.activation_type)?;
        Ok(())
    }
}

// ============================================================================
// Observed State
// ============================================================================

/// Mutable pool state captured at one point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "client", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct PoolState {
    /// Fee configuration and trackers
    pub pool_fees: PoolFees,
    /// Current sqrt price, Q64.64
    pub sqrt_price: u128,
    /// Point on the activation axis the fee schedule started at
    pub activation_point: u64,
    /// Base tokens held by the pool
    pub base_reserve: u64,
    /// Quote tokens held by the pool
    pub quote_reserve: u64,
    /// Accrued protocol fees in base tokens
    pub protocol_base_fee: u64,
    /// Accrued protocol fees in quote tokens
    pub protocol_quote_fee: u64,
    /// Accrued LP fees in base tokens
    pub trading_base_fee: u64,
    /// Accrued LP fees in quote tokens
    pub trading_quote_fee: u64,
}

impl PoolState {
    /// The pool has raised its migration threshold and no longer quotes.
    pub fn is_curve_complete(&self, migration_threshold: u64) -> bool {
        self.quote_reserve >= migration_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ONE_Q64;

    fn valid_config() -> PoolConfig {
        PoolConfig {
            curve: vec![
                CurveSegment {
                    sqrt_price_bound: 2 * ONE_Q64,
                    liquidity: 1000u128 << 64,
                },
                CurveSegment {
                    sqrt_price_bound: 4 * ONE_Q64,
                    liquidity: 500u128 << 64,
                },
            ],
            sqrt_start_price: ONE_Q64,
            migration_quote_threshold: 1_000_000,
            collect_fee_mode: CollectFeeMode::QuoteToken as u8,
            activation_type: ActivationType::Slot as u8,
        }
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        assert_eq!(valid_config().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty_curve() {
        let mut config = valid_config();
        config.curve.clear();
        assert_eq!(config.validate(), Err(CurveError::InvalidInput));
    }

    #[test]
    fn test_validate_rejects_oversized_curve() {
        let mut config = valid_config();
        let last_bound = 4 * ONE_Q64;
        config.curve = (0..=MAX_CURVE_POINT as u128)
            .map(|i| CurveSegment {
                sqrt_price_bound: last_bound + i * ONE_Q64,
                liquidity: 1,
            })
            .collect();
        assert_eq!(config.validate(), Err(CurveError::InvalidInput));
    }

    #[test]
    fn test_validate_rejects_zero_liquidity_segment() {
        let mut config = valid_config();
        config.curve[1].liquidity = 0;
        assert_eq!(config.validate(), Err(CurveError::InvalidInput));
    }

    #[test]
    fn test_validate_rejects_start_price_out_of_range() {
        let mut config = valid_config();
        config.sqrt_start_price = MIN_SQRT_PRICE - 1;
        assert_eq!(config.validate(), Err(CurveError::InvalidPrice));

        let mut config = valid_config();
        config.sqrt_start_price = MAX_SQRT_PRICE;
        assert_eq!(config.validate(), Err(CurveError::InvalidPrice));
    }

    #[test]
    fn test_validate_rejects_first_bound_at_or_below_start() {
        let mut config = valid_config();
        config.sqrt_start_price = 2 * ONE_Q64;
        assert_eq!(config.validate(), Err(CurveError::InvalidPrice));
    }

    #[test]
    fn test_validate_rejects_unordered_bounds() {
        let mut config = valid_config();
        config.curve[1].sqrt_price_bound = config.curve[0].sqrt_price_bound;
        assert_eq!(config.validate(), Err(CurveError::InvalidPrice));
    }

    #[test]
    fn test_validate_rejects_bound_above_max() {
        let mut config = valid_config();
        config.curve[1].sqrt_price_bound = MAX_SQRT_PRICE + 1;
        assert_eq!(config.validate(), Err(CurveError::InvalidPrice));
    }

    #[test]
    fn test_validate_rejects_bad_modes() {
        let mut config = valid_config();
        config.collect_fee_mode = 2;
        assert_eq!(config.validate(), Err(CurveError::InvalidCollectFeeMode));

        let mut config = valid_config();
        config.activation_type = 2;
        assert_eq!(config.validate(), Err(CurveError::InvalidInput));
    }

    #[test]
    fn test_curve_complete_boundary() {
        let mut state = PoolState::default();
        state.quote_reserve = 999;
        assert!(!state.is_curve_complete(1000));
        state.quote_reserve = 1000;
        assert!(state.is_curve_complete(1000));
    }
}
