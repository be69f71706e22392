//! # Core Error Types
//!
//! Failure kinds shared by the math layer, the fee engine, and the quote
//! orchestrator. Every fallible operation returns one of these; nothing in
//! the engine panics, retries, or silently recovers.

use thiserror::Error;

/// Quote engine errors, mirroring the settlement program's failure kinds
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveError {
    // ========================================================================
    // Math Errors
    // ========================================================================

    /// An arithmetic step left the representable range. Also covers
    /// underflow and failed narrowing casts: the settlement engine folds
    /// all of them into a single overflow kind.
    #[error("Math overflow")]
    MathOverflow,

    #[error("Division by zero")]
    DivisionByZero,

    /// A price-range function received `lower >= upper`
    #[error("Invalid price")]
    InvalidPrice,

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid input")]
    InvalidInput,

    #[error("Invalid collect fee mode")]
    InvalidCollectFeeMode,

    // ========================================================================
    // Swap Errors
    // ========================================================================

    /// Pool has crossed its migration threshold and no longer quotes
    #[error("Pool is completed")]
    PoolIsCompleted,

    #[error("Amount is zero")]
    AmountIsZero,

    /// Quote-to-base traversal exhausted the curve before the input
    #[error("Not enough liquidity")]
    NotEnoughLiquidity,
}

/// Result type using quote engine errors
pub type CurveResult<T> = Result<T, CurveError>;
