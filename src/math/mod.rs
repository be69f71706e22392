//! # Mathematical Functions
//!
//! Pure fixed-point math for the quote engine. Everything here is exact
//! integer arithmetic with caller-controlled rounding; no floating point.

pub mod big_int;
pub mod fee_math;
pub mod fixed_point;
pub mod liquidity_math;
pub mod safe_math;

// Re-export commonly used functions
pub use big_int::*;
pub use fee_math::*;
pub use fixed_point::*;
pub use liquidity_math::*;
pub use safe_math::*;
