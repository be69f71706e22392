//! # Protocol Constants
//!
//! Fundamental constants for the bonding-curve quote engine including:
//! - Q64.64 fixed-point scale
//! - Sqrt price domain bounds
//! - Fee denominators and the absolute fee ceiling
//! - Curve and exponentiation limits
//!
//! Every value must match the on-chain settlement engine exactly; quotes are
//! only useful if the two sides agree bit-for-bit.

// ============================================================================
// Fixed-Point Scale
// ============================================================================

/// Number of fractional bits in the Q64.64 representation
pub const RESOLUTION: u32 = 64;

/// One in Q64.64 fixed point: 2^64
pub const ONE_Q64: u128 = 1u128 << RESOLUTION;

// ============================================================================
// Price Domain
// ============================================================================

/// Smallest sqrt price a curve may reference (Q64.64)
pub const MIN_SQRT_PRICE: u128 = 4_295_048_016;

/// Largest sqrt price a curve may reference (Q64.64).
/// Chosen so that `sqrt_price^2 >> 64` still fits in a u128.
pub const MAX_SQRT_PRICE: u128 = 79_226_673_521_066_979_257_578_248_091;

// ============================================================================
// Fee Structure
// ============================================================================

/// Denominator for all fee numerators (1e9)
pub const FEE_DENOMINATOR: u64 = 1_000_000_000;

/// Absolute fee ceiling: 50% of the denominator
pub const MAX_FEE_NUMERATOR: u64 = 500_000_000;

/// Basis point denominator (10,000 = 100%)
pub const BASIS_POINT_MAX: u64 = 10_000;

/// Scale the squared volatility term down to fee-numerator units (1e11)
pub const VARIABLE_FEE_PRECISION: u64 = 100_000_000_000;

// ============================================================================
// Structural Limits
// ============================================================================

/// Maximum number of liquidity segments in a curve
pub const MAX_CURVE_POINT: usize = 20;

/// Largest exponent magnitude `pow` accepts; fee decay is meaningless
/// beyond this many periods
pub const MAX_EXPONENTIAL: u32 = 0x100000;
