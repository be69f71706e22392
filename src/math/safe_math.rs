//! # Safe Math Operations
//!
//! Overflow-checked arithmetic free functions. The settlement engine folds
//! every out-of-range result (overflow, underflow, failed narrowing) into
//! `MathOverflow`, so each invocation below passes that kind; only division
//! by zero keeps its own.

use crate::errors::{CurveError, CurveResult};

/// Macro to generate safe arithmetic functions
macro_rules! safe_arith {
    // Binary operations with checked methods
    ($fn_name:ident, $type:ty, $checked_method:ident, $error:expr) => {
        /// Safe $fn_name with overflow/underflow check
        pub fn $fn_name(a: $type, b: $type) -> CurveResult<$type> {
            a.$checked_method(b).ok_or($error)
        }
    };

    // Division operations with zero check
    (div, $fn_name:ident, $type:ty) => {
        /// Safe division with zero check
        pub fn $fn_name(a: $type, b: $type) -> CurveResult<$type> {
            if b == 0 {
                return Err(CurveError::DivisionByZero);
            }
            Ok(a / b)
        }
    };

    // Shift operations
    (shift, $fn_name:ident, $type:ty, $checked_method:ident, $error:expr) => {
        /// Safe $fn_name
        pub fn $fn_name(value: $type, shift: u32) -> CurveResult<$type> {
            value.$checked_method(shift).ok_or($error)
        }
    };

    // Narrowing conversion with max check
    (cast, $fn_name:ident, $from_type:ty, $to_type:ty, $max_val:expr) => {
        /// Safe cast from $from_type to $to_type
        pub fn $fn_name(value: $from_type) -> CurveResult<$to_type> {
            if value > $max_val {
                return Err(CurveError::MathOverflow);
            }
            Ok(value as $to_type)
        }
    };
}

// Generate basic arithmetic functions
safe_arith!(safe_add_u64, u64, checked_add, CurveError::MathOverflow);
safe_arith!(safe_sub_u64, u64, checked_sub, CurveError::MathOverflow);
safe_arith!(safe_mul_u64, u64, checked_mul, CurveError::MathOverflow);
safe_arith!(div, safe_div_u64, u64);

safe_arith!(safe_add_u128, u128, checked_add, CurveError::MathOverflow);
safe_arith!(safe_sub_u128, u128, checked_sub, CurveError::MathOverflow);
safe_arith!(safe_mul_u128, u128, checked_mul, CurveError::MathOverflow);
safe_arith!(div, safe_div_u128, u128);

// Generate shift operations
safe_arith!(shift, safe_shl_u128, u128, checked_shl, CurveError::MathOverflow);

// Generate type conversion functions
safe_arith!(cast, safe_cast_u128_to_u64, u128, u64, u64::MAX as u128);
