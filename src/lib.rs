//! # Virtual Curve Core - Deterministic Swap Quotes
//!
//! This crate contains the pricing math shared between the on-chain
//! settlement engine and off-chain clients. It provides:
//!
//! - Type definitions for pool and curve snapshots
//! - Q64.64 fixed-point math with explicit rounding control
//! - The fee engine (scheduler decay, dynamic fee, fee splitting)
//! - The curve-traversal swap algorithm and `quote_exact_in`
//!
//! Quoting is a pure function of its snapshot inputs: nothing here performs
//! I/O, mutates state, or touches floating point. Given identical inputs the
//! engine produces bit-identical outputs, which is what allows a quote to be
//! previewed off-chain and settled on-chain without drift.
//!
//! ## Feature Flags
//!
//! - `client`: Enables serde/borsh serialization for off-chain use

// Re-export all modules
pub mod constants;
pub mod errors;
pub mod math;
pub mod quote;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use errors::{CurveError, CurveResult};
pub use quote::*;
pub use types::*;
