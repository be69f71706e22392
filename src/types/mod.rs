//! # Snapshot Types
//!
//! Plain-data descriptions of a pool and its fee machinery. The caller
//! fetches and deserializes these however it likes; the engine only ever
//! reads them.

pub mod fees;
pub mod pool;

pub use fees::*;
pub use pool::*;
