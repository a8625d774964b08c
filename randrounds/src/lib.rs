//! Password hashing with a variable, randomly drawn round count.
//!
//! The round count is not recoverable from a hash, so verification must
//! re-derive the chain across the whole configured window.

pub mod hasher;
pub mod params;

pub use hasher::RoundsHasher;
pub use params::{HashParams, RoundsError};
