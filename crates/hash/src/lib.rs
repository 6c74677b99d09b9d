// Copyright 2023 Ulvetanna Inc.

//! The two-input Pedersen hash and the compression-function interfaces built on it.
//!
//! [`PedersenHash`] is a fixed-base elliptic-curve hash: the inputs are split into low and high
//! parts that scale four fixed generators, and the digest is the x-coordinate of the sum. The same
//! computation can be written into an execution trace with [`PedersenHash::trace_hash`], which is
//! what the membership statement proves knowledge of.

pub mod compression;
mod error;
mod params;
mod pedersen;
#[cfg(test)]
mod tests;
mod trace;

pub use compression::*;
pub use error::Error;
pub use params::{stark_pedersen_params, toy_pedersen_params, PedersenParams};
pub use pedersen::PedersenHash;
pub use trace::PedersenRegisters;
