// Copyright 2024 Irreducible Inc.

//! Prime field arithmetic for the ecstark prover.
//!
//! Field elements are [`ark_ff`] Montgomery-form integers modulo a fixed prime. The prime itself is
//! part of the type, so differently parameterized fields cannot be mixed by accident. Two fields
//! are provided:
//!
//! * [`StarkField`], over $p = 2^{251} + 17 \cdot 2^{192} + 1$, the field of the Stark curve;
//! * [`ToyField`], over $p = 3 \cdot 2^{30} + 1$, a small field with the same two-adic structure
//!   used to keep end-to-end tests fast.
//!
//! The [`FieldExt`] trait adds the checked operations the prover relies on on top of
//! [`ark_ff::PrimeField`].

pub mod error;
pub mod field;
pub mod replay;
mod stark;
mod toy;

pub use ark_ff::{batch_inversion, FftField, Field, MontFp, One, PrimeField, UniformRand, Zero};
pub use error::*;
pub use field::FieldExt;
pub use replay::{read_decimal_felts, write_decimal_felts};
pub use stark::{StarkField, StarkFieldConfig};
pub use toy::{ToyField, ToyFieldConfig};
