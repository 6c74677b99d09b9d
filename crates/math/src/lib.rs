// Copyright 2024-2025 Irreducible Inc.

//! Mathematical primitives for the ecstark prover, built atop the `ecstark_field` crate.
//!
//! This crate provides:
//!
//! * Univariate polynomials in coefficient form, with exact division and interpolation
//! * Multiplicative evaluation domains and their cosets
//! * Execution traces over named registers
//! * Arithmetic expressions over trace cells, which AIR constraints are written in

mod arith_expr;
mod domain;
mod error;
mod trace;
mod univariate;

pub use arith_expr::*;
pub use domain::*;
pub use error::*;
pub use trace::*;
pub use univariate::*;
