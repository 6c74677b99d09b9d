// Copyright 2024 Irreducible Inc.

//! Short Weierstrass curve arithmetic over the `ecstark_field` prime fields.
//!
//! [`Curve`] implements the affine group law and a Montgomery-ladder scalar multiplication. The
//! same operations are available in trace-emitting form (see [`trace`]), which writes every
//! intermediate value into an execution trace with branch-free selector arithmetic. The
//! [`jacobian`] module provides the inversion-free fixed-base multiplier used when only the
//! result matters.

mod arithmetic;
pub mod error;
pub mod jacobian;
mod params;
mod point;
pub mod trace;

pub use arithmetic::Curve;
pub use error::Error;
pub use params::{stark_curve_params, toy_curve_params, CurveParams};
pub use point::AffinePoint;
