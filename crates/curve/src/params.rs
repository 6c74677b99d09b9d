// Copyright 2024 Irreducible Inc.

use ecstark_field::{FieldExt, MontFp, StarkField, ToyField};

/// Coefficients of the short Weierstrass curve $y^2 = x^3 + \alpha x + \beta$.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveParams<F> {
	alpha: F,
	beta: F,
}

impl<F: FieldExt> CurveParams<F> {
	pub const fn new(alpha: F, beta: F) -> Self {
		Self { alpha, beta }
	}

	pub fn alpha(&self) -> F {
		self.alpha
	}

	pub fn beta(&self) -> F {
		self.beta
	}
}

/// The Stark curve, $y^2 = x^3 + x + \beta$ over the Stark field.
pub fn stark_curve_params() -> CurveParams<StarkField> {
	CurveParams::new(
		MontFp!("1"),
		MontFp!("3141592653589793238462643383279502884197169399375105820974944592307816406665"),
	)
}

/// $y^2 = x^3 + x + 42$ over the toy field. The group of points has prime order 3221257513.
pub fn toy_curve_params() -> CurveParams<ToyField> {
	CurveParams::new(MontFp!("1"), MontFp!("42"))
}
