// Copyright 2024 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("chord addition requires distinct operands; double equal points instead")]
	EqualPoints,
	#[error("adding a point to its negation has no chord")]
	DegenerateAddition,
	#[error("point is not on the curve")]
	NotOnCurve,
	#[error("finite point has x = 0, which the identity encoding shares")]
	ZeroAbscissa,
	#[error("scalar has {bits} bits but the ladder width is {width}")]
	ScalarTooWide { bits: u64, width: usize },
	#[error("field error: {0}")]
	FieldError(#[from] ecstark_field::Error),
	#[error("trace error: {0}")]
	MathError(#[from] ecstark_math::Error),
}
