// Copyright 2024 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("hash input {value} does not fit in {bits} bits")]
	InputOutOfRange { value: String, bits: usize },
	#[error("field elements need {modulus_bits} bits but the hash only absorbs {input_bits}")]
	InputWidthTooSmall {
		modulus_bits: usize,
		input_bits: usize,
	},
	#[error("a {n_rows}-row trace cannot hold {required} ladder rows")]
	TraceTooShort { n_rows: usize, required: usize },
	#[error("curve error: {0}")]
	CurveError(#[from] ecstark_curve::Error),
	#[error("trace error: {0}")]
	MathError(#[from] ecstark_math::Error),
}
