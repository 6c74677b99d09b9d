// Copyright 2024 Irreducible Inc.

use crate::constraint_system;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("the public set must not be empty")]
	EmptySet,

	#[error("a scalar width of {width} bits is not supported")]
	InvalidWidth { width: usize },

	#[error("field error: {0}")]
	Field(#[from] ecstark_field::Error),

	#[error("curve error: {0}")]
	Curve(#[from] ecstark_curve::Error),

	#[error("hash error: {0}")]
	Hash(#[from] ecstark_hash::Error),

	#[error("trace error: {0}")]
	Math(#[from] ecstark_math::Error),

	#[error("constraint system error: {0}")]
	ConstraintSystem(#[from] constraint_system::error::Error),
}
