// Copyright 2023-2024 Irreducible Inc.

/// Error thrown when a field operation fails.
#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("division by zero")]
	DivisionByZero,
	#[error("the field has no multiplicative subgroup of order 2^{log_order}")]
	NoRootOfUnity { log_order: usize },
	/// Thrown when trying to initialize a field element with an integer not below the modulus.
	#[error("value {value} is not a canonical field element")]
	NotInField { value: String },
	#[error("line {line} is not a decimal field element")]
	MalformedDecimal { line: usize },
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}
