// Copyright 2024 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("argument {arg} does not have expected length {expected}")]
	IncorrectArgumentLength { arg: String, expected: usize },
	#[error("duplicate interpolation point")]
	DuplicatePoint,
	#[error("division leaves a nonzero remainder")]
	InexactDivision,
	#[error("division by the zero polynomial")]
	DivisionByZeroPolynomial,
	#[error("domain generator does not have exact order 2^{log_size}")]
	SubgroupOrderMismatch { log_size: usize },
	#[error("domain offset must be nonzero")]
	ZeroDomainOffset,
	#[error("a domain of size 1 cannot be squared")]
	DomainTooSmall,
	#[error("register {name} is already declared")]
	DuplicateRegister { name: String },
	#[error("unknown register {name}")]
	UnknownRegister { name: String },
	#[error("cell {register}[{row}] is written twice")]
	CellOverwritten { register: String, row: usize },
	#[error("cell {register}[{row}] was never written")]
	UnwrittenCell { register: String, row: usize },
	#[error("trace has {actual} rows, expected exactly {expected}")]
	TraceLengthMismatch { expected: usize, actual: usize },
	#[error("row cursor {row} is past the end of a {n_rows}-row trace")]
	RowOutOfRange { row: usize, n_rows: usize },
	#[error("{0}")]
	FieldError(#[from] ecstark_field::Error),
	#[error("NTT error: {0}")]
	NttError(#[from] ecstark_ntt::Error),
}
