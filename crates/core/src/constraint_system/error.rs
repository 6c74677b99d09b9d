// Copyright 2024 Irreducible Inc.

use crate::{merkle_tree, protocols::fri};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("trace length {n_rows} must be a power of two and at least 2")]
	InvalidTraceLength { n_rows: usize },

	#[error("constraint {name} reads the next row on the last row")]
	NextRowOnLastRow { name: String },

	#[error("constraint {name} targets row {row} outside a trace of {n_rows} rows")]
	TargetRowOutOfRange {
		name: String,
		row: usize,
		n_rows: usize,
	},

	#[error("constraint {name} has no target rows")]
	EmptyTarget { name: String },

	#[error("constraint {name} reads a register outside the trace layout")]
	UnknownRegister { name: String },

	#[error("the trace has {n_columns} columns and {n_rows} rows, which does not match the constraint system")]
	TraceShapeMismatch { n_columns: usize, n_rows: usize },

	#[error("constraint {name} does not hold on row {row}")]
	UnsatisfiedConstraint { name: String, row: usize },

	#[error("the witness violates constraint {name}")]
	InvalidWitness { name: String },

	#[error("math error: {0}")]
	MathError(#[from] ecstark_math::Error),

	#[error("field error: {0}")]
	FieldError(#[from] ecstark_field::Error),

	#[error("Merkle tree error: {0}")]
	MerkleTree(#[from] merkle_tree::Error),

	#[error("FRI error: {0}")]
	Fri(#[from] fri::Error),

	#[error("verification error: {0}")]
	Verification(#[from] VerificationError),
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
	#[error("the proof has {actual} queries, expected {expected}")]
	IncorrectQueryCount { expected: usize, actual: usize },

	#[error("a trace row opening in query {query} has the wrong width, expected {expected}")]
	IncorrectOpeningWidth { query: usize, expected: usize },

	#[error("trace row opening in query {query} does not match the trace root: {source}")]
	MerkleProofMismatch {
		query: usize,
		#[source]
		source: merkle_tree::VerificationError,
	},

	#[error("the composition value in query {query} does not match the FRI layer")]
	CompositionMismatch { query: usize },

	#[error("the replayed transcript does not match the proof transcript")]
	TranscriptMismatch,

	#[error("FRI verification failed: {0}")]
	Fri(#[from] fri::VerificationError),
}
