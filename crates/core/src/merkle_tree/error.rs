// Copyright 2024 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("cannot build a Merkle tree over an empty vector")]
	EmptyInput,
	#[error("index exceeds Merkle tree base size: {max}")]
	IndexOutOfRange { max: usize },
	#[error("verification failure: {0}")]
	Verification(#[from] VerificationError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
	#[error("the shape of the proof is incorrect")]
	IncorrectProofShape,
	#[error("the proof is invalid")]
	InvalidProof,
}
