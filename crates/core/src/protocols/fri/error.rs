// Copyright 2024 Irreducible Inc.

use crate::merkle_tree;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("query index {index} is outside the committed domain of size {domain_size}")]
	QueryIndexOutOfRange { index: usize, domain_size: usize },
	#[error("math error: {0}")]
	MathError(#[from] ecstark_math::Error),
	#[error("field error: {0}")]
	FieldError(#[from] ecstark_field::Error),
	#[error("Merkle tree error: {0}")]
	MerkleTree(#[from] merkle_tree::Error),
	#[error("verification error: {0}")]
	Verification(#[from] VerificationError),
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
	#[error("the proof commits to {n_layers} layers, more than the {max_layers} allowed for the degree bound")]
	TooManyLayers { n_layers: usize, max_layers: usize },
	#[error("the proof commits to no layers")]
	NoLayers,
	#[error("the proof has {actual} query rounds, expected {expected}")]
	IncorrectQueryCount { expected: usize, actual: usize },
	#[error("the size of the query proof is incorrect, expected {expected}")]
	IncorrectQueryProofLength { expected: usize },
	#[error("opening in query round {query_round} at layer {layer} does not match the layer root: {source}")]
	MerkleProofMismatch {
		query_round: usize,
		layer: usize,
		#[source]
		source: merkle_tree::VerificationError,
	},
	#[error("incorrect folding in query round {query_round} at layer {layer}")]
	IncorrectFold { query_round: usize, layer: usize },
}
