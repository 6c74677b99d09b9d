// Copyright 2024-2025 Irreducible Inc.

use ecstark_field::FieldExt;
use ecstark_utils::checked_arithmetics::log2_ceil;
use getset::CopyGetters;

use crate::merkle_tree::MerkleProof;

/// Parameters the verifier fixes before the protocol starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
pub struct FriParams {
	/// Claimed bound on the degree of the committed polynomial.
	#[getset(get_copy = "pub")]
	degree_bound: usize,
	/// The number of oracle consistency queries required during the query phase.
	#[getset(get_copy = "pub")]
	n_queries: usize,
}

impl FriParams {
	pub const fn new(degree_bound: usize, n_queries: usize) -> Self {
		Self {
			degree_bound,
			n_queries,
		}
	}

	/// Committed layers an honest prover needs: one per halving until the degree reaches zero,
	/// and never fewer than one.
	pub const fn max_committed_layers(&self) -> usize {
		let folds = log2_ceil(self.degree_bound + 1);
		if folds == 0 {
			1
		} else {
			folds
		}
	}
}

/// The pair opened at one committed layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriLayerOpening<F> {
	/// $f(x)$
	pub value: F,
	/// $f(-x)$, at the index half a domain away.
	pub sibling_value: F,
	pub proof: MerkleProof<F>,
	pub sibling_proof: MerkleProof<F>,
}

/// The openings of one query round, layer 0 first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriQueryProof<F> {
	pub layers: Vec<FriLayerOpening<F>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriProof<F> {
	/// Roots of the committed layers, layer 0 first.
	pub layer_roots: Vec<F>,
	/// The constant the last committed layer folds to.
	pub final_value: F,
	pub queries: Vec<FriQueryProof<F>>,
}

impl<F> FriProof<F> {
	pub fn size_in_elements(&self) -> usize {
		let query_size = |query: &FriQueryProof<F>| {
			query
				.layers
				.iter()
				.map(|layer| 2 + layer.proof.depth() + layer.sibling_proof.depth())
				.sum::<usize>()
		};
		self.layer_roots.len() + 1 + self.queries.iter().map(query_size).sum::<usize>()
	}
}

/// Folds the pair $f(x), f(-x)$ into the next layer's value at $x^2$:
///
/// $$
/// \frac{f(x) + f(-x)}{2} + \beta \cdot \frac{f(x) - f(-x)}{2x}
/// $$
pub fn fold_pair<F: FieldExt>(
	x: F,
	value: F,
	sibling_value: F,
	beta: F,
) -> Result<F, ecstark_field::Error> {
	let two_inv = F::from(2u64).checked_inverse()?;
	let even = (value + sibling_value) * two_inv;
	let odd = (value - sibling_value).checked_div(&x.double())?;
	Ok(even + beta * odd)
}
