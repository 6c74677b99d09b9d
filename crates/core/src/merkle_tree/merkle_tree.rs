// Copyright 2024 Irreducible Inc.

use ecstark_field::FieldExt;
use ecstark_hash::PaddedCompressionFunction;
use ecstark_utils::{bail, checked_arithmetics::log2_ceil, ensure, rayon::min_len_per_task};
use rayon::prelude::*;

use super::error::{Error, VerificationError};

/// A leaf slot in a padded tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerkleNode<F> {
	Value(F),
	/// The pad sentinel. It is hashed as the integer modulus, which no residue can equal.
	Padding,
}

impl<F: Copy> MerkleNode<F> {
	pub const fn value(&self) -> Option<F> {
		match self {
			Self::Value(value) => Some(*value),
			Self::Padding => None,
		}
	}
}

/// An authentication path from one leaf to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof<F> {
	/// `(sibling_is_left, sibling)` from the leaf level up to the children of the root.
	pub path: Vec<(bool, MerkleNode<F>)>,
}

impl<F> MerkleProof<F> {
	pub fn depth(&self) -> usize {
		self.path.len()
	}

	/// The leaf index the path encodes: bit `j` is set when our node is the right child at level
	/// `j`.
	pub fn leaf_index(&self) -> usize {
		self.path
			.iter()
			.enumerate()
			.fold(0, |index, (level, &(sibling_is_left, _))| {
				index | (usize::from(sibling_is_left) << level)
			})
	}
}

/// An immutable binary Merkle tree.
///
/// The leaves are stored as given. Every layer above them is stored in one flattened vector,
/// bottom layer first, so the root is the last element. A tree always has at least one layer
/// above the leaves; a single leaf is paired with the sentinel.
#[derive(Debug, Clone)]
pub struct MerkleTree<F> {
	log_len: usize,
	leaves: Vec<F>,
	inner_nodes: Vec<F>,
}

impl<F: FieldExt> MerkleTree<F> {
	/// Builds a tree over `leaves`, padding to the next power of two.
	///
	/// ## Throws
	///
	/// * [`Error::EmptyInput`] if `leaves` is empty
	#[tracing::instrument("MerkleTree::build", skip_all, level = "debug", fields(n_leaves = leaves.len()))]
	pub fn build<C>(compression: &C, leaves: Vec<F>) -> Result<Self, Error>
	where
		C: PaddedCompressionFunction<F> + Sync,
	{
		if leaves.is_empty() {
			bail!(Error::EmptyInput);
		}

		let log_len = log2_ceil(leaves.len()).max(1);
		let mut inner_nodes = Vec::with_capacity((1 << log_len) - 1);

		let slot = |index: usize| leaves.get(index).copied();
		let half = 1 << (log_len - 1);
		inner_nodes.par_extend(
			(0..half)
				.into_par_iter()
				.with_min_len(min_len_per_task(half))
				.map(|i| compression.compress_padded(slot(2 * i), slot(2 * i + 1))),
		);

		let mut layer_start = 0;
		for layer_len in (0..log_len - 1).rev().map(|log| 2 << log) {
			let parents = compress_layer(
				compression,
				&inner_nodes[layer_start..layer_start + layer_len],
			);
			layer_start += layer_len;
			inner_nodes.extend(parents);
		}

		Ok(Self {
			log_len,
			leaves,
			inner_nodes,
		})
	}

	/// Digests every row with [`row_digest`] and builds a tree over the digests.
	#[tracing::instrument("MerkleTree::commit_rows", skip_all, level = "debug", fields(n_rows = rows.len()))]
	pub fn commit_rows<C>(compression: &C, rows: &[Vec<F>]) -> Result<Self, Error>
	where
		C: PaddedCompressionFunction<F> + Sync,
	{
		let digests = rows
			.par_iter()
			.with_min_len(min_len_per_task(rows.len()))
			.map(|row| row_digest(compression, row))
			.collect();
		Self::build(compression, digests)
	}

	pub const fn log_len(&self) -> usize {
		self.log_len
	}

	pub fn n_leaves(&self) -> usize {
		self.leaves.len()
	}

	pub fn leaves(&self) -> &[F] {
		&self.leaves
	}

	pub fn root(&self) -> F {
		self.inner_nodes[self.inner_nodes.len() - 1]
	}

	/// The authentication path of leaf `index`.
	///
	/// ## Throws
	///
	/// * [`Error::IndexOutOfRange`] if `index` is not a leaf
	pub fn get_proof(&self, index: usize) -> Result<MerkleProof<F>, Error> {
		ensure!(
			index < self.leaves.len(),
			Error::IndexOutOfRange {
				max: self.leaves.len() - 1
			}
		);

		let mut path = Vec::with_capacity(self.log_len);
		let sibling = match self.leaves.get(index ^ 1) {
			Some(&value) => MerkleNode::Value(value),
			None => MerkleNode::Padding,
		};
		path.push((index & 1 == 1, sibling));

		for level in 1..self.log_len {
			let layer_start = (1 << self.log_len) - (1 << (self.log_len + 1 - level));
			let position = index >> level;
			path.push((
				position & 1 == 1,
				MerkleNode::Value(self.inner_nodes[layer_start + (position ^ 1)]),
			));
		}
		Ok(MerkleProof { path })
	}
}

fn compress_layer<F, C>(compression: &C, layer: &[F]) -> Vec<F>
where
	F: FieldExt,
	C: PaddedCompressionFunction<F> + Sync,
{
	layer
		.par_chunks_exact(2)
		.with_min_len(min_len_per_task(layer.len() / 2))
		.map(|pair| compression.compress([pair[0], pair[1]]))
		.collect()
}

/// Left fold of the compression over a row: `H(H(H(r0, r1), r2), ...)`.
///
/// A one-element row digests to itself; an empty row digests to the hash of two sentinels.
pub fn row_digest<F, C>(compression: &C, row: &[F]) -> F
where
	F: FieldExt,
	C: PaddedCompressionFunction<F>,
{
	row.iter()
		.copied()
		.reduce(|acc, value| compression.compress([acc, value]))
		.unwrap_or_else(|| compression.compress_padded(None, None))
}

/// Folds `leaf` up through `proof` and compares the result with `root`.
pub fn verify<F, C>(compression: &C, root: F, leaf: F, proof: &MerkleProof<F>) -> bool
where
	F: FieldExt,
	C: PaddedCompressionFunction<F>,
{
	let folded = proof
		.path
		.iter()
		.fold(leaf, |node, &(sibling_is_left, sibling)| {
			if sibling_is_left {
				compression.compress_padded(sibling.value(), Some(node))
			} else {
				compression.compress_padded(Some(node), sibling.value())
			}
		});
	folded == root
}

/// Checks an opening of leaf `index` in a tree of depth `depth`.
///
/// Unlike [`verify`], this also binds the proof to the expected position, so a valid path for a
/// different leaf is rejected.
pub fn verify_opening<F, C>(
	compression: &C,
	root: F,
	index: usize,
	depth: usize,
	leaf: F,
	proof: &MerkleProof<F>,
) -> Result<(), VerificationError>
where
	F: FieldExt,
	C: PaddedCompressionFunction<F>,
{
	if proof.depth() != depth || proof.leaf_index() != index {
		bail!(VerificationError::IncorrectProofShape);
	}
	if !verify(compression, root, leaf, proof) {
		bail!(VerificationError::InvalidProof);
	}
	Ok(())
}
