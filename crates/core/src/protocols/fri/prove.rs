// Copyright 2024-2025 Irreducible Inc.

use ecstark_field::FieldExt;
use ecstark_hash::{PaddedCompressionFunction, PseudoCompressionFunction};
use ecstark_math::{EvaluationDomain, Polynomial};
use ecstark_utils::ensure;
use tracing::instrument;

use super::{
	common::{FriLayerOpening, FriParams, FriProof, FriQueryProof},
	error::Error,
};
use crate::{
	fiat_shamir::{CanSample, CanSampleBits, Channel},
	merkle_tree::MerkleTree,
};

#[derive(Debug)]
pub(super) struct CommittedLayer<F> {
	pub(super) domain: EvaluationDomain<F>,
	pub(super) tree: MerkleTree<F>,
}

/// The FRI prover after the commit phase, ready to answer queries.
#[derive(Debug)]
pub struct FriProver<F> {
	pub(super) layers: Vec<CommittedLayer<F>>,
	pub(super) final_value: F,
}

impl<F: FieldExt> FriProver<F> {
	/// Runs the commit phase on `poly` over `domain`.
	///
	/// Layer 0 is always committed. Each committed layer is folded exactly once, and folding
	/// stops when the result is constant; that constant is sent in the clear.
	#[instrument("fri::commit", skip_all, level = "debug", fields(log_size = domain.log_size()))]
	pub fn commit<C>(
		compression: &C,
		channel: &mut Channel<F, C>,
		poly: Polynomial<F>,
		domain: &EvaluationDomain<F>,
	) -> Result<Self, Error>
	where
		C: PaddedCompressionFunction<F> + Sync,
	{
		let mut layers = Vec::new();
		let mut poly = poly;
		let mut domain = domain.clone();
		let final_value = loop {
			let evaluations = poly.evaluate_over(&domain)?;
			let tree = MerkleTree::build(compression, evaluations)?;
			channel.send(format!("fri_layer_{}", layers.len()), tree.root());

			let beta = channel.sample();
			poly = poly.fold(beta);
			let next_domain = domain.squared()?;
			layers.push(CommittedLayer { domain, tree });
			domain = next_domain;

			if poly.degree().unwrap_or(0) == 0 {
				break poly.coeff(0);
			}
		};
		channel.send("fri_final", final_value);
		tracing::debug!(n_layers = layers.len(), "FRI commit phase finished");

		Ok(Self {
			layers,
			final_value,
		})
	}

	pub fn n_layers(&self) -> usize {
		self.layers.len()
	}

	pub fn layer_roots(&self) -> Vec<F> {
		self.layers.iter().map(|layer| layer.tree.root()).collect()
	}

	pub const fn final_value(&self) -> F {
		self.final_value
	}

	/// Opens the pair at `index` of layer 0, and the derived pair at every later layer.
	///
	/// Every opened value is sent to the channel.
	///
	/// ## Throws
	///
	/// * [`Error::QueryIndexOutOfRange`] if `index` is not a position of layer 0
	pub fn open<C>(
		&self,
		channel: &mut Channel<F, C>,
		index: usize,
	) -> Result<FriQueryProof<F>, Error>
	where
		C: PseudoCompressionFunction<F, 2>,
	{
		let domain_size = self.layers[0].domain.size();
		ensure!(index < domain_size, Error::QueryIndexOutOfRange { index, domain_size });

		let mut layers = Vec::with_capacity(self.layers.len());
		let mut index = index;
		for layer in &self.layers {
			let size = layer.domain.size();
			let position = index % size;
			let sibling = (position + size / 2) % size;
			let opening = FriLayerOpening {
				value: layer.tree.leaves()[position],
				sibling_value: layer.tree.leaves()[sibling],
				proof: layer.tree.get_proof(position)?,
				sibling_proof: layer.tree.get_proof(sibling)?,
			};
			channel.send("fri_query", opening.value);
			channel.send("fri_query", opening.sibling_value);
			layers.push(opening);
			index = position % (size / 2);
		}
		Ok(FriQueryProof { layers })
	}

	pub fn finish(self, queries: Vec<FriQueryProof<F>>) -> FriProof<F> {
		FriProof {
			layer_roots: self.layer_roots(),
			final_value: self.final_value,
			queries,
		}
	}
}

/// Runs both FRI phases on their own, drawing query positions from the channel.
#[instrument("fri::prove", skip_all, level = "debug")]
pub fn prove<F, C>(
	params: &FriParams,
	compression: &C,
	channel: &mut Channel<F, C>,
	poly: Polynomial<F>,
	domain: &EvaluationDomain<F>,
) -> Result<FriProof<F>, Error>
where
	F: FieldExt,
	C: PaddedCompressionFunction<F> + Sync,
{
	let prover = FriProver::commit(compression, channel, poly, domain)?;
	let queries = (0..params.n_queries())
		.map(|_| {
			let index = channel.sample_bits(domain.log_size());
			prover.open(channel, index)
		})
		.collect::<Result<Vec<_>, _>>()?;
	Ok(prover.finish(queries))
}
