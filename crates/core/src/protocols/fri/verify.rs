// Copyright 2024 Ulvetanna Inc.

use ecstark_field::FieldExt;
use ecstark_hash::PaddedCompressionFunction;
use ecstark_math::EvaluationDomain;
use ecstark_utils::{bail, ensure};
use itertools::izip;
use tracing::instrument;

use super::{
	common::{fold_pair, FriParams, FriProof, FriQueryProof},
	error::{Error, VerificationError},
};
use crate::{
	fiat_shamir::{CanSample, CanSampleBits, Channel},
	merkle_tree::verify_opening,
};

/// A verifier for the FRI query phase.
///
/// The verifier is instantiated by replaying the commit phase on the channel, which also fixes
/// the folding challenges. It then checks query rounds one at a time.
#[derive(Debug)]
pub struct FriVerifier<'a, F> {
	params: &'a FriParams,
	layer_roots: &'a [F],
	final_value: F,
	/// The folding challenge of each committed layer.
	betas: Vec<F>,
	/// The evaluation domain of each committed layer.
	domains: Vec<EvaluationDomain<F>>,
}

impl<'a, F: FieldExt> FriVerifier<'a, F> {
	/// Replays the commit phase: sends every root, draws every challenge and sends the final
	/// constant, in the prover's order.
	///
	/// ## Throws
	///
	/// * [`VerificationError::TooManyLayers`] if the prover committed to more layers than a
	///   polynomial within the degree bound needs, or than the domain can be halved
	pub fn new<C>(
		params: &'a FriParams,
		channel: &mut Channel<F, C>,
		layer_roots: &'a [F],
		final_value: F,
		domain: &EvaluationDomain<F>,
	) -> Result<Self, Error>
	where
		C: PaddedCompressionFunction<F>,
	{
		let n_layers = layer_roots.len();
		ensure!(n_layers > 0, VerificationError::NoLayers);
		let max_layers = params.max_committed_layers().min(domain.log_size());
		ensure!(n_layers <= max_layers, VerificationError::TooManyLayers { n_layers, max_layers });

		let mut betas = Vec::with_capacity(n_layers);
		let mut domains = Vec::with_capacity(n_layers);
		let mut layer_domain = domain.clone();
		for (i, &root) in layer_roots.iter().enumerate() {
			channel.send(format!("fri_layer_{i}"), root);
			betas.push(channel.sample());
			let next_domain = layer_domain.squared()?;
			domains.push(layer_domain);
			layer_domain = next_domain;
		}
		channel.send("fri_final", final_value);

		Ok(Self {
			params,
			layer_roots,
			final_value,
			betas,
			domains,
		})
	}

	pub fn n_layers(&self) -> usize {
		self.layer_roots.len()
	}

	pub const fn params(&self) -> &FriParams {
		self.params
	}

	/// Checks one query round at layer-0 position `index` and returns the opened $f(x)$ there.
	///
	/// Every opened value is sent to the channel, as the prover did.
	pub fn verify_query<C>(
		&self,
		compression: &C,
		channel: &mut Channel<F, C>,
		query_round: usize,
		index: usize,
		query: &FriQueryProof<F>,
	) -> Result<F, Error>
	where
		C: PaddedCompressionFunction<F>,
	{
		if query.layers.len() != self.n_layers() {
			bail!(VerificationError::IncorrectQueryProofLength {
				expected: self.n_layers(),
			});
		}

		let mut index = index;
		let mut expected = None;
		for (layer, (opening, &root, &beta, domain)) in
			izip!(&query.layers, self.layer_roots, &self.betas, &self.domains).enumerate()
		{
			let size = domain.size();
			let position = index % size;
			let sibling = (position + size / 2) % size;
			let opening_error = |source| VerificationError::MerkleProofMismatch {
				query_round,
				layer,
				source,
			};
			verify_opening(
				compression,
				root,
				position,
				domain.log_size(),
				opening.value,
				&opening.proof,
			)
			.map_err(opening_error)?;
			verify_opening(
				compression,
				root,
				sibling,
				domain.log_size(),
				opening.sibling_value,
				&opening.sibling_proof,
			)
			.map_err(opening_error)?;

			if let Some(expected) = expected {
				ensure!(
					opening.value == expected,
					VerificationError::IncorrectFold { query_round, layer }
				);
			}
			channel.send("fri_query", opening.value);
			channel.send("fri_query", opening.sibling_value);

			let x = domain.element(position);
			expected = Some(fold_pair(x, opening.value, opening.sibling_value, beta)?);
			index = position % (size / 2);
		}

		ensure!(
			expected == Some(self.final_value),
			VerificationError::IncorrectFold {
				query_round,
				layer: self.n_layers(),
			}
		);
		Ok(query.layers[0].value)
	}
}

/// Verifies a proof produced by [`super::prove`] for a polynomial committed over `domain`.
#[instrument("fri::verify", skip_all, level = "debug")]
pub fn verify<F, C>(
	params: &FriParams,
	compression: &C,
	channel: &mut Channel<F, C>,
	proof: &FriProof<F>,
	domain: &EvaluationDomain<F>,
) -> Result<(), Error>
where
	F: FieldExt,
	C: PaddedCompressionFunction<F>,
{
	let verifier = FriVerifier::new(params, channel, &proof.layer_roots, proof.final_value, domain)?;
	ensure!(
		proof.queries.len() == params.n_queries(),
		VerificationError::IncorrectQueryCount {
			expected: params.n_queries(),
			actual: proof.queries.len(),
		}
	);
	for (query_round, query) in proof.queries.iter().enumerate() {
		let index = channel.sample_bits(domain.log_size());
		verifier.verify_query(compression, channel, query_round, index, query)?;
	}
	Ok(())
}
