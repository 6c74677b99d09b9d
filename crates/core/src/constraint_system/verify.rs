// Copyright 2024 Irreducible Inc.

use ecstark_field::FieldExt;
use ecstark_hash::PaddedCompressionFunction;
use ecstark_math::{EvaluationDomain, RowOffset};
use ecstark_utils::ensure;
use tracing::instrument;

use super::{
	common::{Proof, ProofOptions, RowOpening},
	error::{Error, VerificationError},
	ConstraintSystem,
};
use crate::{
	fiat_shamir::{CanObserve, CanSample, CanSampleBits, Channel},
	merkle_tree::{row_digest, verify_opening},
	protocols::fri::{FriParams, FriVerifier},
};

/// Verifies a proof produced by [`super::prove`] against `constraint_system`.
///
/// The verifier replays the prover's channel: challenges are re-derived from the received
/// commitments and openings, and the resulting transcript must equal the one in the proof.
///
/// ## Throws
///
/// * [`Error::Verification`] for every reason to reject the proof
#[instrument("constraint_system::verify", skip_all, level = "debug")]
pub fn verify<F, C>(
	constraint_system: &ConstraintSystem<F>,
	proof: &Proof<F>,
	compression: &C,
	options: &ProofOptions,
) -> Result<(), Error>
where
	F: FieldExt,
	C: PaddedCompressionFunction<F> + Clone,
{
	let n_rows = constraint_system.n_rows();
	let n_columns = constraint_system.layout().n_registers();
	let log_blowup = constraint_system.lde_log_blowup(options);
	let log_lde_size = constraint_system.log_n_rows() + log_blowup;
	let trace_domain = EvaluationDomain::subgroup(constraint_system.log_n_rows())?;
	let lde_domain = EvaluationDomain::coset(log_lde_size)?;

	let mut channel = Channel::new(compression.clone());
	channel.send("trace_root", proof.trace_root);
	let gammas: Vec<F> = channel.sample_vec(constraint_system.constraints().len());

	let fri_params =
		FriParams::new(constraint_system.composition_degree_bound(options), options.n_queries());
	let fri_verifier = FriVerifier::new(
		&fri_params,
		&mut channel,
		&proof.fri.layer_roots,
		proof.fri.final_value,
		&lde_domain,
	)
	.map_err(fri_rejection)?;

	ensure!(
		proof.trace_queries.len() == options.n_queries()
			&& proof.fri.queries.len() == options.n_queries(),
		VerificationError::IncorrectQueryCount {
			expected: options.n_queries(),
			actual: proof.trace_queries.len(),
		}
	);

	for (query, (trace_query, fri_query)) in proof
		.trace_queries
		.iter()
		.zip(&proof.fri.queries)
		.enumerate()
	{
		let index = channel.sample_bits(log_lde_size);
		let next = (index + (1 << log_blowup)) % lde_domain.size();

		let mut check_row = |opening: &RowOpening<F>, row: usize| -> Result<(), Error> {
			ensure!(
				opening.values.len() == n_columns,
				VerificationError::IncorrectOpeningWidth {
					query,
					expected: n_columns,
				}
			);
			verify_opening(
				compression,
				proof.trace_root,
				row,
				log_lde_size,
				row_digest(compression, &opening.values),
				&opening.proof,
			)
			.map_err(|source| VerificationError::MerkleProofMismatch { query, source })?;
			channel.observe_slice(&opening.values);
			Ok(())
		};
		check_row(&trace_query.current, index)?;
		check_row(&trace_query.next, next)?;

		let x = lde_domain.element(index);
		let mut composition = F::zero();
		for (constraint, &gamma) in constraint_system.constraints().iter().zip(&gammas) {
			let numerator = constraint.expr.evaluate(&|cell| {
				let row = match cell.offset {
					RowOffset::Current => &trace_query.current,
					RowOffset::Next => &trace_query.next,
				};
				row.values[cell.register.index()]
			});
			let vanishing = constraint
				.target
				.evaluate_vanishing(x, n_rows, trace_domain.generator())?;
			composition += gamma * numerator * vanishing.checked_inverse()?;
		}

		let fri_value = fri_verifier
			.verify_query(compression, &mut channel, query, index, fri_query)
			.map_err(fri_rejection)?;
		ensure!(fri_value == composition, VerificationError::CompositionMismatch { query });
	}

	ensure!(
		channel.transcript() == proof.transcript.as_slice(),
		VerificationError::TranscriptMismatch
	);
	tracing::debug!(n_queries = options.n_queries(), "proof accepted");
	Ok(())
}

/// FRI rejections surface as verification errors of the whole proof.
fn fri_rejection(err: crate::protocols::fri::Error) -> Error {
	match err {
		crate::protocols::fri::Error::Verification(err) => VerificationError::Fri(err).into(),
		err => err.into(),
	}
}
