// Copyright 2024 Irreducible Inc.

use ecstark_field::{FieldExt, UniformRand};
use ecstark_hash::PaddedCompressionFunction;
use ecstark_math::{EvaluationDomain, Polynomial, Trace};
use ecstark_utils::rayon::min_len_per_task;
use rand::Rng;
use rayon::prelude::*;
use tracing::instrument;

use super::{
	common::{Proof, ProofOptions, RowOpening, TraceQuery},
	constraint::Constraint,
	error::Error,
	validate::check_trace_shape,
	ConstraintSystem,
};
use crate::{
	fiat_shamir::{CanObserve, CanSample, CanSampleBits, Channel},
	merkle_tree::MerkleTree,
	protocols::fri::FriProver,
};

/// The trace extended over the LDE coset, one row per coset point.
pub(super) struct TraceExtension<F> {
	pub(super) rows: Vec<Vec<F>>,
	pub(super) tree: MerkleTree<F>,
}

/// Generates a proof that `trace` satisfies `constraint_system`.
///
/// Every column is blinded with randomness drawn from `rng` before it is committed, so the opened
/// rows do not reveal the trace. The proof is a deterministic function of the trace and the
/// state of `rng`.
///
/// ## Throws
///
/// * [`Error::InvalidWitness`] naming the first constraint whose numerator is not divisible by its
///   vanishing polynomial
#[instrument("constraint_system::prove", skip_all, level = "debug")]
pub fn prove<F, C>(
	constraint_system: &ConstraintSystem<F>,
	trace: &Trace<F>,
	compression: &C,
	options: &ProofOptions,
	rng: impl Rng,
) -> Result<Proof<F>, Error>
where
	F: FieldExt,
	C: PaddedCompressionFunction<F> + Clone + Sync,
{
	check_trace_shape(constraint_system, trace)?;

	let mut channel = Channel::new(compression.clone());
	let log_blowup = constraint_system.lde_log_blowup(options);
	let trace_domain = EvaluationDomain::subgroup(constraint_system.log_n_rows())?;
	let lde_domain = EvaluationDomain::coset(constraint_system.log_n_rows() + log_blowup)?;

	let extension = extend_trace(
		trace,
		&trace_domain,
		&lde_domain,
		compression,
		options.hiding_degree(),
		rng,
	)?;
	channel.send("trace_root", extension.tree.root());

	let quotients = constraint_system
		.constraints()
		.par_iter()
		.map(|constraint| {
			constraint_quotient(
				constraint,
				&extension.rows,
				1 << log_blowup,
				&lde_domain,
				&trace_domain,
			)
		})
		.collect::<Result<Vec<_>, _>>()?;

	let gammas = channel.sample_vec(quotients.len());
	let composition = compose(&quotients, &gammas);

	let fri_prover = FriProver::commit(compression, &mut channel, composition, &lde_domain)?;
	prove_queries(constraint_system, options, &mut channel, &extension, fri_prover)
}

/// Opens the trace rows and FRI layers for every query and assembles the proof.
pub(super) fn prove_queries<F, C>(
	constraint_system: &ConstraintSystem<F>,
	options: &ProofOptions,
	channel: &mut Channel<F, C>,
	extension: &TraceExtension<F>,
	fri_prover: FriProver<F>,
) -> Result<Proof<F>, Error>
where
	F: FieldExt,
	C: PaddedCompressionFunction<F>,
{
	let log_blowup = constraint_system.lde_log_blowup(options);
	let log_lde_size = constraint_system.log_n_rows() + log_blowup;
	let lde_size = 1 << log_lde_size;

	let mut trace_queries = Vec::with_capacity(options.n_queries());
	let mut fri_queries = Vec::with_capacity(options.n_queries());
	for _ in 0..options.n_queries() {
		let index = channel.sample_bits(log_lde_size);
		let next = (index + (1 << log_blowup)) % lde_size;
		let mut open_row = |row: usize| -> Result<RowOpening<F>, Error> {
			let values = extension.rows[row].clone();
			channel.observe_slice(&values);
			Ok(RowOpening {
				values,
				proof: extension.tree.get_proof(row)?,
			})
		};
		let current = open_row(index)?;
		let next = open_row(next)?;
		trace_queries.push(TraceQuery { current, next });
		fri_queries.push(fri_prover.open(channel, index)?);
	}

	Ok(Proof {
		trace_root: extension.tree.root(),
		trace_queries,
		fri: fri_prover.finish(fri_queries),
		transcript: channel.transcript().to_vec(),
	})
}

/// Interpolates every column over the trace subgroup, blinds it, evaluates it over the LDE coset
/// and commits to the resulting rows.
///
/// Blinding adds $(x^N - 1) \cdot r(x)$ for a random $r$ of degree `hiding_degree`, which leaves
/// the column unchanged on every trace row.
#[instrument(skip_all, level = "debug", fields(n_columns = trace.n_columns()))]
pub(super) fn extend_trace<F, C>(
	trace: &Trace<F>,
	trace_domain: &EvaluationDomain<F>,
	lde_domain: &EvaluationDomain<F>,
	compression: &C,
	hiding_degree: usize,
	mut rng: impl Rng,
) -> Result<TraceExtension<F>, Error>
where
	F: FieldExt,
	C: PaddedCompressionFunction<F> + Sync,
{
	let columns = trace.interpolate_columns(trace_domain)?;
	let masks = (0..columns.len())
		.map(|_| Polynomial::new((0..=hiding_degree).map(|_| F::rand(&mut rng)).collect()))
		.collect::<Vec<_>>();
	let lde_columns = columns
		.par_iter()
		.zip(&masks)
		.map(|(column, mask)| {
			column
				.add_vanishing_multiple(trace_domain.size(), mask)
				.evaluate_over(lde_domain)
		})
		.collect::<Result<Vec<_>, _>>()?;

	let lde_size = lde_domain.size();
	let rows = (0..lde_size)
		.into_par_iter()
		.with_min_len(min_len_per_task(lde_size))
		.map(|i| lde_columns.iter().map(|column| column[i]).collect())
		.collect::<Vec<Vec<F>>>();
	let tree = MerkleTree::commit_rows(compression, &rows)?;
	Ok(TraceExtension { rows, tree })
}

/// The quotient of one constraint's numerator by its vanishing polynomial.
///
/// The numerator is evaluated row by row over the LDE, where the successor of coset point `i` is
/// point `i + blowup`, then interpolated back.
#[instrument(skip_all, level = "trace", fields(constraint = %constraint.name))]
pub(super) fn constraint_quotient<F: FieldExt>(
	constraint: &Constraint<F>,
	lde_rows: &[Vec<F>],
	blowup: usize,
	lde_domain: &EvaluationDomain<F>,
	trace_domain: &EvaluationDomain<F>,
) -> Result<Polynomial<F>, Error> {
	let numerator = numerator(constraint, lde_rows, blowup, lde_domain)?;
	constraint
		.target
		.divide(&numerator, trace_domain.size(), trace_domain.generator())
		.map_err(|err| match err {
			ecstark_math::Error::InexactDivision => Error::InvalidWitness {
				name: constraint.name.clone(),
			},
			err => err.into(),
		})
}

pub(super) fn numerator<F: FieldExt>(
	constraint: &Constraint<F>,
	lde_rows: &[Vec<F>],
	blowup: usize,
	lde_domain: &EvaluationDomain<F>,
) -> Result<Polynomial<F>, Error> {
	let lde_size = lde_rows.len();
	let evaluations = (0..lde_size)
		.map(|i| {
			constraint.expr.evaluate(&|cell| {
				let row = (i + cell.offset.shift() * blowup) % lde_size;
				lde_rows[row][cell.register.index()]
			})
		})
		.collect::<Vec<_>>();
	Ok(Polynomial::interpolate_over(lde_domain, &evaluations)?)
}

/// $\sum_i \gamma_i \cdot q_i$
pub(super) fn compose<F: FieldExt>(quotients: &[Polynomial<F>], gammas: &[F]) -> Polynomial<F> {
	quotients
		.iter()
		.zip(gammas)
		.fold(Polynomial::zero(), |acc, (quotient, &gamma)| {
			&acc + &quotient.scale(gamma)
		})
}
