// Copyright 2024-2025 Irreducible Inc.

use std::sync::Arc;

use assert_matches::assert_matches;
use ecstark_field::{Field, FieldExt, ToyField, Zero};
use ecstark_hash::{toy_pedersen_params, PaddedCompressionFunction, PedersenHash};
use ecstark_math::{
	ArithExpr, EvaluationDomain, Polynomial, Register, Trace, TraceBuilder, TraceLayout,
};
use rand::{rngs::StdRng, SeedableRng};

use super::{
	error::{Error, VerificationError},
	prove::{compose, extend_trace, numerator, prove_queries},
	validate::validate_witness,
	ConstraintSystem, ConstraintTarget, Proof, ProofOptions,
};
use crate::{
	fiat_shamir::{CanSample, Channel},
	protocols::fri::FriProver,
};

type F = ToyField;

const N_ROWS: usize = 16;

struct Fibonacci {
	a: Register,
	b: Register,
	product: Register,
	constraint_system: ConstraintSystem<F>,
}

/// `a' = b`, `b' = a + b` from `(1, 1)`, with the last `b` pinned and a degree-2 product column.
fn fibonacci() -> Fibonacci {
	let mut layout = TraceLayout::new();
	let a = layout.add_register("a").unwrap();
	let b = layout.add_register("b").unwrap();
	let product = layout.add_register("product").unwrap();

	let mut cs = ConstraintSystem::new(Arc::new(layout), N_ROWS).unwrap();
	cs.assert_transition("shift", ArithExpr::next(a) - ArithExpr::cur(b))
		.unwrap();
	cs.assert_transition(
		"sum",
		ArithExpr::next(b) - ArithExpr::cur(a) - ArithExpr::cur(b),
	)
	.unwrap();
	cs.assert_zero(
		"product",
		ArithExpr::cur(product) - ArithExpr::cur(a) * ArithExpr::cur(b),
	)
	.unwrap();
	cs.assert_boundary("a_first", a, 0, F::from(1u64)).unwrap();
	cs.assert_boundary("b_first", b, 0, F::from(1u64)).unwrap();
	// Row i holds the Fibonacci numbers i + 1 and i + 2.
	cs.assert_boundary("b_last", b, N_ROWS - 1, F::from(1597u64))
		.unwrap();

	Fibonacci {
		a,
		b,
		product,
		constraint_system: cs,
	}
}

/// The honest trace, except that the product cell of `corrupt_row` is off by one.
fn fibonacci_trace(air: &Fibonacci, corrupt_row: Option<usize>) -> Trace<F> {
	let mut builder = TraceBuilder::new(air.constraint_system.layout().clone(), N_ROWS);
	let (mut a, mut b) = (F::from(1u64), F::from(1u64));
	for row in 0..N_ROWS {
		let error = if corrupt_row == Some(row) {
			F::from(1u64)
		} else {
			F::zero()
		};
		builder.write(air.a, a).unwrap();
		builder.write(air.b, b).unwrap();
		builder.write(air.product, a * b + error).unwrap();
		builder.next_row().unwrap();
		(a, b) = (b, a + b);
	}
	builder.finish().unwrap()
}

fn toy_hash() -> PedersenHash<F> {
	PedersenHash::new(toy_pedersen_params()).unwrap()
}

fn rng() -> StdRng {
	StdRng::seed_from_u64(0)
}

/// Runs the honest pipeline, but drops the remainder of every division by the vanishing polynomial
/// instead of failing on it.
pub(crate) fn prove_dropping_remainders<Fe, C>(
	cs: &ConstraintSystem<Fe>,
	trace: &Trace<Fe>,
	compression: &C,
	options: &ProofOptions,
) -> Proof<Fe>
where
	Fe: FieldExt,
	C: PaddedCompressionFunction<Fe> + Clone + Sync,
{
	let log_blowup = cs.lde_log_blowup(options);
	let trace_domain = EvaluationDomain::subgroup(cs.log_n_rows()).unwrap();
	let lde_domain = EvaluationDomain::coset(cs.log_n_rows() + log_blowup).unwrap();
	let mut channel = Channel::new(compression.clone());
	let extension = extend_trace(
		trace,
		&trace_domain,
		&lde_domain,
		compression,
		options.hiding_degree(),
		rng(),
	)
	.unwrap();
	channel.send("trace_root", extension.tree.root());
	let quotients = cs
		.constraints()
		.iter()
		.map(|constraint| {
			let roots = constraint
				.target
				.rows(cs.n_rows())
				.into_iter()
				.map(|row| trace_domain.element(row))
				.collect::<Vec<_>>();
			let numerator =
				numerator(constraint, &extension.rows, 1 << log_blowup, &lde_domain).unwrap();
			let (quotient, _) = numerator.div_rem(&Polynomial::vanishing(&roots)).unwrap();
			quotient
		})
		.collect::<Vec<_>>();
	let gammas = channel.sample_vec(quotients.len());
	let composition = compose(&quotients, &gammas);
	let fri_prover =
		FriProver::commit(compression, &mut channel, composition, &lde_domain).unwrap();
	prove_queries(cs, options, &mut channel, &extension, fri_prover).unwrap()
}

#[test]
fn test_prove_verify_fibonacci() {
	let air = fibonacci();
	let trace = fibonacci_trace(&air, None);
	validate_witness(&air.constraint_system, &trace).unwrap();

	let hash = toy_hash();
	let options = ProofOptions::new(2, 8);
	let proof = super::prove(&air.constraint_system, &trace, &hash, &options, rng()).unwrap();
	assert_eq!(proof.trace_queries.len(), 8);
	assert_eq!(proof.trace_root, proof.transcript[0].1);
	assert!(proof.size_in_elements() > 0);

	super::verify(&air.constraint_system, &proof, &hash, &options).unwrap();
}

#[test]
fn test_constraint_system_degrees() {
	let air = fibonacci();
	let cs = &air.constraint_system;
	let options = ProofOptions::new(2, 4);
	assert_eq!(cs.max_degree(), 2);
	// Columns are blinded up to degree 16 + 2 * 4, so the product quotient has degree 48 - 16.
	assert_eq!(cs.column_degree_bound(&options), 24);
	assert_eq!(cs.composition_degree_bound(&options), 32);
	// 49 numerator coefficients fit an extension of 64 points.
	assert_eq!(cs.lde_log_blowup(&options), 2);
	assert_eq!(cs.lde_log_blowup(&ProofOptions::new(3, 4)), 3);
	assert_eq!(cs.lde_log_blowup(&ProofOptions::new(2, 16)), 3);
}

#[test]
fn test_validate_witness_reports_first_failure() {
	let air = fibonacci();
	let trace = fibonacci_trace(&air, Some(5));
	assert_matches!(
		validate_witness(&air.constraint_system, &trace),
		Err(Error::UnsatisfiedConstraint { name, row: 5 }) if name == "product"
	);
}

#[test]
fn test_invalid_witness_is_rejected_by_prover() {
	let air = fibonacci();
	let trace = fibonacci_trace(&air, Some(5));
	let options = ProofOptions::new(2, 4);
	assert_matches!(
		super::prove(&air.constraint_system, &trace, &toy_hash(), &options, rng()),
		Err(Error::InvalidWitness { name }) if name == "product"
	);
}

#[test]
fn test_prove_rejects_mismatched_trace() {
	let air = fibonacci();
	let mut layout = TraceLayout::new();
	let x = layout.add_register("x").unwrap();
	let mut builder = TraceBuilder::new(Arc::new(layout), N_ROWS);
	builder.fill(x, 0..N_ROWS, F::from(1u64)).unwrap();
	let trace = builder.finish().unwrap();

	let options = ProofOptions::new(2, 4);
	assert_matches!(
		super::prove(&air.constraint_system, &trace, &toy_hash(), &options, rng()),
		Err(Error::TraceShapeMismatch {
			n_columns: 1,
			n_rows: N_ROWS
		})
	);
}

#[test]
fn test_extension_grows_with_degree() {
	let mut air = fibonacci();
	let trace = fibonacci_trace(&air, None);
	let (a, b, product) = (
		ArithExpr::cur(air.a),
		ArithExpr::cur(air.b),
		ArithExpr::cur(air.product),
	);
	air.constraint_system
		.assert_zero("cubic", product.clone() * a * b - product.square())
		.unwrap();
	assert_eq!(air.constraint_system.max_degree(), 3);
	validate_witness(&air.constraint_system, &trace).unwrap();

	// 3 * 24 + 1 numerator coefficients need 128 points, a blowup of 8.
	let hash = toy_hash();
	let options = ProofOptions::new(1, 4);
	assert_eq!(air.constraint_system.lde_log_blowup(&options), 3);
	let proof = super::prove(&air.constraint_system, &trace, &hash, &options, rng()).unwrap();
	super::verify(&air.constraint_system, &proof, &hash, &options).unwrap();
}

#[test]
fn test_malformed_constraints_are_rejected() {
	let mut air = fibonacci();
	let cs = &mut air.constraint_system;
	assert_matches!(
		cs.assert_zero("wraps", ArithExpr::next(air.a)),
		Err(Error::NextRowOnLastRow { .. })
	);
	assert_matches!(
		cs.assert_at("late", ArithExpr::cur(air.a), vec![N_ROWS]),
		Err(Error::TargetRowOutOfRange { row: N_ROWS, .. })
	);
	assert_matches!(
		cs.assert_at("nowhere", ArithExpr::cur(air.a), vec![]),
		Err(Error::EmptyTarget { .. })
	);
	let mut wider = TraceLayout::new();
	let stranger = (0..8)
		.map(|i| wider.add_register(format!("r{i}")).unwrap())
		.last()
		.unwrap();
	assert_matches!(
		cs.assert_zero("stranger", ArithExpr::cur(stranger)),
		Err(Error::UnknownRegister { .. })
	);
	assert_matches!(
		ConstraintSystem::<F>::new(cs.layout().clone(), 12),
		Err(Error::InvalidTraceLength { n_rows: 12 })
	);
}

#[test]
fn test_tampered_proofs_are_rejected() {
	let air = fibonacci();
	let trace = fibonacci_trace(&air, None);
	let hash = toy_hash();
	let options = ProofOptions::new(2, 4);
	let proof = super::prove(&air.constraint_system, &trace, &hash, &options, rng()).unwrap();

	let mut tampered = proof.clone();
	tampered.trace_queries[0].current.values[0] += F::from(1u64);
	assert_matches!(
		super::verify(&air.constraint_system, &tampered, &hash, &options),
		Err(Error::Verification(VerificationError::MerkleProofMismatch { query: 0, .. }))
	);

	let mut tampered = proof.clone();
	tampered.trace_queries[1].next.values.pop();
	assert_matches!(
		super::verify(&air.constraint_system, &tampered, &hash, &options),
		Err(Error::Verification(VerificationError::IncorrectOpeningWidth {
			query: 1,
			expected: 3
		}))
	);

	let mut tampered = proof.clone();
	tampered.trace_queries.pop();
	assert_matches!(
		super::verify(&air.constraint_system, &tampered, &hash, &options),
		Err(Error::Verification(VerificationError::IncorrectQueryCount {
			expected: 4,
			actual: 3
		}))
	);

	let mut tampered = proof.clone();
	let last = tampered.transcript.len() - 1;
	tampered.transcript[last].1 += F::from(1u64);
	assert_matches!(
		super::verify(&air.constraint_system, &tampered, &hash, &options),
		Err(Error::Verification(VerificationError::TranscriptMismatch))
	);

	let mut tampered = proof;
	tampered.trace_root += F::from(1u64);
	assert_matches!(
		super::verify(&air.constraint_system, &tampered, &hash, &options),
		Err(Error::Verification(_))
	);
}

#[test]
fn test_cheating_prover_is_rejected() {
	let air = fibonacci();
	let cs = &air.constraint_system;
	let trace = fibonacci_trace(&air, Some(5));
	let hash = toy_hash();
	let options = ProofOptions::new(2, 8);

	let proof = prove_dropping_remainders(cs, &trace, &hash, &options);
	assert_matches!(super::verify(cs, &proof, &hash, &options), Err(Error::Verification(_)));
}

#[test]
fn test_blinding_depends_only_on_rng() {
	let air = fibonacci();
	let cs = &air.constraint_system;
	let trace = fibonacci_trace(&air, None);
	let hash = toy_hash();
	let options = ProofOptions::new(2, 4);

	let proof = super::prove(cs, &trace, &hash, &options, rng()).unwrap();
	let again = super::prove(cs, &trace, &hash, &options, rng()).unwrap();
	assert_eq!(proof.transcript, again.transcript);

	let other = super::prove(cs, &trace, &hash, &options, StdRng::seed_from_u64(1)).unwrap();
	assert_ne!(proof.trace_root, other.trace_root);
	super::verify(cs, &proof, &hash, &options).unwrap();
	super::verify(cs, &other, &hash, &options).unwrap();
}

#[test]
fn test_opened_rows_are_blinded() {
	let air = fibonacci();
	let cs = &air.constraint_system;
	let trace = fibonacci_trace(&air, None);
	let hash = toy_hash();
	let options = ProofOptions::new(2, 4);

	// Without blinding, each opened value would be the column interpolant at the coset point.
	let log_blowup = cs.lde_log_blowup(&options);
	let trace_domain = EvaluationDomain::subgroup(cs.log_n_rows()).unwrap();
	let lde_domain = EvaluationDomain::coset(cs.log_n_rows() + log_blowup).unwrap();
	let columns = trace.interpolate_columns(&trace_domain).unwrap();
	let plain = columns
		.iter()
		.map(|column| column.evaluate_over(&lde_domain).unwrap())
		.collect::<Vec<_>>();

	let proof = super::prove(cs, &trace, &hash, &options, rng()).unwrap();
	for query in &proof.trace_queries {
		for opening in [&query.current, &query.next] {
			for (column, value) in plain.iter().zip(&opening.values) {
				assert!(!column.contains(value));
			}
		}
	}
}

#[test]
fn test_vanishing_polynomials_match_targets() {
	let domain = EvaluationDomain::<F>::subgroup(3).unwrap();
	let x = F::from(12345u64);
	for target in [
		ConstraintTarget::AllRows,
		ConstraintTarget::AllButLast,
		ConstraintTarget::Rows(vec![0, 3, 7]),
	] {
		let roots = target
			.rows(8)
			.into_iter()
			.map(|row| domain.element(row))
			.collect::<Vec<_>>();
		assert_eq!(
			target
				.evaluate_vanishing(x, 8, domain.generator())
				.unwrap(),
			Polynomial::vanishing(&roots).evaluate(x)
		);
		assert_eq!(target.vanishing_degree(8), roots.len());
	}
	assert!(domain.generator().pow([8u64]) == F::from(1u64));
}
