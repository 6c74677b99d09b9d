// Copyright 2024-2025 Irreducible Inc.

use assert_matches::assert_matches;
use ecstark_core::{
	constraint_system::{self, ProofOptions},
	statements::{Error, PedersenMembershipAir},
};
use ecstark_field::{FieldExt, StarkField, ToyField, UniformRand};
use ecstark_hash::{stark_pedersen_params, toy_pedersen_params, PedersenHash, PedersenParams};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A five-element public set holding `Hash(a, b)` at a random position.
fn commitment_set<F: FieldExt>(rng: &mut StdRng, hash: &PedersenHash<F>, a: F, b: F) -> Vec<F> {
	let mut set = (0..4)
		.map(|_| hash.hash(F::rand(rng), F::rand(rng)))
		.collect::<Vec<_>>();
	set.insert(rng.gen_range(0..=set.len()), hash.hash(a, b));
	set
}

fn round_trip<F: FieldExt>(params: PedersenParams<F>, options: ProofOptions) {
	let mut rng = StdRng::seed_from_u64(0);
	let hash = PedersenHash::new(params).unwrap();
	let (a, b) = (F::rand(&mut rng), F::rand(&mut rng));
	let set = commitment_set(&mut rng, &hash, a, b);
	let air = PedersenMembershipAir::new(hash, b, set.clone()).unwrap();

	let proof = air.prove(a, &options, &mut rng).unwrap();
	air.verify(&proof, &options).unwrap();

	// The same proof does not carry over to a different public input.
	let other = PedersenMembershipAir::new(air.hash().clone(), b + F::one(), set).unwrap();
	assert_matches!(
		other.verify(&proof, &options),
		Err(Error::ConstraintSystem(constraint_system::error::Error::Verification(_)))
	);

	// A witness that hashes outside the set cannot be proven.
	let a_prime = a + F::one();
	assert!(!air.set().contains(&air.hash().hash(a_prime, b)));
	assert_matches!(
		air.prove(a_prime, &options, &mut rng),
		Err(Error::ConstraintSystem(constraint_system::error::Error::InvalidWitness { name }))
			if name == "set.member"
	);
}

#[test]
fn test_toy_round_trip() {
	round_trip::<ToyField>(toy_pedersen_params(), ProofOptions::default());
}

#[test]
fn test_toy_proof_is_deterministic() {
	let mut rng = StdRng::seed_from_u64(1);
	let hash = PedersenHash::new(toy_pedersen_params()).unwrap();
	let (a, b) = (ToyField::rand(&mut rng), ToyField::rand(&mut rng));
	let set = commitment_set(&mut rng, &hash, a, b);
	let air = PedersenMembershipAir::new(hash, b, set).unwrap();
	let options = ProofOptions::new(2, 4);

	let proof = air.prove(a, &options, StdRng::seed_from_u64(7)).unwrap();
	let again = air.prove(a, &options, StdRng::seed_from_u64(7)).unwrap();
	assert_eq!(proof.trace_root, again.trace_root);
	assert_eq!(proof.transcript, again.transcript);
	assert_eq!(proof.fri, again.fri);

	let reblinded = air.prove(a, &options, StdRng::seed_from_u64(8)).unwrap();
	assert_ne!(proof.trace_root, reblinded.trace_root);
	air.verify(&reblinded, &options).unwrap();
}

#[test]
fn test_toy_openings_do_not_reveal_the_secret() {
	let mut rng = StdRng::seed_from_u64(3);
	let hash = PedersenHash::new(toy_pedersen_params()).unwrap();
	let (a, b) = (ToyField::rand(&mut rng), ToyField::rand(&mut rng));
	let (a_low, a_high) = hash.split(&a.to_biguint());
	let secrets = [
		a,
		ToyField::from_biguint(&a_low).unwrap(),
		ToyField::from_biguint(&a_high).unwrap(),
	];
	let set = commitment_set(&mut rng, &hash, a, b);
	let air = PedersenMembershipAir::new(hash, b, set).unwrap();
	let options = ProofOptions::new(2, 4);

	let proof = air.prove(a, &options, &mut rng).unwrap();
	air.verify(&proof, &options).unwrap();
	for query in &proof.trace_queries {
		for opening in [&query.current, &query.next] {
			assert!(opening.values.iter().all(|value| !secrets.contains(value)));
		}
	}
}

#[test]
fn test_stark_round_trip() {
	round_trip::<StarkField>(stark_pedersen_params(), ProofOptions::new(2, 4));
}
