// Copyright 2024 Irreducible Inc.

use assert_matches::assert_matches;
use ecstark_field::{FftField, Field, FieldExt, One, StarkField, ToyField, UniformRand, Zero};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use crate::{reference::naive_evaluate, Error, MultiplicativeNTT, Radix2NTT};

fn check_forward_matches_naive<F: FieldExt>(log_n: usize, seed: u64) {
	let mut rng = StdRng::seed_from_u64(seed);
	let ntt = Radix2NTT::<F>::new(log_n + 2).unwrap();
	let coeffs = (0..1 << log_n).map(|_| F::rand(&mut rng)).collect::<Vec<_>>();

	for shift in [F::one(), F::GENERATOR] {
		let mut evals = coeffs.clone();
		ntt.forward_transform(&mut evals, shift).unwrap();
		assert_eq!(evals, naive_evaluate(&coeffs, ntt.root_of_unity(log_n), shift));

		ntt.inverse_transform(&mut evals, shift).unwrap();
		assert_eq!(evals, coeffs);
	}
}

proptest! {
	#[test]
	fn test_toy_ntt_matches_naive(log_n in 0usize..8, seed in any::<u64>()) {
		check_forward_matches_naive::<ToyField>(log_n, seed);
	}

	#[test]
	fn test_stark_ntt_matches_naive(log_n in 0usize..6, seed in any::<u64>()) {
		check_forward_matches_naive::<StarkField>(log_n, seed);
	}
}

#[test]
fn test_large_transform_round_trip() {
	// Large enough to take the parallel butterfly path.
	let mut rng = StdRng::seed_from_u64(0);
	let ntt = Radix2NTT::<StarkField>::new(12).unwrap();
	let coeffs = (0..1 << 12)
		.map(|_| StarkField::rand(&mut rng))
		.collect::<Vec<_>>();
	let mut data = coeffs.clone();
	ntt.forward_transform(&mut data, StarkField::GENERATOR).unwrap();
	ntt.inverse_transform(&mut data, StarkField::GENERATOR).unwrap();
	assert_eq!(data, coeffs);
}

#[test]
fn test_roots_nest() {
	let ntt = Radix2NTT::<ToyField>::new(10).unwrap();
	for log_n in 1..=10 {
		let root = ntt.root_of_unity(log_n);
		assert!(root.is_order(1 << log_n));
		assert_eq!(root.square(), ntt.root_of_unity(log_n - 1));
	}
	assert_eq!(ntt.root_of_unity(0), ToyField::one());
}

#[test]
fn test_constant_polynomial_evaluates_to_constant() {
	let ntt = Radix2NTT::<ToyField>::new(4).unwrap();
	let mut data = vec![ToyField::zero(); 16];
	data[0] = ToyField::from(7u64);
	ntt.forward_transform(&mut data, ToyField::GENERATOR).unwrap();
	assert!(data.iter().all(|&x| x == ToyField::from(7u64)));
}

#[test]
fn test_invalid_inputs() {
	let ntt = Radix2NTT::<ToyField>::new(3).unwrap();
	let mut data = vec![ToyField::one(); 6];
	assert_matches!(
		ntt.forward_transform(&mut data, ToyField::one()),
		Err(Error::PowerOfTwoLengthRequired)
	);

	let mut data = vec![ToyField::one(); 16];
	assert_matches!(
		ntt.forward_transform(&mut data, ToyField::one()),
		Err(Error::DomainTooSmall {
			log_required_domain_size: 4
		})
	);

	let mut data = vec![ToyField::one(); 8];
	assert_matches!(
		ntt.inverse_transform(&mut data, ToyField::zero()),
		Err(Error::ZeroCosetShift)
	);

	assert_matches!(Radix2NTT::<ToyField>::new(31), Err(Error::Field(_)));
}
