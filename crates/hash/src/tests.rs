// Copyright 2024 Irreducible Inc.

use std::sync::Arc;

use assert_matches::assert_matches;
use ecstark_curve::AffinePoint;
use ecstark_field::{FieldExt, ToyField, UniformRand};
use ecstark_math::{TraceBuilder, TraceLayout};
use num_bigint::BigUint;
use num_traits::One;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
	toy_pedersen_params, Error, PaddedCompressionFunction, PedersenHash, PedersenParams,
	PedersenRegisters,
};

type F = ToyField;

fn toy_hasher() -> PedersenHash<F> {
	PedersenHash::new(toy_pedersen_params()).unwrap()
}

#[test]
fn test_modulus_is_a_valid_integer_input() {
	let hasher = toy_hasher();
	let x = F::from(77u64);
	let padded = hasher.compress_padded(None, Some(x));
	assert_eq!(padded, hasher.hash_integers(&F::modulus_biguint(), &x.to_biguint()).unwrap());

	// p reduces to 0 in the field but hashes differently from 0.
	assert_ne!(padded, hasher.hash(F::from(0u64), x));
}

#[test]
fn test_hash_integers_range() {
	let hasher = toy_hasher();
	let too_wide = BigUint::one() << 32;
	assert_matches!(
		hasher.hash_integers(&too_wide, &BigUint::one()),
		Err(Error::InputOutOfRange { bits: 32, .. })
	);
	let widest = &too_wide - 1u32;
	assert!(hasher.hash_integers(&widest, &widest).is_ok());
}

#[test]
fn test_input_width_must_cover_field() {
	let params = toy_pedersen_params();
	let narrow = PedersenParams::new(
		params.curve(),
		params.offset(),
		*params.generators(),
		16,
		15,
	);
	assert_matches!(
		PedersenHash::new(narrow),
		Err(Error::InputWidthTooSmall {
			modulus_bits: 32,
			input_bits: 31
		})
	);
}

#[test]
fn test_points_on_the_y_axis_are_rejected() {
	let params = toy_pedersen_params();
	let on_axis = AffinePoint::new(F::from(0u64), F::from(2u64));
	let with_offset = PedersenParams::new(params.curve(), on_axis, *params.generators(), 16, 16);
	assert_matches!(
		PedersenHash::new(with_offset),
		Err(Error::CurveError(ecstark_curve::Error::ZeroAbscissa))
	);

	let mut generators = *params.generators();
	generators[2] = on_axis;
	let with_generator = PedersenParams::new(params.curve(), params.offset(), generators, 16, 16);
	assert_matches!(
		PedersenHash::new(with_generator),
		Err(Error::CurveError(ecstark_curve::Error::ZeroAbscissa))
	);
}

#[test]
fn test_split() {
	let hasher = toy_hasher();
	let (low, high) = hasher.split(&BigUint::from(0x0003_0005u32));
	assert_eq!(low, BigUint::from(5u32));
	assert_eq!(high, BigUint::from(3u32));
}

#[test]
fn test_trace_hash_matches_hash() {
	let mut rng = StdRng::seed_from_u64(0);
	let hasher = toy_hasher();
	assert_eq!(hasher.trace_rows(), 32);

	for _ in 0..3 {
		let (a, b) = (F::rand(&mut rng), F::rand(&mut rng));
		let mut layout = TraceLayout::new();
		let registers = PedersenRegisters::new(&mut layout, "hash").unwrap();
		let layout = Arc::new(layout);
		let mut builder = TraceBuilder::new(layout.clone(), hasher.trace_rows());

		let output = hasher
			.trace_hash(&mut builder, &registers, &a.to_biguint(), &b.to_biguint())
			.unwrap();
		assert_eq!(output.x, hasher.hash(a, b));
		assert!(!output.is_infinity());

		let trace = builder.finish().unwrap();
		assert_eq!(trace.n_rows(), 32);
		assert_eq!(trace.n_columns(), layout.n_registers());
		assert_eq!(trace.get(registers.output.result.x, 31), output.x);
		assert_eq!(trace.get(registers.output.result.x, 30), F::from(0u64));
	}
}

#[test]
fn test_trace_hash_rejects_short_trace() {
	let hasher = toy_hasher();
	let mut layout = TraceLayout::new();
	let registers = PedersenRegisters::new(&mut layout, "hash").unwrap();
	let mut builder = TraceBuilder::new(Arc::new(layout), 16);
	assert_matches!(
		hasher.trace_hash(&mut builder, &registers, &BigUint::one(), &BigUint::one()),
		Err(Error::TraceTooShort {
			n_rows: 16,
			required: 17
		})
	);
}
