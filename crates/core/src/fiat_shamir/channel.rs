// Copyright 2024 Irreducible Inc.

use ecstark_field::FieldExt;
use ecstark_hash::PseudoCompressionFunction;
use num_bigint::BigUint;

use super::sampling::{CanObserve, CanSample, CanSampleBits};

/// A hash-chained Fiat-Shamir transcript.
///
/// The state is a single field element starting at one. Every message is absorbed with
/// `state = H(state, value)` and every challenge is squeezed with `state = H(state, 1)`, so each
/// challenge is a deterministic function of all messages sent before it.
#[derive(Debug, Clone)]
pub struct Channel<F, C> {
	compression: C,
	state: F,
	transcript: Vec<(String, F)>,
}

impl<F, C> Channel<F, C>
where
	F: FieldExt,
	C: PseudoCompressionFunction<F, 2>,
{
	pub fn new(compression: C) -> Self {
		Self {
			compression,
			state: F::one(),
			transcript: Vec::new(),
		}
	}

	pub fn state(&self) -> F {
		self.state
	}

	/// Absorbs a prover message and records it under `label`.
	pub fn send(&mut self, label: impl Into<String>, value: F) {
		self.state = self.compression.compress([self.state, value]);
		self.transcript.push((label.into(), value));
	}

	/// Advances the state and returns it as a challenge.
	pub fn get_random(&mut self) -> F {
		self.state = self.compression.compress([self.state, F::one()]);
		self.state
	}

	/// A challenge reduced to an index in `0..n`.
	///
	/// The reduction is modular, so indices are slightly biased unless `n` divides the modulus.
	pub fn random_index(&mut self, n: usize) -> usize {
		let value = self.get_random().to_biguint() % BigUint::from(n);
		// Zero has no digits.
		value.iter_u64_digits().next().unwrap_or(0) as usize
	}

	/// The `(label, value)` log of every message sent so far.
	pub fn transcript(&self) -> &[(String, F)] {
		&self.transcript
	}

	pub fn into_transcript(self) -> Vec<(String, F)> {
		self.transcript
	}
}

impl<F, C> CanObserve<F> for Channel<F, C>
where
	F: FieldExt,
	C: PseudoCompressionFunction<F, 2>,
{
	fn observe(&mut self, value: F) {
		self.send("observed", value);
	}
}

impl<F, C> CanSample<F> for Channel<F, C>
where
	F: FieldExt,
	C: PseudoCompressionFunction<F, 2>,
{
	fn sample(&mut self) -> F {
		self.get_random()
	}
}

impl<F, C> CanSampleBits<usize> for Channel<F, C>
where
	F: FieldExt,
	C: PseudoCompressionFunction<F, 2>,
{
	fn sample_bits(&mut self, bits: usize) -> usize {
		self.random_index(1 << bits)
	}
}

#[cfg(test)]
mod tests {
	use ecstark_field::ToyField;
	use ecstark_hash::{toy_pedersen_params, PedersenHash};

	use super::*;

	fn channel() -> Channel<ToyField, PedersenHash<ToyField>> {
		Channel::new(PedersenHash::new(toy_pedersen_params()).unwrap())
	}

	#[test]
	fn test_state_chains_through_hash() {
		let hash = PedersenHash::new(toy_pedersen_params()).unwrap();
		let mut channel = channel();
		assert_eq!(channel.state(), ToyField::from(1u64));

		let value = ToyField::from(12345u64);
		channel.send("value", value);
		let after_send = hash.hash(ToyField::from(1u64), value);
		assert_eq!(channel.state(), after_send);

		let random = channel.get_random();
		assert_eq!(random, hash.hash(after_send, ToyField::from(1u64)));
		assert_eq!(channel.transcript(), &[("value".to_string(), value)]);
	}

	#[test]
	fn test_randomness_is_deterministic_and_advances() {
		let mut a = channel();
		let mut b = channel();
		a.send("root", ToyField::from(7u64));
		b.send("root", ToyField::from(7u64));

		let draws_a = a.sample_vec(4);
		let draws_b = b.sample_vec(4);
		assert_eq!(draws_a, draws_b);
		for pair in draws_a.windows(2) {
			assert_ne!(pair[0], pair[1]);
		}

		let mut c = channel();
		c.send("root", ToyField::from(8u64));
		assert_ne!(c.sample(), draws_a[0]);
	}

	#[test]
	fn test_random_index_in_range() {
		let mut channel = channel();
		for n in [1, 2, 3, 64, 1000] {
			assert!(channel.random_index(n) < n);
		}
		assert!(channel.sample_bits(5) < 32);
	}

	#[test]
	fn test_observe_records_values() {
		let mut channel = channel();
		channel.observe_slice(&[ToyField::from(1u64), ToyField::from(2u64)]);
		assert_eq!(channel.transcript().len(), 2);
		assert_eq!(channel.transcript()[1].1, ToyField::from(2u64));
	}
}
