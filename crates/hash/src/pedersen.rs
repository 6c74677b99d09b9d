// Copyright 2024 Irreducible Inc.

use std::sync::Arc;

use ecstark_curve::{
	jacobian::{FixedBaseTable, JacobianPoint},
	Curve,
};
use ecstark_field::{field::low_bits_mask, FieldExt};
use ecstark_utils::ensure;
use num_bigint::BigUint;

use crate::{
	compression::{PaddedCompressionFunction, PseudoCompressionFunction},
	error::Error,
	params::PedersenParams,
};

/// The two-input Pedersen hash over a fixed set of curve points.
///
/// Construction precomputes 8-bit window tables for the four generators; the handle is then cheap
/// to clone and share across threads.
#[derive(Debug, Clone)]
pub struct PedersenHash<F> {
	inner: Arc<PedersenInner<F>>,
}

#[derive(Debug)]
struct PedersenInner<F> {
	params: PedersenParams<F>,
	curve: Curve<F>,
	/// Tables for `g[0]..g[3]`; even indices take low parts, odd indices high parts.
	tables: [FixedBaseTable<F>; 4],
}

impl<F: FieldExt> PedersenHash<F> {
	/// ## Throws
	///
	/// * [`Error::InputWidthTooSmall`] if a canonical field element can exceed the input width,
	///   which would make [`Self::hash`] lossy
	/// * [`ecstark_curve::Error::ZeroAbscissa`] if the offset or a generator has $x = 0$, which
	///   the traced ladders cannot add to the identity
	#[tracing::instrument(skip_all, level = "debug")]
	pub fn new(params: PedersenParams<F>) -> Result<Self, Error> {
		ensure!(
			F::modulus_bits() <= params.input_bits(),
			Error::InputWidthTooSmall {
				modulus_bits: F::modulus_bits(),
				input_bits: params.input_bits(),
			}
		);

		ensure!(
			std::iter::once(params.offset())
				.chain(*params.generators())
				.all(|g| g.is_infinity() || !g.x.is_zero()),
			Error::CurveError(ecstark_curve::Error::ZeroAbscissa)
		);

		let curve = Curve::new(params.curve());
		let widths = [
			params.low_bits(),
			params.high_bits(),
			params.low_bits(),
			params.high_bits(),
		];
		let tables = std::array::from_fn(|i| {
			FixedBaseTable::new(&curve, &params.generators()[i], widths[i])
		});
		Ok(Self {
			inner: Arc::new(PedersenInner {
				params,
				curve,
				tables,
			}),
		})
	}

	pub fn params(&self) -> &PedersenParams<F> {
		&self.inner.params
	}

	pub fn curve(&self) -> &Curve<F> {
		&self.inner.curve
	}

	/// Splits an input into its low and high parts.
	pub fn split(&self, value: &BigUint) -> (BigUint, BigUint) {
		let low_bits = self.inner.params.low_bits();
		(value & low_bits_mask(low_bits), value >> low_bits)
	}

	/// Hashes two field elements.
	pub fn hash(&self, a: F, b: F) -> F {
		self.hash_parts(&a.to_biguint(), &b.to_biguint())
	}

	/// Hashes two raw integers, each below `2^(low_bits + high_bits)`.
	///
	/// Integers at or above the field modulus are admitted, which is how Merkle padding hashes the
	/// modulus itself.
	///
	/// ## Throws
	///
	/// * [`Error::InputOutOfRange`] if an input is too wide
	pub fn hash_integers(&self, a: &BigUint, b: &BigUint) -> Result<F, Error> {
		let bits = self.inner.params.input_bits();
		for value in [a, b] {
			ensure!(
				value.bits() <= bits as u64,
				Error::InputOutOfRange {
					value: value.to_str_radix(10),
					bits,
				}
			);
		}
		Ok(self.hash_parts(a, b))
	}

	fn hash_parts(&self, a: &BigUint, b: &BigUint) -> F {
		let params = &self.inner.params;
		let mut acc = JacobianPoint::from_affine(&params.offset());
		let (a_low, a_high) = self.split(a);
		let (b_low, b_high) = self.split(b);
		for (table, part) in self.inner.tables.iter().zip([a_low, a_high, b_low, b_high]) {
			table.mul_add_bytes_le(&part.to_bytes_le(), &mut acc);
		}
		acc.to_affine().x
	}
}

impl<F: FieldExt> PseudoCompressionFunction<F, 2> for PedersenHash<F> {
	fn compress(&self, input: [F; 2]) -> F {
		self.hash(input[0], input[1])
	}
}

impl<F: FieldExt> PaddedCompressionFunction<F> for PedersenHash<F> {
	fn compress_padded(&self, left: Option<F>, right: Option<F>) -> F {
		let as_integer = |value: Option<F>| value.map_or_else(F::modulus_biguint, |v| v.to_biguint());
		self.hash_parts(&as_integer(left), &as_integer(right))
	}
}
