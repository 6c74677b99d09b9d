// Copyright 2024-2025 Irreducible Inc.

use std::sync::Arc;

use ecstark_field::{FieldExt, One, Zero};
use ecstark_ntt::Radix2NTT;
use ecstark_utils::ensure;
use getset::CopyGetters;

use super::error::Error;

/// A multiplicative evaluation domain $\{ s \cdot g^i : 0 \le i < 2^k \}$.
///
/// With offset $s = 1$ this is the subgroup of order $2^k$ generated by $g$; otherwise it is a
/// coset of that subgroup. The generator is checked to have order exactly $2^k$ on construction.
#[derive(Debug, Clone, CopyGetters)]
pub struct EvaluationDomain<F> {
	#[getset(get_copy = "pub")]
	log_size: usize,
	generator: F,
	offset: F,
	/// Present when `generator` is the canonical root of unity, so that transforms can run in
	/// quasi-linear time.
	ntt: Option<Arc<Radix2NTT<F>>>,
}

impl<F: FieldExt> EvaluationDomain<F> {
	/// The subgroup of order `2^log_size`.
	pub fn subgroup(log_size: usize) -> Result<Self, Error> {
		Self::new(log_size, F::one())
	}

	/// The subgroup of order `2^log_size` shifted by the field's multiplicative generator, which
	/// never intersects any power-of-two subgroup.
	pub fn coset(log_size: usize) -> Result<Self, Error> {
		Self::new(log_size, F::GENERATOR)
	}

	pub fn new(log_size: usize, offset: F) -> Result<Self, Error> {
		let generator = F::power_of_two_root(log_size)?;
		Self::with_generator(log_size, generator, offset)
	}

	/// Builds a domain from an explicit generator.
	///
	/// ## Throws
	///
	/// * [`Error::SubgroupOrderMismatch`] if `generator` does not have order exactly `2^log_size`
	pub fn with_generator(log_size: usize, generator: F, offset: F) -> Result<Self, Error> {
		ensure!(!offset.is_zero(), Error::ZeroDomainOffset);
		ensure!(generator.is_order(1 << log_size), Error::SubgroupOrderMismatch { log_size });

		let ntt = if generator == F::power_of_two_root(log_size)? {
			Some(Arc::new(Radix2NTT::new(log_size)?))
		} else {
			None
		};
		Ok(Self {
			log_size,
			generator,
			offset,
			ntt,
		})
	}

	pub fn generator(&self) -> F {
		self.generator
	}

	pub fn offset(&self) -> F {
		self.offset
	}

	pub const fn size(&self) -> usize {
		1 << self.log_size
	}

	/// The `i`-th element, `offset * generator^i`.
	pub fn element(&self, i: usize) -> F {
		self.offset * self.generator.pow([i as u64])
	}

	pub fn elements(&self) -> Vec<F> {
		let mut elements = Vec::with_capacity(self.size());
		let mut current = self.offset;
		for _ in 0..self.size() {
			elements.push(current);
			current *= self.generator;
		}
		elements
	}

	/// The image of this domain under $x \mapsto x^2$, half the size.
	///
	/// Element `i` of the squared domain is the square of elements `i` and `i + size/2` here.
	pub fn squared(&self) -> Result<Self, Error> {
		ensure!(self.log_size > 0, Error::DomainTooSmall);
		Ok(Self {
			log_size: self.log_size - 1,
			generator: self.generator.square(),
			offset: self.offset.square(),
			ntt: self.ntt.clone(),
		})
	}

	/// Whether the domain is the subgroup itself rather than a proper coset.
	pub fn is_subgroup(&self) -> bool {
		self.offset.is_one()
	}

	pub(crate) fn ntt(&self) -> Option<&Radix2NTT<F>> {
		self.ntt.as_deref()
	}
}
