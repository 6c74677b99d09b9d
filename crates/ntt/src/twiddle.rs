// Copyright 2024 Irreducible Inc.

use ecstark_field::{Field, FieldExt, One};

use crate::Error;

/// Precomputed powers of the root of unity of the largest supported domain.
///
/// A transform of size $2^k$ reads every $2^{\ell - k}$-th entry of the table, since
/// $\omega_k = \omega_\ell^{2^{\ell - k}}$.
#[derive(Debug, Clone)]
pub struct PrecomputedTwiddles<F> {
	log_domain_size: usize,
	/// Generator of the subgroup of order `2^log_domain_size`
	omega: F,
	/// `powers[i] = omega^i` for `i < 2^(log_domain_size - 1)`
	powers: Vec<F>,
}

impl<F: FieldExt> PrecomputedTwiddles<F> {
	pub fn new(log_domain_size: usize) -> Result<Self, Error> {
		let omega = F::power_of_two_root(log_domain_size)?;
		let half = (1usize << log_domain_size) >> 1;
		let mut powers = Vec::with_capacity(half);
		let mut current = F::one();
		for _ in 0..half {
			powers.push(current);
			current *= omega;
		}
		Ok(Self {
			log_domain_size,
			omega,
			powers,
		})
	}

	pub const fn log_domain_size(&self) -> usize {
		self.log_domain_size
	}

	/// Generator of the subgroup of order `2^log_n`.
	pub fn root(&self, log_n: usize) -> F {
		let mut root = self.omega;
		for _ in log_n..self.log_domain_size {
			root.square_in_place();
		}
		root
	}

	/// Twiddle `omega_{log_n}^index`.
	///
	/// Panics if `index` is not below `2^(log_n - 1)`.
	#[inline]
	pub fn get(&self, log_n: usize, index: usize) -> F {
		self.powers[index << (self.log_domain_size - log_n)]
	}
}
