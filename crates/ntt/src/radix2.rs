// Copyright 2024 Irreducible Inc.

use ecstark_field::{FieldExt, One};
use ecstark_utils::bail;
use rayon::prelude::*;
use tracing::instrument;

use super::{error::Error, multiplicative_ntt::MultiplicativeNTT, twiddle::PrecomputedTwiddles};

/// Below this many elements per butterfly block the rayon overhead dominates.
const PAR_BLOCK_THRESHOLD: usize = 1 << 10;

/// Iterative Cooley-Tukey NTT with a precomputed twiddle table.
///
/// The butterfly passes of large transforms are split across the rayon pool.
#[derive(Debug, Clone)]
pub struct Radix2NTT<F> {
	twiddles: PrecomputedTwiddles<F>,
}

impl<F: FieldExt> Radix2NTT<F> {
	pub fn new(log_domain_size: usize) -> Result<Self, Error> {
		Ok(Self {
			twiddles: PrecomputedTwiddles::new(log_domain_size)?,
		})
	}

	fn check_len(&self, len: usize) -> Result<usize, Error> {
		if !len.is_power_of_two() {
			bail!(Error::PowerOfTwoLengthRequired);
		}
		let log_n = len.ilog2() as usize;
		if log_n > self.log_domain_size() {
			bail!(Error::DomainTooSmall {
				log_required_domain_size: log_n,
			});
		}
		Ok(log_n)
	}

	/// Evaluations over the subgroup itself, in natural order.
	fn transform_in_place(&self, data: &mut [F], log_n: usize) {
		bit_reverse_permute(data);

		for log_m in 1..=log_n {
			let half = 1usize << (log_m - 1);
			let butterfly_block = |block: &mut [F]| {
				let (lo, hi) = block.split_at_mut(half);
				for (j, (u, v)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
					let t = *v * self.twiddles.get(log_m, j);
					*v = *u - t;
					*u += t;
				}
			};

			if data.len() >= PAR_BLOCK_THRESHOLD {
				data.par_chunks_exact_mut(2 * half).for_each(butterfly_block);
			} else {
				data.chunks_exact_mut(2 * half).for_each(butterfly_block);
			}
		}
	}
}

impl<F: FieldExt> MultiplicativeNTT<F> for Radix2NTT<F> {
	fn log_domain_size(&self) -> usize {
		self.twiddles.log_domain_size()
	}

	fn root_of_unity(&self, log_n: usize) -> F {
		self.twiddles.root(log_n)
	}

	#[instrument("Radix2NTT::forward_transform", skip_all, level = "trace")]
	fn forward_transform(&self, data: &mut [F], shift: F) -> Result<(), Error> {
		let log_n = self.check_len(data.len())?;
		if shift.is_zero() {
			bail!(Error::ZeroCosetShift);
		}
		if !shift.is_one() {
			scale_by_powers(data, shift);
		}
		self.transform_in_place(data, log_n);
		Ok(())
	}

	#[instrument("Radix2NTT::inverse_transform", skip_all, level = "trace")]
	fn inverse_transform(&self, data: &mut [F], shift: F) -> Result<(), Error> {
		let log_n = self.check_len(data.len())?;
		let shift_inv = shift.checked_inverse().map_err(|_| Error::ZeroCosetShift)?;

		// The inverse DFT is the forward DFT at omega^-1, which permutes outputs i -> n - i.
		self.transform_in_place(data, log_n);
		data[1..].reverse();

		let n_inv = F::from(data.len() as u64).checked_inverse()?;
		data.iter_mut().for_each(|x| *x *= n_inv);

		if !shift_inv.is_one() {
			scale_by_powers(data, shift_inv);
		}
		Ok(())
	}
}

/// Multiplies `data[i]` by `base^i`.
fn scale_by_powers<F: FieldExt>(data: &mut [F], base: F) {
	let mut power = F::one();
	for x in data.iter_mut() {
		*x *= power;
		power *= base;
	}
}

fn bit_reverse_permute<T>(data: &mut [T]) {
	let n = data.len();
	if n <= 2 {
		return;
	}
	let shift = usize::BITS - n.ilog2();
	for i in 0..n {
		let j = i.reverse_bits() >> shift;
		if i < j {
			data.swap(i, j);
		}
	}
}
