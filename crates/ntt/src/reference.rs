// Copyright 2024 Irreducible Inc.

use ecstark_field::{FieldExt, Zero};

/// Quadratic-time evaluation of `coeffs` at `shift * omega^i` for `i < coeffs.len()`.
pub fn naive_evaluate<F: FieldExt>(coeffs: &[F], omega: F, shift: F) -> Vec<F> {
	let mut point = shift;
	let mut evals = Vec::with_capacity(coeffs.len());
	for _ in 0..coeffs.len() {
		evals.push(
			coeffs
				.iter()
				.rev()
				.fold(F::zero(), |acc, &coeff| acc * point + coeff),
		);
		point *= omega;
	}
	evals
}
