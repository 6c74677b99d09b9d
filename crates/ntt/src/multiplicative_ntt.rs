// Copyright 2024-2025 Irreducible Inc.

use ecstark_field::FieldExt;

use super::error::Error;

/// A number-theoretic transform over the multiplicative power-of-two subgroups of `F`.
///
/// An implementation with maximum domain dimension $\ell$ can transform any input of length $2^k$
/// with $k \le \ell$. The subgroup of order $2^k$ is generated by $\omega_k = g^{(p-1)/2^k}$ for
/// the field generator $g$, so the domains nest: squaring $\omega_k$ gives $\omega_{k-1}$.
pub trait MultiplicativeNTT<F: FieldExt> {
	/// Base-2 logarithm of the maximum size of the NTT domain, $\ell$.
	fn log_domain_size(&self) -> usize;

	/// Returns the generator of the subgroup of order `2^log_n`.
	///
	/// ## Preconditions
	///
	/// * `log_n` must be at most `self.log_domain_size()`
	fn root_of_unity(&self, log_n: usize) -> F;

	/// Forward transformation: polynomial coefficients to evaluations over the coset
	/// `shift * <omega>`, where the coset order is the length of `data`.
	///
	/// Coefficients beyond the data length are implicitly zero.
	fn forward_transform(&self, data: &mut [F], shift: F) -> Result<(), Error>;

	/// Inverse transformation: evaluations over the coset `shift * <omega>` to polynomial
	/// coefficients.
	fn inverse_transform(&self, data: &mut [F], shift: F) -> Result<(), Error>;
}
