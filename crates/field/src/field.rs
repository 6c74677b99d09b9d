// Copyright 2024-2025 Irreducible Inc.

use ark_ff::{BigInteger, PrimeField};
use ecstark_utils::bail;
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::Error;

/// Checked arithmetic and integer conversions on top of [`PrimeField`].
///
/// The arkworks operators return `Option` or panic on division by zero; the prover wants typed
/// errors instead, so every fallible operation here returns [`Error`].
pub trait FieldExt: PrimeField {
	/// Computes the multiplicative inverse of this element, failing if the element is zero.
	fn checked_inverse(&self) -> Result<Self, Error> {
		self.inverse().ok_or(Error::DivisionByZero)
	}

	fn checked_div(&self, rhs: &Self) -> Result<Self, Error> {
		Ok(*self * rhs.checked_inverse()?)
	}

	/// Raises this element to a signed power. Negative exponents go through the inverse.
	fn pow_signed(&self, exp: i64) -> Result<Self, Error> {
		let magnitude = [exp.unsigned_abs()];
		if exp < 0 {
			Ok(self.checked_inverse()?.pow(magnitude))
		} else {
			Ok(self.pow(magnitude))
		}
	}

	/// Returns true iff this element has multiplicative order exactly `n`.
	///
	/// That is, `self^n = 1` and `self^(n/q) != 1` for every prime `q` dividing `n`.
	fn is_order(&self, n: u64) -> bool {
		if n == 0 || !self.pow([n]).is_one() {
			return false;
		}
		prime_factors(n)
			.into_iter()
			.all(|q| !self.pow([n / q]).is_one())
	}

	/// Returns `GENERATOR^((p - 1) / 2^log_order)`, a candidate generator of the subgroup of order
	/// `2^log_order`.
	///
	/// The result is not checked here; domain constructors validate it with [`Self::is_order`].
	fn power_of_two_root(log_order: usize) -> Result<Self, Error> {
		if log_order > Self::TWO_ADICITY as usize {
			bail!(Error::NoRootOfUnity { log_order });
		}
		let cofactor = (Self::modulus_biguint() - 1u32) >> log_order;
		Ok(Self::GENERATOR.pow(cofactor.to_u64_digits()))
	}

	fn modulus_biguint() -> BigUint {
		Self::MODULUS.into()
	}

	fn to_biguint(&self) -> BigUint {
		self.into_bigint().into()
	}

	/// Converts a canonical integer in `[0, p)` into a field element.
	fn from_biguint(value: &BigUint) -> Result<Self, Error> {
		let not_in_field = || Error::NotInField {
			value: value.to_str_radix(10),
		};
		let repr = Self::BigInt::try_from(value.clone()).map_err(|_| not_in_field())?;
		Self::from_bigint(repr).ok_or_else(not_in_field)
	}

	/// Canonical residue as a decimal string. Zero prints as `"0"`.
	fn to_decimal(&self) -> String {
		self.to_biguint().to_str_radix(10)
	}

	fn from_decimal(text: &str) -> Result<Self, Error> {
		let value = BigUint::parse_bytes(text.trim().as_bytes(), 10).ok_or_else(|| {
			Error::NotInField {
				value: text.to_string(),
			}
		})?;
		Self::from_biguint(&value)
	}

	/// Number of bits needed for the canonical residues.
	fn modulus_bits() -> usize {
		Self::MODULUS.num_bits() as usize
	}
}

impl<F: PrimeField> FieldExt for F {}

/// Distinct prime factors of `n`, by trial division.
pub fn prime_factors(mut n: u64) -> Vec<u64> {
	let mut factors = Vec::new();
	let mut q = 2u64;
	while q <= n / q {
		if n % q == 0 {
			factors.push(q);
			while n % q == 0 {
				n /= q;
			}
		}
		q += if q == 2 { 1 } else { 2 };
	}
	if n > 1 {
		factors.push(n);
	}
	factors
}

/// Returns `2^bits - 1` as an integer.
pub fn low_bits_mask(bits: usize) -> BigUint {
	if bits == 0 {
		return BigUint::zero();
	}
	(BigUint::one() << bits) - 1u32
}
