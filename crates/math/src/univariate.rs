// Copyright 2023-2024 Irreducible Inc.

use std::ops::{Add, Mul, Neg, Sub};

use ecstark_field::{FieldExt, One, Zero};
use ecstark_ntt::MultiplicativeNTT;
use ecstark_utils::{bail, ensure};
use rayon::prelude::*;

use super::{domain::EvaluationDomain, error::Error};

/// A univariate polynomial in dense coefficient form.
///
/// `coeffs[i]` is the coefficient of $x^i$. The representation is canonical: trailing zero
/// coefficients are always stripped, so the zero polynomial has no coefficients and two
/// polynomials are equal iff their coefficient vectors are.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polynomial<F> {
	coeffs: Vec<F>,
}

impl<F: FieldExt> Polynomial<F> {
	pub fn new(mut coeffs: Vec<F>) -> Self {
		while coeffs.last().is_some_and(|c| c.is_zero()) {
			coeffs.pop();
		}
		Self { coeffs }
	}

	pub fn zero() -> Self {
		Self { coeffs: Vec::new() }
	}

	pub fn constant(value: F) -> Self {
		Self::new(vec![value])
	}

	/// The identity polynomial $x$.
	pub fn x() -> Self {
		Self::monomial(1, F::one())
	}

	/// `coeff * x^degree`
	pub fn monomial(degree: usize, coeff: F) -> Self {
		let mut coeffs = vec![F::zero(); degree + 1];
		coeffs[degree] = coeff;
		Self::new(coeffs)
	}

	/// The monic polynomial whose roots are exactly `roots`, $\prod_i (x - r_i)$.
	pub fn vanishing(roots: &[F]) -> Self {
		roots
			.iter()
			.fold(Self::constant(F::one()), |acc, &root| acc.mul_linear(root))
	}

	pub fn coeffs(&self) -> &[F] {
		&self.coeffs
	}

	pub fn into_coeffs(self) -> Vec<F> {
		self.coeffs
	}

	/// Coefficient of `x^i`, zero beyond the degree.
	pub fn coeff(&self, i: usize) -> F {
		self.coeffs.get(i).copied().unwrap_or_else(F::zero)
	}

	/// Highest index of a nonzero coefficient, or `None` for the zero polynomial.
	pub fn degree(&self) -> Option<usize> {
		self.coeffs.len().checked_sub(1)
	}

	pub fn is_zero(&self) -> bool {
		self.coeffs.is_empty()
	}

	/// Evaluates with Horner's method.
	pub fn evaluate(&self, x: F) -> F {
		self.coeffs
			.iter()
			.rev()
			.fold(F::zero(), |acc, &coeff| acc * x + coeff)
	}

	pub fn scale(&self, factor: F) -> Self {
		Self::new(self.coeffs.iter().map(|&c| c * factor).collect())
	}

	/// Returns `self(inner(x))`.
	pub fn compose(&self, inner: &Self) -> Self {
		self.coeffs
			.iter()
			.rev()
			.fold(Self::zero(), |acc, &coeff| &(&acc * inner) + &Self::constant(coeff))
	}

	/// Multiplies by the linear factor $(x - root)$.
	pub fn mul_linear(&self, root: F) -> Self {
		if self.is_zero() {
			return Self::zero();
		}
		let mut coeffs = vec![F::zero(); self.coeffs.len() + 1];
		for (i, &c) in self.coeffs.iter().enumerate() {
			coeffs[i + 1] += c;
			coeffs[i] -= c * root;
		}
		Self::new(coeffs)
	}

	/// Long division, returning `(quotient, remainder)` with `deg(remainder) < deg(divisor)`.
	pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), Error> {
		let Some(divisor_degree) = divisor.degree() else {
			bail!(Error::DivisionByZeroPolynomial);
		};
		let Some(degree) = self.degree().filter(|&d| d >= divisor_degree) else {
			return Ok((Self::zero(), self.clone()));
		};

		let lead_inv = divisor.coeffs[divisor_degree].checked_inverse()?;
		let mut remainder = self.coeffs.clone();
		let mut quotient = vec![F::zero(); degree - divisor_degree + 1];

		for shift in (0..quotient.len()).rev() {
			let factor = remainder[shift + divisor_degree] * lead_inv;
			if factor.is_zero() {
				continue;
			}
			quotient[shift] = factor;
			for (j, &d) in divisor.coeffs.iter().enumerate() {
				remainder[shift + j] -= factor * d;
			}
		}

		remainder.truncate(divisor_degree);
		Ok((Self::new(quotient), Self::new(remainder)))
	}

	/// Division that must be exact.
	///
	/// ## Throws
	///
	/// * [`Error::InexactDivision`] if `divisor` does not divide `self`
	pub fn div_exact(&self, divisor: &Self) -> Result<Self, Error> {
		let (quotient, remainder) = self.div_rem(divisor)?;
		ensure!(remainder.is_zero(), Error::InexactDivision);
		Ok(quotient)
	}

	/// Exact division by the sparse polynomial $x^n - c$, in linear time.
	///
	/// ## Throws
	///
	/// * [`Error::InexactDivision`] if $x^n - c$ does not divide `self`
	pub fn div_exact_by_xn_minus_c(&self, n: usize, c: F) -> Result<Self, Error> {
		if n == 0 {
			// x^0 - c is the constant 1 - c.
			let divisor = Self::constant(F::one() - c);
			return self.div_exact(&divisor);
		}
		let len = self.coeffs.len();
		if len <= n {
			ensure!(self.is_zero(), Error::InexactDivision);
			return Ok(Self::zero());
		}

		// self = q * (x^n - c) gives q_i = self_{i+n} + c * q_{i+n}, from the top down.
		let mut quotient = vec![F::zero(); len - n];
		for i in (0..len - n).rev() {
			let carry = quotient.get(i + n).copied().unwrap_or_else(F::zero);
			quotient[i] = self.coeffs[i + n] + c * carry;
		}
		// The low n coefficients of q * (x^n - c) are -c * q_i and must match self.
		for i in 0..n {
			let expected = -(c * quotient.get(i).copied().unwrap_or_else(F::zero));
			ensure!(self.coeffs[i] == expected, Error::InexactDivision);
		}
		Ok(Self::new(quotient))
	}

	/// $p(x) + (x^n - 1) \cdot m(x)$, which agrees with `self` on the order-`n` subgroup.
	pub fn add_vanishing_multiple(&self, n: usize, mask: &Self) -> Self {
		let mut coeffs = self.coeffs.clone();
		coeffs.resize(coeffs.len().max(n + mask.coeffs.len()), F::zero());
		for (i, &m) in mask.coeffs.iter().enumerate() {
			coeffs[i + n] += m;
			coeffs[i] -= m;
		}
		Self::new(coeffs)
	}

	/// Splits into $(e, o)$ with $p(x) = e(x^2) + x \cdot o(x^2)$.
	pub fn even_odd(&self) -> (Self, Self) {
		let even = self.coeffs.iter().step_by(2).copied().collect();
		let odd = self.coeffs.iter().skip(1).step_by(2).copied().collect();
		(Self::new(even), Self::new(odd))
	}

	/// FRI folding, $e(x) + \beta \cdot o(x)$.
	pub fn fold(&self, beta: F) -> Self {
		let (even, odd) = self.even_odd();
		&even + &odd.scale(beta)
	}

	/// Lagrange interpolation through `(points[i], values[i])`.
	///
	/// Returns the unique polynomial of degree less than `points.len()`. Quadratic time; use
	/// [`Self::interpolate_over`] for evaluation domains.
	///
	/// ## Throws
	///
	/// * [`Error::DuplicatePoint`] if two points coincide
	pub fn interpolate(points: &[F], values: &[F]) -> Result<Self, Error> {
		if points.len() != values.len() {
			bail!(Error::IncorrectArgumentLength {
				arg: "values".to_string(),
				expected: points.len(),
			});
		}

		let full = Self::vanishing(points);
		let mut coeffs = vec![F::zero(); points.len()];
		for (i, (&point, &value)) in points.iter().zip(values).enumerate() {
			let denominator = points
				.iter()
				.enumerate()
				.filter(|&(j, _)| j != i)
				.map(|(_, &other)| point - other)
				.product::<F>();
			let weight = value
				* denominator
					.checked_inverse()
					.map_err(|_| Error::DuplicatePoint)?;

			let basis = full.div_exact_by_xn_minus_c(1, point)?;
			for (acc, &b) in coeffs.iter_mut().zip(basis.coeffs()) {
				*acc += weight * b;
			}
		}
		Ok(Self::new(coeffs))
	}

	/// Evaluates over every element of `domain`, in domain order.
	///
	/// Requires `deg(self) < domain.size()`.
	pub fn evaluate_over(&self, domain: &EvaluationDomain<F>) -> Result<Vec<F>, Error> {
		if self.coeffs.len() > domain.size() {
			bail!(Error::IncorrectArgumentLength {
				arg: "coeffs".to_string(),
				expected: domain.size(),
			});
		}

		match domain.ntt() {
			Some(ntt) => {
				let mut evals = self.coeffs.clone();
				evals.resize(domain.size(), F::zero());
				ntt.forward_transform(&mut evals, domain.offset())?;
				Ok(evals)
			}
			None => Ok(domain
				.elements()
				.into_par_iter()
				.map(|x| self.evaluate(x))
				.collect()),
		}
	}

	/// Interpolates values given in domain order.
	pub fn interpolate_over(domain: &EvaluationDomain<F>, values: &[F]) -> Result<Self, Error> {
		if values.len() != domain.size() {
			bail!(Error::IncorrectArgumentLength {
				arg: "values".to_string(),
				expected: domain.size(),
			});
		}

		match domain.ntt() {
			Some(ntt) => {
				let mut coeffs = values.to_vec();
				ntt.inverse_transform(&mut coeffs, domain.offset())?;
				Ok(Self::new(coeffs))
			}
			None => Self::interpolate(&domain.elements(), values),
		}
	}
}

impl<F: FieldExt> Add for &Polynomial<F> {
	type Output = Polynomial<F>;

	fn add(self, rhs: Self) -> Polynomial<F> {
		let (long, short) = if self.coeffs.len() >= rhs.coeffs.len() {
			(self, rhs)
		} else {
			(rhs, self)
		};
		let mut coeffs = long.coeffs.clone();
		for (acc, &c) in coeffs.iter_mut().zip(&short.coeffs) {
			*acc += c;
		}
		Polynomial::new(coeffs)
	}
}

impl<F: FieldExt> Sub for &Polynomial<F> {
	type Output = Polynomial<F>;

	fn sub(self, rhs: Self) -> Polynomial<F> {
		self + &(-rhs)
	}
}

impl<F: FieldExt> Neg for &Polynomial<F> {
	type Output = Polynomial<F>;

	fn neg(self) -> Polynomial<F> {
		Polynomial {
			coeffs: self.coeffs.iter().map(|&c| -c).collect(),
		}
	}
}

impl<F: FieldExt> Mul for &Polynomial<F> {
	type Output = Polynomial<F>;

	fn mul(self, rhs: Self) -> Polynomial<F> {
		if self.is_zero() || rhs.is_zero() {
			return Polynomial::zero();
		}
		let mut coeffs = vec![F::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
		for (i, &a) in self.coeffs.iter().enumerate() {
			for (j, &b) in rhs.coeffs.iter().enumerate() {
				coeffs[i + j] += a * b;
			}
		}
		Polynomial::new(coeffs)
	}
}

macro_rules! impl_owned_binop {
	($trait:ident, $method:ident) => {
		impl<F: FieldExt> $trait for Polynomial<F> {
			type Output = Polynomial<F>;

			fn $method(self, rhs: Self) -> Polynomial<F> {
				(&self).$method(&rhs)
			}
		}
	};
}

impl_owned_binop!(Add, add);
impl_owned_binop!(Sub, sub);
impl_owned_binop!(Mul, mul);

impl<F: FieldExt> Neg for Polynomial<F> {
	type Output = Polynomial<F>;

	fn neg(self) -> Polynomial<F> {
		-&self
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use ecstark_field::{StarkField, ToyField, UniformRand};
	use proptest::prelude::*;
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;

	type F = ToyField;

	fn random_poly(rng: &mut StdRng, len: usize) -> Polynomial<F> {
		Polynomial::new((0..len).map(|_| F::rand(rng)).collect())
	}

	fn felts(values: &[u64]) -> Vec<F> {
		values.iter().map(|&v| F::from(v)).collect()
	}

	#[test]
	fn test_canonical_form() {
		let p = Polynomial::new(felts(&[1, 2, 0, 0]));
		assert_eq!(p.coeffs(), felts(&[1, 2]).as_slice());
		assert_eq!(p.degree(), Some(1));
		assert_eq!(Polynomial::<F>::new(felts(&[0, 0])).degree(), None);
		assert_eq!(Polynomial::<F>::zero(), Polynomial::new(felts(&[0])));
		assert_eq!(Polynomial::constant(F::from(5u64)).degree(), Some(0));
	}

	#[test]
	fn test_arithmetic() {
		// (1 + x)(1 - x) = 1 - x^2
		let a = Polynomial::new(felts(&[1, 1]));
		let b = Polynomial::new(vec![F::one(), -F::one()]);
		assert_eq!(&a * &b, Polynomial::new(vec![F::one(), F::zero(), -F::one()]));
		assert_eq!(&a + &b, Polynomial::constant(F::from(2u64)));
		assert_eq!(&a - &a, Polynomial::zero());
		assert_eq!(a.scale(F::from(3u64)).coeffs(), felts(&[3, 3]).as_slice());
		assert_eq!(a.evaluate(F::from(10u64)), F::from(11u64));
	}

	#[test]
	fn test_compose() {
		// p(x) = x^2 + 1, q(x) = 2x + 3, p(q(x)) = 4x^2 + 12x + 10
		let p = Polynomial::new(felts(&[1, 0, 1]));
		let q = Polynomial::new(felts(&[3, 2]));
		assert_eq!(p.compose(&q), Polynomial::new(felts(&[10, 12, 4])));
	}

	#[test]
	fn test_inexact_division() {
		let p = Polynomial::new(felts(&[1, 0, 1]));
		let d = Polynomial::new(felts(&[1, 1]));
		assert_matches!(p.div_exact(&d), Err(Error::InexactDivision));
		assert_matches!(p.div_rem(&Polynomial::zero()), Err(Error::DivisionByZeroPolynomial));

		let (q, r) = p.div_rem(&d).unwrap();
		assert_eq!(&(&q * &d) + &r, p);
		assert_eq!(r, Polynomial::constant(F::from(2u64)));
	}

	#[test]
	fn test_div_by_xn_minus_c() {
		let mut rng = StdRng::seed_from_u64(0);
		let c = F::rand(&mut rng);
		let q = random_poly(&mut rng, 20);
		let divisor = &Polynomial::monomial(8, F::one()) - &Polynomial::constant(c);
		let product = &q * &divisor;

		assert_eq!(product.div_exact_by_xn_minus_c(8, c).unwrap(), q);
		assert_eq!(product.div_exact(&divisor).unwrap(), q);

		let perturbed = &product + &Polynomial::constant(F::one());
		assert_matches!(
			perturbed.div_exact_by_xn_minus_c(8, c),
			Err(Error::InexactDivision)
		);
		assert_matches!(
			Polynomial::new(felts(&[1, 2])).div_exact_by_xn_minus_c(4, c),
			Err(Error::InexactDivision)
		);
	}

	#[test]
	fn test_vanishing_multiple_agrees_on_subgroup() {
		let mut rng = StdRng::seed_from_u64(1);
		let p = random_poly(&mut rng, 8);
		let mask = random_poly(&mut rng, 5);
		let blinded = p.add_vanishing_multiple(8, &mask);
		assert_eq!(blinded.degree(), Some(12));

		let domain = EvaluationDomain::<F>::subgroup(3).unwrap();
		for x in domain.elements() {
			assert_eq!(blinded.evaluate(x), p.evaluate(x));
		}
		let x = F::rand(&mut rng);
		assert_ne!(blinded.evaluate(x), p.evaluate(x));
		assert_eq!(p.add_vanishing_multiple(8, &Polynomial::zero()), p);
	}

	#[test]
	fn test_vanishing() {
		let roots = felts(&[3, 7, 11]);
		let v = Polynomial::vanishing(&roots);
		assert_eq!(v.degree(), Some(3));
		for &r in &roots {
			assert_eq!(v.evaluate(r), F::zero());
		}
		assert_ne!(v.evaluate(F::from(4u64)), F::zero());
	}

	#[test]
	fn test_interpolate_duplicate_point() {
		assert_matches!(
			Polynomial::interpolate(&felts(&[1, 2, 1]), &felts(&[5, 6, 7])),
			Err(Error::DuplicatePoint)
		);
		assert_matches!(
			Polynomial::interpolate(&felts(&[1, 2]), &felts(&[5])),
			Err(Error::IncorrectArgumentLength { .. })
		);
	}

	#[test]
	fn test_fold_matches_even_odd() {
		let mut rng = StdRng::seed_from_u64(1);
		let p = random_poly(&mut rng, 9);
		let beta = F::rand(&mut rng);
		let x = F::rand(&mut rng);

		let (even, odd) = p.even_odd();
		assert_eq!(p.evaluate(x), even.evaluate(x * x) + x * odd.evaluate(x * x));
		assert_eq!(p.fold(beta).degree(), Some(4));
		assert_eq!(p.fold(beta).evaluate(x), even.evaluate(x) + beta * odd.evaluate(x));
	}

	#[test]
	fn test_evaluate_over_coset_matches_horner() {
		let mut rng = StdRng::seed_from_u64(2);
		let domain = EvaluationDomain::<StarkField>::coset(5).unwrap();
		let p = Polynomial::new((0..20).map(|_| StarkField::rand(&mut rng)).collect());

		let evals = p.evaluate_over(&domain).unwrap();
		for (x, y) in domain.elements().into_iter().zip(&evals) {
			assert_eq!(p.evaluate(x), *y);
		}
		assert_eq!(Polynomial::interpolate_over(&domain, &evals).unwrap(), p);
	}

	proptest! {
		#[test]
		fn test_interpolate_reproduces_values(n in 1usize..=16, seed in any::<u64>()) {
			let mut rng = StdRng::seed_from_u64(seed);
			let mut points = Vec::with_capacity(n);
			while points.len() < n {
				let x = F::rand(&mut rng);
				if !points.contains(&x) {
					points.push(x);
				}
			}
			let values = (0..n).map(|_| F::rand(&mut rng)).collect::<Vec<_>>();

			let p = Polynomial::interpolate(&points, &values).unwrap();
			prop_assert!(p.degree().map_or(true, |d| d < n));
			for (&x, &y) in points.iter().zip(&values) {
				prop_assert_eq!(p.evaluate(x), y);
			}
		}

		#[test]
		fn test_mul_then_div_is_identity(f_len in 0usize..24, g_len in 1usize..12, seed in any::<u64>()) {
			let mut rng = StdRng::seed_from_u64(seed);
			let f = random_poly(&mut rng, f_len);
			let mut g = random_poly(&mut rng, g_len);
			if g.is_zero() {
				g = Polynomial::constant(F::one());
			}
			prop_assert_eq!((&f * &g).div_exact(&g).unwrap(), f);
		}
	}
}
