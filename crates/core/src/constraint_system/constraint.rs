// Copyright 2024-2025 Irreducible Inc.

use ecstark_field::FieldExt;
use ecstark_math::{ArithExpr, Polynomial};

/// The trace rows on which a constraint must vanish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintTarget {
	/// Every row; $Z(x) = x^N - 1$.
	AllRows,
	/// Every row but the last, for transitions; $Z(x) = (x^N - 1) / (x - g^{N-1})$.
	AllButLast,
	/// The listed rows; $Z(x) = \prod_r (x - g^r)$.
	Rows(Vec<usize>),
}

impl ConstraintTarget {
	pub fn rows(&self, n_rows: usize) -> Vec<usize> {
		match self {
			Self::AllRows => (0..n_rows).collect(),
			Self::AllButLast => (0..n_rows - 1).collect(),
			Self::Rows(rows) => rows.clone(),
		}
	}

	pub fn includes_last_row(&self, n_rows: usize) -> bool {
		match self {
			Self::AllRows => true,
			Self::AllButLast => false,
			Self::Rows(rows) => rows.contains(&(n_rows - 1)),
		}
	}

	/// Degree of the vanishing polynomial.
	pub fn vanishing_degree(&self, n_rows: usize) -> usize {
		match self {
			Self::AllRows => n_rows,
			Self::AllButLast => n_rows - 1,
			Self::Rows(rows) => rows.len(),
		}
	}

	/// Divides `numerator` by the vanishing polynomial over a trace of `n_rows` rows generated by
	/// `generator`.
	///
	/// ## Throws
	///
	/// * [`ecstark_math::Error::InexactDivision`] if the numerator does not vanish on every target
	///   row
	pub fn divide<F: FieldExt>(
		&self,
		numerator: &Polynomial<F>,
		n_rows: usize,
		generator: F,
	) -> Result<Polynomial<F>, ecstark_math::Error> {
		match self {
			Self::AllRows => numerator.div_exact_by_xn_minus_c(n_rows, F::one()),
			Self::AllButLast => {
				let last = generator.pow([n_rows as u64 - 1]);
				numerator
					.mul_linear(last)
					.div_exact_by_xn_minus_c(n_rows, F::one())
			}
			Self::Rows(rows) => {
				let roots = rows
					.iter()
					.map(|&row| generator.pow([row as u64]))
					.collect::<Vec<_>>();
				numerator.div_exact(&Polynomial::vanishing(&roots))
			}
		}
	}

	/// Evaluates the vanishing polynomial at `x`.
	///
	/// ## Throws
	///
	/// * [`ecstark_field::Error::DivisionByZero`] if `x` is the last row's point and the target
	///   excludes it
	pub fn evaluate_vanishing<F: FieldExt>(
		&self,
		x: F,
		n_rows: usize,
		generator: F,
	) -> Result<F, ecstark_field::Error> {
		match self {
			Self::AllRows => Ok(x.pow([n_rows as u64]) - F::one()),
			Self::AllButLast => {
				let last = generator.pow([n_rows as u64 - 1]);
				(x.pow([n_rows as u64]) - F::one()).checked_div(&(x - last))
			}
			Self::Rows(rows) => Ok(rows
				.iter()
				.map(|&row| x - generator.pow([row as u64]))
				.product()),
		}
	}
}

/// A named polynomial identity over the cells of two consecutive rows.
#[derive(Debug, Clone)]
pub struct Constraint<F> {
	pub name: String,
	pub expr: ArithExpr<F>,
	pub target: ConstraintTarget,
}

impl<F: FieldExt> Constraint<F> {
	pub fn degree(&self) -> usize {
		self.expr.degree()
	}

	/// Upper bound on the degree of the quotient by the vanishing polynomial, for columns of
	/// degree at most `column_degree`.
	pub fn quotient_degree_bound(&self, n_rows: usize, column_degree: usize) -> usize {
		(self.degree() * column_degree).saturating_sub(self.target.vanishing_degree(n_rows))
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use ecstark_field::ToyField;
	use ecstark_math::EvaluationDomain;

	use super::*;

	type F = ToyField;

	#[test]
	fn test_vanishing_evaluations_match_division() {
		let domain = EvaluationDomain::<F>::subgroup(3).unwrap();
		let g = domain.generator();
		let x = F::from(1234567u64);

		for target in [
			ConstraintTarget::AllRows,
			ConstraintTarget::AllButLast,
			ConstraintTarget::Rows(vec![0, 5]),
		] {
			let roots = target
				.rows(8)
				.into_iter()
				.map(|row| domain.element(row))
				.collect::<Vec<_>>();
			let z = Polynomial::vanishing(&roots);
			assert_eq!(target.evaluate_vanishing(x, 8, g).unwrap(), z.evaluate(x));
			assert_eq!(target.vanishing_degree(8), roots.len());

			let cofactor = Polynomial::new(vec![F::from(3u64), F::from(1u64)]);
			let product = &z * &cofactor;
			assert_eq!(target.divide(&product, 8, g).unwrap(), cofactor);
		}
	}

	#[test]
	fn test_division_by_non_vanishing_fails() {
		let g = EvaluationDomain::<F>::subgroup(3).unwrap().generator();
		let numerator = Polynomial::x();
		assert_matches!(
			ConstraintTarget::AllButLast.divide(&numerator, 8, g),
			Err(ecstark_math::Error::InexactDivision)
		);
		assert!(ConstraintTarget::Rows(vec![7]).includes_last_row(8));
		assert!(!ConstraintTarget::AllButLast.includes_last_row(8));
	}
}
