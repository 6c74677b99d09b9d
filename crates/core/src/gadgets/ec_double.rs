// Copyright 2024 Irreducible Inc.

use ecstark_curve::{trace::DoubleRegisters, CurveParams};
use ecstark_field::FieldExt;
use ecstark_math::{ArithExpr, RowOffset};

use super::{cell, ExprPoint};
use crate::constraint_system::{error::Error, ConstraintSystem, ConstraintTarget};

/// Constrains the double registers, read at `offset`, to hold `2 * s`.
///
/// The tangent $\lambda \cdot 2 s_y = 3 s_x^2 + \alpha$ is checked on the raw coordinates, so the
/// identity sentinel `(0, 1)` has a well-defined slope. The result is the tangent point for finite
/// `s` and the sentinel otherwise.
pub fn ec_double<F: FieldExt>(
	cs: &mut ConstraintSystem<F>,
	name: &str,
	curve: &CurveParams<F>,
	registers: &DoubleRegisters,
	offset: RowOffset,
	s: &ExprPoint<F>,
	target: &ConstraintTarget,
) -> Result<(), Error> {
	let lambda = cell(registers.lambda, offset);
	let tangent_x = cell::<F>(registers.tangent_x, offset);
	let tangent_y = cell::<F>(registers.tangent_y, offset);
	let result = ExprPoint::at(&registers.result, offset);
	let two = ArithExpr::constant(F::from(2u64));
	let three = ArithExpr::constant(F::from(3u64));

	cs.add(
		format!("{name}.lambda"),
		lambda.clone() * two.clone() * s.y.clone()
			- (three * s.x.clone().square() + curve.alpha().into()),
		target.clone(),
	)?;
	cs.add(
		format!("{name}.tangent_x"),
		tangent_x.clone() - (lambda.clone().square() - two * s.x.clone()),
		target.clone(),
	)?;
	cs.add(
		format!("{name}.tangent_y"),
		tangent_y.clone() - (lambda * (s.x.clone() - tangent_x.clone()) - s.y.clone()),
		target.clone(),
	)?;

	let finite = ArithExpr::one() - s.inf.clone();
	cs.add(
		format!("{name}.result.x"),
		result.x - finite.clone() * tangent_x,
		target.clone(),
	)?;
	cs.add(
		format!("{name}.result.y"),
		result.y - (finite * tangent_y + s.inf.clone()),
		target.clone(),
	)?;
	cs.add(
		format!("{name}.result.inf"),
		result.inf - s.inf.clone(),
		target.clone(),
	)
}
