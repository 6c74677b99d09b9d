// Copyright 2024 Irreducible Inc.

use ecstark_curve::trace::AddRegisters;
use ecstark_field::FieldExt;
use ecstark_math::{ArithExpr, RowOffset};

use super::{cell, ExprPoint};
use crate::constraint_system::{error::Error, ConstraintSystem, ConstraintTarget};

/// Constrains the add registers, read at `offset`, to hold `p + q`.
///
/// The chord is checked on the raw coordinates:
///
/// $$
/// \lambda (q_x - p_x) = q_y - p_y, \quad c_x = \lambda^2 - p_x - q_x, \quad
/// c_y = \lambda (p_x - c_x) - p_y
/// $$
///
/// and the result selects `q` when `p` is the identity, `p` when `q` is, and the chord otherwise.
/// Its flag is the product of both flags. The selection is only complete when the operands are
/// never equal or opposite finite points, which the ladder guarantees. The identity is encoded as
/// $(0, 1)$, so neither operand may be a finite point with $x = 0$ while the other is the
/// identity: the slope constraint then has no solution.
pub fn ec_add<F: FieldExt>(
	cs: &mut ConstraintSystem<F>,
	name: &str,
	registers: &AddRegisters,
	offset: RowOffset,
	p: &ExprPoint<F>,
	q: &ExprPoint<F>,
	target: &ConstraintTarget,
) -> Result<(), Error> {
	let lambda = cell(registers.lambda, offset);
	let chord_x = cell::<F>(registers.chord_x, offset);
	let chord_y = cell::<F>(registers.chord_y, offset);
	let result = ExprPoint::at(&registers.result, offset);

	cs.add(
		format!("{name}.lambda"),
		lambda.clone() * (q.x.clone() - p.x.clone()) - (q.y.clone() - p.y.clone()),
		target.clone(),
	)?;
	cs.add(
		format!("{name}.chord_x"),
		chord_x.clone() - (lambda.clone().square() - p.x.clone() - q.x.clone()),
		target.clone(),
	)?;
	cs.add(
		format!("{name}.chord_y"),
		chord_y.clone() - (lambda * (p.x.clone() - chord_x.clone()) - p.y.clone()),
		target.clone(),
	)?;

	let one = ArithExpr::<F>::one();
	let select = |pv: &ArithExpr<F>, qv: &ArithExpr<F>, cv: ArithExpr<F>| {
		p.inf.clone() * qv.clone()
			+ (one.clone() - p.inf.clone())
				* (q.inf.clone() * pv.clone() + (one.clone() - q.inf.clone()) * cv)
	};
	cs.add(
		format!("{name}.result.x"),
		result.x - select(&p.x, &q.x, chord_x),
		target.clone(),
	)?;
	cs.add(
		format!("{name}.result.y"),
		result.y - select(&p.y, &q.y, chord_y),
		target.clone(),
	)?;
	cs.add(
		format!("{name}.result.inf"),
		result.inf - p.inf.clone() * q.inf.clone(),
		target.clone(),
	)
}
