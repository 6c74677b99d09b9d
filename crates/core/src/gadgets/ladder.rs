// Copyright 2024 Irreducible Inc.

use ecstark_curve::{trace::LadderRegisters, AffinePoint, CurveParams};
use ecstark_field::FieldExt;
use ecstark_math::{ArithExpr, RowOffset};

use super::{ec_add, ec_double, ExprPoint};
use crate::constraint_system::{error::Error, ConstraintSystem, ConstraintTarget};

/// Constrains a Montgomery ladder over `base`, one step per row, as written by
/// [`ecstark_curve::Curve::trace_mul`].
///
/// Row 0 starts from `r0 = O`, `r1 = base` with a zero step counter and accumulator. Every
/// transition consumes the boolean `bit` of the next row, checks the addition `r0 + r1` and the
/// doubling of the register the bit selects, and swaps the results into `r0, r1`. After the last
/// row, `r0` is `acc * base`.
pub fn ladder<F: FieldExt>(
	cs: &mut ConstraintSystem<F>,
	name: &str,
	curve: &CurveParams<F>,
	registers: &LadderRegisters,
	base: &AffinePoint<F>,
) -> Result<(), Error> {
	let identity = AffinePoint::infinity();
	for (suffix, register, value) in [
		("step", registers.step, F::zero()),
		("bit", registers.bit, F::zero()),
		("acc", registers.acc, F::zero()),
		("r0.x", registers.r0.x, identity.x),
		("r0.y", registers.r0.y, identity.y),
		("r0.inf", registers.r0.inf, identity.infinity_flag()),
		("r1.x", registers.r1.x, base.x),
		("r1.y", registers.r1.y, base.y),
		("r1.inf", registers.r1.inf, base.infinity_flag()),
	] {
		cs.assert_boundary(format!("{name}.init.{suffix}"), register, 0, value)?;
	}

	let step = ArithExpr::cur(registers.step);
	let acc = ArithExpr::cur(registers.acc);
	let bit = ArithExpr::next(registers.bit);
	cs.assert_transition(
		format!("{name}.step"),
		ArithExpr::next(registers.step) - step - ArithExpr::one(),
	)?;
	cs.assert_transition(
		format!("{name}.bit"),
		bit.clone() * (bit.clone() - ArithExpr::one()),
	)?;
	cs.assert_transition(
		format!("{name}.acc"),
		ArithExpr::next(registers.acc) - ArithExpr::constant(F::from(2u64)) * acc - bit.clone(),
	)?;

	let r0 = ExprPoint::current(&registers.r0);
	let r1 = ExprPoint::current(&registers.r1);
	let selected = ExprPoint::next(&registers.selected);
	assert_point_eq(cs, &format!("{name}.selected"), &selected, &r0.select(&r1, &bit))?;

	let target = ConstraintTarget::AllButLast;
	ec_add(cs, &format!("{name}.add"), &registers.add, RowOffset::Next, &r0, &r1, &target)?;
	ec_double(
		cs,
		&format!("{name}.double"),
		curve,
		&registers.double,
		RowOffset::Next,
		&selected,
		&target,
	)?;

	let added = ExprPoint::next(&registers.add.result);
	let doubled = ExprPoint::next(&registers.double.result);
	assert_point_eq(
		cs,
		&format!("{name}.r0"),
		&ExprPoint::next(&registers.r0),
		&doubled.select(&added, &bit),
	)?;
	assert_point_eq(
		cs,
		&format!("{name}.r1"),
		&ExprPoint::next(&registers.r1),
		&added.select(&doubled, &bit),
	)
}

/// Requires the ladder scalar to fit in `width` bits by forcing the leading bits to zero.
///
/// Rows `1..=n_rows - 1 - width` carry those bits. Adds nothing when the ladder is exactly
/// `width` steps long.
pub fn ladder_width<F: FieldExt>(
	cs: &mut ConstraintSystem<F>,
	name: &str,
	registers: &LadderRegisters,
	width: usize,
) -> Result<(), Error> {
	let leading = (1..cs.n_rows().saturating_sub(width)).collect::<Vec<_>>();
	if leading.is_empty() {
		return Ok(());
	}
	cs.assert_at(format!("{name}.width"), ArithExpr::cur(registers.bit), leading)
}

/// Transition constraints `lhs = rhs` per coordinate.
fn assert_point_eq<F: FieldExt>(
	cs: &mut ConstraintSystem<F>,
	name: &str,
	lhs: &ExprPoint<F>,
	rhs: &ExprPoint<F>,
) -> Result<(), Error> {
	cs.assert_transition(format!("{name}.x"), lhs.x.clone() - rhs.x.clone())?;
	cs.assert_transition(format!("{name}.y"), lhs.y.clone() - rhs.y.clone())?;
	cs.assert_transition(format!("{name}.inf"), lhs.inf.clone() - rhs.inf.clone())
}
