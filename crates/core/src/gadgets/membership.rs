// Copyright 2024 Irreducible Inc.

use ecstark_field::FieldExt;
use ecstark_math::{ArithExpr, Register, TraceBuilder, TraceLayout};

use crate::constraint_system::{error::Error, ConstraintSystem};

/// The running product $\prod_{j \le i} (v - s_j)$ over a public set, one register per element.
///
/// The product is only meaningful on the row where membership is checked; every other row holds
/// zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipRegisters {
	pub chain: Vec<Register>,
}

impl MembershipRegisters {
	pub fn new(
		layout: &mut TraceLayout,
		prefix: &str,
		set_size: usize,
	) -> Result<Self, ecstark_math::Error> {
		let chain = (0..set_size)
			.map(|i| layout.add_register(format!("{prefix}.m{i}")))
			.collect::<Result<_, _>>()?;
		Ok(Self { chain })
	}

	/// Writes the running product of `value` against `set` on `row` and zeros everywhere else.
	pub fn write<F: FieldExt>(
		&self,
		builder: &mut TraceBuilder<F>,
		value: F,
		set: &[F],
		row: usize,
	) -> Result<(), ecstark_math::Error> {
		let n_rows = builder.n_rows();
		let mut product = F::one();
		for (&register, &element) in self.chain.iter().zip(set) {
			product *= value - element;
			builder.fill(register, 0..row, F::zero())?;
			builder.write_at(register, row, product)?;
			builder.fill(register, row + 1..n_rows, F::zero())?;
		}
		Ok(())
	}
}

/// Constrains `value`, evaluated on `row`, to be one of the elements of `set`.
///
/// Each chain register extends the product by one factor, which keeps every constraint at degree
/// two, and the last one must vanish. `set` must have one element per chain register.
pub fn membership<F: FieldExt>(
	cs: &mut ConstraintSystem<F>,
	name: &str,
	registers: &MembershipRegisters,
	value: &ArithExpr<F>,
	set: &[F],
	row: usize,
) -> Result<(), Error> {
	let mut previous = None;
	for (i, (&register, &element)) in registers.chain.iter().zip(set).enumerate() {
		let factor = value.clone() - element.into();
		let product = match previous {
			None => factor,
			Some(previous) => ArithExpr::cur(previous) * factor,
		};
		cs.assert_at(format!("{name}.m{i}"), ArithExpr::cur(register) - product, vec![row])?;
		previous = Some(register);
	}
	if let Some(last) = previous {
		cs.assert_at(format!("{name}.member"), ArithExpr::cur(last), vec![row])?;
	}
	Ok(())
}
