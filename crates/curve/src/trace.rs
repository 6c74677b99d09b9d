// Copyright 2024-2025 Irreducible Inc.

//! Trace-emitting group operations.
//!
//! The functions here compute the same values as [`Curve`] but also write every intermediate
//! field element into a [`TraceBuilder`]. They never branch on data: infinity handling and ladder
//! bit selection are written as 0/1 selector arithmetic, so that polynomial constraints over the
//! emitted cells can check them.

use ecstark_field::FieldExt;
use ecstark_math::{Register, TraceBuilder, TraceLayout};
use ecstark_utils::{bail, ensure};
use num_bigint::BigUint;

use crate::{
	arithmetic::{chord_result, chord_slope, Curve},
	error::Error,
	point::AffinePoint,
};

/// The three cells of a point: `x`, `y` and the infinity flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointRegisters {
	pub x: Register,
	pub y: Register,
	pub inf: Register,
}

impl PointRegisters {
	pub fn new(layout: &mut TraceLayout, prefix: &str) -> Result<Self, ecstark_math::Error> {
		Ok(Self {
			x: layout.add_register(format!("{prefix}.x"))?,
			y: layout.add_register(format!("{prefix}.y"))?,
			inf: layout.add_register(format!("{prefix}.inf"))?,
		})
	}

	pub fn write<F: FieldExt>(
		&self,
		builder: &mut TraceBuilder<F>,
		point: &AffinePoint<F>,
	) -> Result<(), Error> {
		builder.write(self.x, point.x)?;
		builder.write(self.y, point.y)?;
		builder.write(self.inf, point.infinity_flag())?;
		Ok(())
	}

	/// Writes zeros into all three cells of the row under the cursor.
	pub fn write_zero<F: FieldExt>(&self, builder: &mut TraceBuilder<F>) -> Result<(), Error> {
		for register in [self.x, self.y, self.inf] {
			builder.write(register, F::zero())?;
		}
		Ok(())
	}

	pub fn registers(&self) -> [Register; 3] {
		[self.x, self.y, self.inf]
	}
}

/// Cells of one chord addition: the slope, the generic chord result and the selected result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddRegisters {
	pub lambda: Register,
	pub chord_x: Register,
	pub chord_y: Register,
	pub result: PointRegisters,
}

impl AddRegisters {
	pub fn new(layout: &mut TraceLayout, prefix: &str) -> Result<Self, ecstark_math::Error> {
		Ok(Self {
			lambda: layout.add_register(format!("{prefix}.lambda"))?,
			chord_x: layout.add_register(format!("{prefix}.chord_x"))?,
			chord_y: layout.add_register(format!("{prefix}.chord_y"))?,
			result: PointRegisters::new(layout, &format!("{prefix}.result"))?,
		})
	}

	pub fn registers(&self) -> Vec<Register> {
		let mut registers = vec![self.lambda, self.chord_x, self.chord_y];
		registers.extend(self.result.registers());
		registers
	}

	fn write_zero<F: FieldExt>(&self, builder: &mut TraceBuilder<F>) -> Result<(), Error> {
		for register in [self.lambda, self.chord_x, self.chord_y] {
			builder.write(register, F::zero())?;
		}
		self.result.write_zero(builder)
	}
}

/// Cells of one doubling: the tangent slope, the generic tangent result and the selected result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleRegisters {
	pub lambda: Register,
	pub tangent_x: Register,
	pub tangent_y: Register,
	pub result: PointRegisters,
}

impl DoubleRegisters {
	pub fn new(layout: &mut TraceLayout, prefix: &str) -> Result<Self, ecstark_math::Error> {
		Ok(Self {
			lambda: layout.add_register(format!("{prefix}.lambda"))?,
			tangent_x: layout.add_register(format!("{prefix}.tangent_x"))?,
			tangent_y: layout.add_register(format!("{prefix}.tangent_y"))?,
			result: PointRegisters::new(layout, &format!("{prefix}.result"))?,
		})
	}

	fn write_zero<F: FieldExt>(&self, builder: &mut TraceBuilder<F>) -> Result<(), Error> {
		for register in [self.lambda, self.tangent_x, self.tangent_y] {
			builder.write(register, F::zero())?;
		}
		self.result.write_zero(builder)
	}
}

/// One Montgomery ladder laid out one step per row.
///
/// Row 0 holds the initial registers `r0 = O`, `r1 = base` with `step = acc = 0`. Row `i > 0`
/// holds the bit consumed by step `i`, the operand selected for doubling, the add and double
/// results and the updated ladder registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LadderRegisters {
	pub step: Register,
	pub bit: Register,
	pub acc: Register,
	pub selected: PointRegisters,
	pub add: AddRegisters,
	pub double: DoubleRegisters,
	pub r0: PointRegisters,
	pub r1: PointRegisters,
}

impl LadderRegisters {
	pub fn new(layout: &mut TraceLayout, prefix: &str) -> Result<Self, ecstark_math::Error> {
		Ok(Self {
			step: layout.add_register(format!("{prefix}.step"))?,
			bit: layout.add_register(format!("{prefix}.bit"))?,
			acc: layout.add_register(format!("{prefix}.acc"))?,
			selected: PointRegisters::new(layout, &format!("{prefix}.selected"))?,
			add: AddRegisters::new(layout, &format!("{prefix}.add"))?,
			double: DoubleRegisters::new(layout, &format!("{prefix}.double"))?,
			r0: PointRegisters::new(layout, &format!("{prefix}.r0"))?,
			r1: PointRegisters::new(layout, &format!("{prefix}.r1"))?,
		})
	}
}

impl<F: FieldExt> Curve<F> {
	/// Chord addition that records the slope, the generic chord point and the selected result.
	///
	/// The slope is always computed from the raw coordinates. When both operands are the identity
	/// it is unconstrained and written as 0.
	///
	/// The identity is encoded as $(0, 1)$, so a finite operand with $x = 0$ next to the identity
	/// has no chord and the `ec_add` gadget cannot be satisfied for it.
	///
	/// ## Throws
	///
	/// * [`Error::ZeroAbscissa`] if exactly one operand is the identity and the other has $x = 0$
	pub fn trace_add(
		&self,
		builder: &mut TraceBuilder<F>,
		registers: &AddRegisters,
		p: &AffinePoint<F>,
		q: &AffinePoint<F>,
	) -> Result<AffinePoint<F>, Error> {
		let finite_on_axis = |a: &AffinePoint<F>| !a.is_infinity() && a.x.is_zero();
		ensure!(
			!((p.is_infinity() && finite_on_axis(q)) || (q.is_infinity() && finite_on_axis(p))),
			Error::ZeroAbscissa
		);
		let both_infinite = p.infinity_flag() * q.infinity_flag();
		let lambda = if both_infinite.is_zero() {
			chord_slope(p, q)?
		} else {
			F::zero()
		};
		let chord = chord_result(p, q, lambda);

		let (ip, iq) = (p.infinity_flag(), q.infinity_flag());
		let select = |pv: F, qv: F, cv: F| {
			ip * qv + (F::one() - ip) * (iq * pv + (F::one() - iq) * cv)
		};
		let result = AffinePoint {
			x: select(p.x, q.x, chord.x),
			y: select(p.y, q.y, chord.y),
			infinity: !both_infinite.is_zero(),
		};

		builder.write(registers.lambda, lambda)?;
		builder.write(registers.chord_x, chord.x)?;
		builder.write(registers.chord_y, chord.y)?;
		registers.result.write(builder, &result)?;
		Ok(result)
	}

	/// Doubling that records the tangent slope, the generic tangent point and the result.
	pub fn trace_double(
		&self,
		builder: &mut TraceBuilder<F>,
		registers: &DoubleRegisters,
		p: &AffinePoint<F>,
	) -> Result<AffinePoint<F>, Error> {
		let lambda = self
			.tangent_slope(p)
			.ok_or(Error::FieldError(ecstark_field::Error::DivisionByZero))?;
		let tangent = chord_result(p, p, lambda);

		let ip = p.infinity_flag();
		let result = AffinePoint {
			x: (F::one() - ip) * tangent.x,
			y: (F::one() - ip) * tangent.y + ip,
			infinity: p.infinity,
		};

		builder.write(registers.lambda, lambda)?;
		builder.write(registers.tangent_x, tangent.x)?;
		builder.write(registers.tangent_y, tangent.y)?;
		registers.result.write(builder, &result)?;
		Ok(result)
	}

	/// Montgomery ladder over `n_steps` bits of `k`, most significant first, one row per step.
	///
	/// Writes rows `0..=n_steps` starting from the top of the trace and returns `k * base`. The
	/// trace shape depends only on `n_steps`, never on the value of `k`.
	///
	/// ## Throws
	///
	/// * [`Error::ScalarTooWide`] if `k` does not fit in `n_steps` bits
	#[tracing::instrument(skip_all, level = "trace", fields(n_steps))]
	pub fn trace_mul(
		&self,
		builder: &mut TraceBuilder<F>,
		registers: &LadderRegisters,
		k: &BigUint,
		base: &AffinePoint<F>,
		n_steps: usize,
	) -> Result<AffinePoint<F>, Error> {
		if k.bits() > n_steps as u64 {
			bail!(Error::ScalarTooWide {
				bits: k.bits(),
				width: n_steps,
			});
		}

		builder.seek(0)?;
		let mut r0 = AffinePoint::infinity();
		let mut r1 = *base;
		let mut acc = F::zero();
		builder.write(registers.step, F::zero())?;
		builder.write(registers.bit, F::zero())?;
		builder.write(registers.acc, acc)?;
		registers.selected.write_zero(builder)?;
		registers.add.write_zero(builder)?;
		registers.double.write_zero(builder)?;
		registers.r0.write(builder, &r0)?;
		registers.r1.write(builder, &r1)?;

		for step in 1..=n_steps {
			builder.next_row()?;
			let bit = F::from(k.bit((n_steps - step) as u64) as u64);
			acc = acc.double() + bit;

			let selected = AffinePoint {
				x: r0.x + bit * (r1.x - r0.x),
				y: r0.y + bit * (r1.y - r0.y),
				infinity: (r0.infinity_flag() + bit * (r1.infinity_flag() - r0.infinity_flag()))
					.is_one(),
			};
			let added = self.trace_add(builder, &registers.add, &r0, &r1)?;
			let doubled = self.trace_double(builder, &registers.double, &selected)?;
			let next_r0 = blend(&doubled, &added, bit);
			let next_r1 = blend(&added, &doubled, bit);

			builder.write(registers.step, F::from(step as u64))?;
			builder.write(registers.bit, bit)?;
			builder.write(registers.acc, acc)?;
			registers.selected.write(builder, &selected)?;
			registers.r0.write(builder, &next_r0)?;
			registers.r1.write(builder, &next_r1)?;
			r0 = next_r0;
			r1 = next_r1;
		}
		Ok(r0)
	}
}

/// `a + bit * (b - a)` coordinate-wise, including the flag.
fn blend<F: FieldExt>(a: &AffinePoint<F>, b: &AffinePoint<F>, bit: F) -> AffinePoint<F> {
	AffinePoint {
		x: a.x + bit * (b.x - a.x),
		y: a.y + bit * (b.y - a.y),
		infinity: (a.infinity_flag() + bit * (b.infinity_flag() - a.infinity_flag())).is_one(),
	}
}
