// Copyright 2024 Irreducible Inc.

use ecstark_curve::{
	trace::{AddRegisters, LadderRegisters},
	AffinePoint,
};
use ecstark_field::FieldExt;
use ecstark_math::{TraceBuilder, TraceLayout};
use ecstark_utils::ensure;
use num_bigint::BigUint;

use crate::{error::Error, pedersen::PedersenHash};

/// Register layout of one traced hash: four ladders side by side, then the additions that combine
/// them on the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PedersenRegisters {
	pub a_low: LadderRegisters,
	pub a_high: LadderRegisters,
	pub b_low: LadderRegisters,
	pub b_high: LadderRegisters,
	/// `a_low * g0 + a_high * g1`
	pub a_sum: AddRegisters,
	/// `b_low * g2 + b_high * g3`
	pub b_sum: AddRegisters,
	pub total: AddRegisters,
	/// `offset + total`, whose x-coordinate is the digest
	pub output: AddRegisters,
}

impl PedersenRegisters {
	pub fn new(layout: &mut TraceLayout, prefix: &str) -> Result<Self, ecstark_math::Error> {
		Ok(Self {
			a_low: LadderRegisters::new(layout, &format!("{prefix}.a_low"))?,
			a_high: LadderRegisters::new(layout, &format!("{prefix}.a_high"))?,
			b_low: LadderRegisters::new(layout, &format!("{prefix}.b_low"))?,
			b_high: LadderRegisters::new(layout, &format!("{prefix}.b_high"))?,
			a_sum: AddRegisters::new(layout, &format!("{prefix}.a_sum"))?,
			b_sum: AddRegisters::new(layout, &format!("{prefix}.b_sum"))?,
			total: AddRegisters::new(layout, &format!("{prefix}.total"))?,
			output: AddRegisters::new(layout, &format!("{prefix}.output"))?,
		})
	}

	pub fn ladders(&self) -> [&LadderRegisters; 4] {
		[&self.a_low, &self.a_high, &self.b_low, &self.b_high]
	}

	pub fn final_adds(&self) -> [&AddRegisters; 4] {
		[&self.a_sum, &self.b_sum, &self.total, &self.output]
	}
}

impl<F: FieldExt> PedersenHash<F> {
	/// Rows of a traced hash: the smallest power of two that fits a ladder over the low part.
	pub fn trace_rows(&self) -> usize {
		let params = self.params();
		(params.low_bits().max(params.high_bits()) + 1).next_power_of_two()
	}

	/// Hashes `a` and `b` while writing the whole computation into `builder`.
	///
	/// Every ladder runs over `n_rows - 1` bits regardless of the part widths, so the trace shape
	/// is identical for all inputs. The combining additions occupy the last row; their cells on
	/// earlier rows are zero.
	#[tracing::instrument(skip_all, level = "debug")]
	pub fn trace_hash(
		&self,
		builder: &mut TraceBuilder<F>,
		registers: &PedersenRegisters,
		a: &BigUint,
		b: &BigUint,
	) -> Result<AffinePoint<F>, Error> {
		let params = self.params();
		let n_rows = builder.n_rows();
		let required = params.low_bits().max(params.high_bits()) + 1;
		ensure!(n_rows >= required, Error::TraceTooShort { n_rows, required });
		let bits = params.input_bits();
		for value in [a, b] {
			ensure!(
				value.bits() <= bits as u64,
				Error::InputOutOfRange {
					value: value.to_str_radix(10),
					bits,
				}
			);
		}

		let curve = self.curve();
		let n_steps = n_rows - 1;
		let (a_low, a_high) = self.split(a);
		let (b_low, b_high) = self.split(b);
		let parts = [a_low, a_high, b_low, b_high];
		let mut products = Vec::with_capacity(4);
		for ((ladder, part), generator) in registers
			.ladders()
			.into_iter()
			.zip(&parts)
			.zip(params.generators())
		{
			products.push(curve.trace_mul(builder, ladder, part, generator, n_steps)?);
		}

		let last = n_rows - 1;
		for add in registers.final_adds() {
			for register in add.registers() {
				builder.fill(register, 0..last, F::zero())?;
			}
		}

		builder.seek(last)?;
		let a_sum = curve.trace_add(builder, &registers.a_sum, &products[0], &products[1])?;
		let b_sum = curve.trace_add(builder, &registers.b_sum, &products[2], &products[3])?;
		let total = curve.trace_add(builder, &registers.total, &a_sum, &b_sum)?;
		let output = curve.trace_add(builder, &registers.output, &params.offset(), &total)?;
		Ok(output)
	}
}
