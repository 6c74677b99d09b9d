// Copyright 2024 Irreducible Inc.

use std::sync::Arc;

use ecstark_curve::trace::LadderRegisters;
use ecstark_field::FieldExt;
use ecstark_hash::{PedersenHash, PedersenRegisters};
use ecstark_math::{ArithExpr, Register, RowOffset, Trace, TraceBuilder, TraceLayout};
use ecstark_utils::ensure;
use getset::Getters;
use rand::Rng;
use tracing::instrument;

use super::error::Error;
use crate::{
	constraint_system::{self, ConstraintSystem, ConstraintTarget, Proof, ProofOptions},
	gadgets::{ec_add, ladder, ladder_width, membership, ExprPoint, MembershipRegisters},
};

/// Registers of the membership trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PedersenMembershipRegisters {
	pub hash: PedersenRegisters,
	/// The public input, constant over the trace.
	pub b_value: Register,
	pub membership: MembershipRegisters,
}

/// Knowledge of `a` such that `Hash(a, b)` is one of a public set of digests, for a public `b`.
///
/// The trace is the traced hash of [`PedersenHash::trace_hash`]. Besides the ladder and addition
/// gadgets, the constraints bound every part to its split width, tie the accumulators of `b` back
/// to the public input and check the digest against the set on the last row.
///
/// The secret has no column of its own. It only exists as the two ladder accumulators
/// `a_low + 2^low * a_high`, so the statement is knowledge of an integer below `2^(low + high)`
/// whose split hashes into the set.
#[derive(Debug, Clone, Getters)]
pub struct PedersenMembershipAir<F> {
	#[getset(get = "pub")]
	hash: PedersenHash<F>,
	b: F,
	#[getset(get = "pub")]
	set: Vec<F>,
	#[getset(get = "pub")]
	registers: PedersenMembershipRegisters,
	#[getset(get = "pub")]
	constraint_system: ConstraintSystem<F>,
}

impl<F: FieldExt> PedersenMembershipAir<F> {
	/// ## Throws
	///
	/// * [`Error::EmptySet`] if `set` is empty
	#[instrument("PedersenMembershipAir::new", skip_all, level = "debug")]
	pub fn new(hash: PedersenHash<F>, b: F, set: Vec<F>) -> Result<Self, Error> {
		ensure!(!set.is_empty(), Error::EmptySet);

		let mut layout = TraceLayout::new();
		let registers = PedersenMembershipRegisters {
			hash: PedersenRegisters::new(&mut layout, "hash")?,
			b_value: layout.add_register("b_value")?,
			membership: MembershipRegisters::new(&mut layout, "set", set.len())?,
		};
		let constraint_system = constraints(&hash, b, &set, &registers, Arc::new(layout))?;
		tracing::debug!(
			n_rows = constraint_system.n_rows(),
			n_columns = constraint_system.layout().n_registers(),
			n_constraints = constraint_system.constraints().len(),
			"membership AIR built"
		);

		Ok(Self {
			hash,
			b,
			set,
			registers,
			constraint_system,
		})
	}

	pub fn b(&self) -> F {
		self.b
	}

	/// Writes the honest trace for the secret `a`.
	#[instrument("PedersenMembershipAir::generate_trace", skip_all, level = "debug")]
	pub fn generate_trace(&self, a: F) -> Result<Trace<F>, Error> {
		let n_rows = self.constraint_system.n_rows();
		let mut builder = TraceBuilder::new(self.constraint_system.layout().clone(), n_rows);
		let output = self.hash.trace_hash(
			&mut builder,
			&self.registers.hash,
			&a.to_biguint(),
			&self.b.to_biguint(),
		)?;
		builder.fill(self.registers.b_value, 0..n_rows, self.b)?;
		self.registers
			.membership
			.write(&mut builder, output.x, &self.set, n_rows - 1)?;
		Ok(builder.finish()?)
	}

	/// Proves knowledge of `a`, committing with the hash itself and blinding with `rng`.
	///
	/// ## Throws
	///
	/// * [`constraint_system::error::Error::InvalidWitness`] if `Hash(a, b)` is not in the set
	pub fn prove(&self, a: F, options: &ProofOptions, rng: impl Rng) -> Result<Proof<F>, Error> {
		let trace = self.generate_trace(a)?;
		Ok(constraint_system::prove(&self.constraint_system, &trace, &self.hash, options, rng)?)
	}

	pub fn verify(&self, proof: &Proof<F>, options: &ProofOptions) -> Result<(), Error> {
		Ok(constraint_system::verify(&self.constraint_system, proof, &self.hash, options)?)
	}
}

fn constraints<F: FieldExt>(
	hash: &PedersenHash<F>,
	b: F,
	set: &[F],
	registers: &PedersenMembershipRegisters,
	layout: Arc<TraceLayout>,
) -> Result<ConstraintSystem<F>, Error> {
	let params = hash.params();
	let curve = params.curve();
	let n_rows = hash.trace_rows();
	let last = n_rows - 1;
	let mut cs = ConstraintSystem::new(layout, n_rows)?;

	let parts = &registers.hash;
	let names = ["a_low", "a_high", "b_low", "b_high"];
	let widths = [
		params.low_bits(),
		params.high_bits(),
		params.low_bits(),
		params.high_bits(),
	];
	for (((name, part), generator), width) in names
		.into_iter()
		.zip(parts.ladders())
		.zip(params.generators())
		.zip(widths)
	{
		ladder(&mut cs, name, &curve, part, generator)?;
		ladder_width(&mut cs, name, part, width)?;
	}

	// a_low * g0 + a_high * g1 + b_low * g2 + b_high * g3 + offset, on the last row.
	let at_last = ConstraintTarget::Rows(vec![last]);
	let product = |ladder: &LadderRegisters| ExprPoint::current(&ladder.r0);
	let sum = |add: &ecstark_curve::trace::AddRegisters| ExprPoint::current(&add.result);
	ec_add(
		&mut cs,
		"a_sum",
		&parts.a_sum,
		RowOffset::Current,
		&product(&parts.a_low),
		&product(&parts.a_high),
		&at_last,
	)?;
	ec_add(
		&mut cs,
		"b_sum",
		&parts.b_sum,
		RowOffset::Current,
		&product(&parts.b_low),
		&product(&parts.b_high),
		&at_last,
	)?;
	ec_add(
		&mut cs,
		"total",
		&parts.total,
		RowOffset::Current,
		&sum(&parts.a_sum),
		&sum(&parts.b_sum),
		&at_last,
	)?;
	ec_add(
		&mut cs,
		"output",
		&parts.output,
		RowOffset::Current,
		&ExprPoint::constant(&params.offset()),
		&sum(&parts.total),
		&at_last,
	)?;
	cs.assert_boundary("output.finite", parts.output.result.inf, last, F::zero())?;

	// b_value = acc_low + 2^low_bits * acc_high
	let shift = ArithExpr::constant(F::from(2u64).pow([params.low_bits() as u64]));
	let b_value = registers.b_value;
	cs.assert_transition("b_value.constant", ArithExpr::next(b_value) - ArithExpr::cur(b_value))?;
	cs.assert_at(
		"b_value.decomposition",
		ArithExpr::cur(b_value)
			- (ArithExpr::cur(parts.b_low.acc) + shift * ArithExpr::cur(parts.b_high.acc)),
		vec![last],
	)?;

	// The public input is pinned part by part, so it cannot alias.
	let (b_low, b_high) = hash.split(&b.to_biguint());
	cs.assert_boundary("b_value", registers.b_value, last, b)?;
	cs.assert_boundary("b_low.acc", parts.b_low.acc, last, F::from_biguint(&b_low)?)?;
	cs.assert_boundary("b_high.acc", parts.b_high.acc, last, F::from_biguint(&b_high)?)?;

	membership(
		&mut cs,
		"set",
		&registers.membership,
		&ArithExpr::cur(parts.output.result.x),
		set,
		last,
	)?;
	Ok(cs)
}
