// Copyright 2024 Irreducible Inc.

use std::sync::Arc;

use ecstark_curve::{trace::LadderRegisters, AffinePoint, Curve, CurveParams};
use ecstark_field::FieldExt;
use ecstark_math::{ArithExpr, Trace, TraceBuilder, TraceLayout};
use ecstark_utils::{bail, ensure};
use getset::{CopyGetters, Getters};
use num_bigint::BigUint;
use rand::Rng;
use tracing::instrument;

use super::error::Error;
use crate::{
	constraint_system::{self, ConstraintSystem, Proof, ProofOptions},
	gadgets::{ladder, ladder_width, membership, MembershipRegisters},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarMulRegisters {
	pub ladder: LadderRegisters,
	pub membership: MembershipRegisters,
}

/// Knowledge of a `width`-bit scalar `k` such that `(k * base).x` is one of a public set.
///
/// The trace is a single ladder of `n_rows - 1` steps whose leading steps are forced to consume
/// zero bits. The final `r0` must be finite.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct ScalarMulAir<F> {
	#[getset(get = "pub")]
	curve: Curve<F>,
	#[getset(get = "pub")]
	base: AffinePoint<F>,
	#[getset(get_copy = "pub")]
	width: usize,
	#[getset(get = "pub")]
	set: Vec<F>,
	#[getset(get = "pub")]
	registers: ScalarMulRegisters,
	#[getset(get = "pub")]
	constraint_system: ConstraintSystem<F>,
}

impl<F: FieldExt> ScalarMulAir<F> {
	/// ## Throws
	///
	/// * [`Error::EmptySet`] if `set` is empty
	/// * [`Error::InvalidWidth`] if `width` is zero
	/// * [`ecstark_curve::Error::NotOnCurve`] unless `base` is a finite curve point
	/// * [`ecstark_curve::Error::ZeroAbscissa`] if `base` has $x = 0$, which the ladder's first
	///   addition to the identity cannot represent
	#[instrument("ScalarMulAir::new", skip_all, level = "debug", fields(width))]
	pub fn new(
		params: CurveParams<F>,
		base: AffinePoint<F>,
		width: usize,
		set: Vec<F>,
	) -> Result<Self, Error> {
		ensure!(!set.is_empty(), Error::EmptySet);
		ensure!(width > 0, Error::InvalidWidth { width });
		let curve = Curve::new(params);
		if base.is_infinity() || !curve.is_on_curve(&base) {
			bail!(ecstark_curve::Error::NotOnCurve);
		}
		ensure!(!base.x.is_zero(), ecstark_curve::Error::ZeroAbscissa);

		let mut layout = TraceLayout::new();
		let registers = ScalarMulRegisters {
			ladder: LadderRegisters::new(&mut layout, "ladder")?,
			membership: MembershipRegisters::new(&mut layout, "set", set.len())?,
		};

		let n_rows = (width + 1).next_power_of_two();
		let last = n_rows - 1;
		let mut cs = ConstraintSystem::new(Arc::new(layout), n_rows)?;
		ladder(&mut cs, "ladder", &params, &registers.ladder, &base)?;
		ladder_width(&mut cs, "ladder", &registers.ladder, width)?;
		cs.assert_boundary("ladder.finite", registers.ladder.r0.inf, last, F::zero())?;
		membership(
			&mut cs,
			"set",
			&registers.membership,
			&ArithExpr::cur(registers.ladder.r0.x),
			&set,
			last,
		)?;

		Ok(Self {
			curve,
			base,
			width,
			set,
			registers,
			constraint_system: cs,
		})
	}

	/// Writes the honest trace for the secret `k`.
	///
	/// ## Throws
	///
	/// * [`ecstark_curve::Error::ScalarTooWide`] if `k` has more than `width` bits
	#[instrument("ScalarMulAir::generate_trace", skip_all, level = "debug")]
	pub fn generate_trace(&self, k: &BigUint) -> Result<Trace<F>, Error> {
		ensure!(
			k.bits() <= self.width as u64,
			ecstark_curve::Error::ScalarTooWide {
				bits: k.bits(),
				width: self.width,
			}
		);
		let n_rows = self.constraint_system.n_rows();
		let mut builder = TraceBuilder::new(self.constraint_system.layout().clone(), n_rows);
		let product =
			self.curve
				.trace_mul(&mut builder, &self.registers.ladder, k, &self.base, n_rows - 1)?;
		self.registers
			.membership
			.write(&mut builder, product.x, &self.set, n_rows - 1)?;
		Ok(builder.finish()?)
	}

	/// Proves knowledge of `k`, committing with `compression` and blinding with `rng`.
	pub fn prove<C>(
		&self,
		k: &BigUint,
		compression: &C,
		options: &ProofOptions,
		rng: impl Rng,
	) -> Result<Proof<F>, Error>
	where
		C: ecstark_hash::PaddedCompressionFunction<F> + Sync,
	{
		let trace = self.generate_trace(k)?;
		Ok(constraint_system::prove(&self.constraint_system, &trace, compression, options, rng)?)
	}

	pub fn verify<C>(
		&self,
		proof: &Proof<F>,
		compression: &C,
		options: &ProofOptions,
	) -> Result<(), Error>
	where
		C: ecstark_hash::PaddedCompressionFunction<F>,
	{
		Ok(constraint_system::verify(&self.constraint_system, proof, compression, options)?)
	}
}
