// Copyright 2024 Irreducible Inc.

//! Constraint gadgets for the traced curve arithmetic.
//!
//! Each gadget adds the constraints that check one group of trace registers written by
//! [`ecstark_curve::Curve::trace_add`], [`ecstark_curve::Curve::trace_double`] or
//! [`ecstark_curve::Curve::trace_mul`]. Operands are passed as [`ExprPoint`]s, so they can be
//! registers on either row of a transition or constant points.

mod ec_add;
mod ec_double;
mod ladder;
mod membership;

pub use ec_add::ec_add;
pub use ec_double::ec_double;
pub use ladder::{ladder, ladder_width};
pub use membership::{membership, MembershipRegisters};

use ecstark_curve::{trace::PointRegisters, AffinePoint};
use ecstark_field::FieldExt;
use ecstark_math::{ArithExpr, CellRef, Register, RowOffset};

/// A point whose coordinates and infinity flag are arithmetic expressions.
#[derive(Debug, Clone)]
pub struct ExprPoint<F> {
	pub x: ArithExpr<F>,
	pub y: ArithExpr<F>,
	pub inf: ArithExpr<F>,
}

impl<F: FieldExt> ExprPoint<F> {
	pub fn at(registers: &PointRegisters, offset: RowOffset) -> Self {
		Self {
			x: cell(registers.x, offset),
			y: cell(registers.y, offset),
			inf: cell(registers.inf, offset),
		}
	}

	pub fn current(registers: &PointRegisters) -> Self {
		Self::at(registers, RowOffset::Current)
	}

	pub fn next(registers: &PointRegisters) -> Self {
		Self::at(registers, RowOffset::Next)
	}

	pub fn constant(point: &AffinePoint<F>) -> Self {
		Self {
			x: point.x.into(),
			y: point.y.into(),
			inf: point.infinity_flag().into(),
		}
	}

	/// `self + bit * (other - self)` per coordinate, flag included.
	pub fn select(&self, other: &Self, bit: &ArithExpr<F>) -> Self {
		let blend = |a: &ArithExpr<F>, b: &ArithExpr<F>| {
			a.clone() + bit.clone() * (b.clone() - a.clone())
		};
		Self {
			x: blend(&self.x, &other.x),
			y: blend(&self.y, &other.y),
			inf: blend(&self.inf, &other.inf),
		}
	}
}

pub(crate) fn cell<F: FieldExt>(register: Register, offset: RowOffset) -> ArithExpr<F> {
	ArithExpr::Cell(CellRef { register, offset })
}
