// Copyright 2024-2025 Irreducible Inc.

mod common;
mod constraint;
pub mod error;
mod prove;
#[cfg(test)]
pub(crate) mod tests;
pub mod validate;
mod verify;

use std::sync::Arc;

pub use common::*;
pub use constraint::{Constraint, ConstraintTarget};
use ecstark_field::FieldExt;
use ecstark_math::{ArithExpr, Register, TraceLayout};
use ecstark_utils::{bail, checked_arithmetics::log2_ceil, ensure};
use error::Error;
pub use prove::prove;
pub use verify::verify;

/// An AIR: a trace layout, a fixed trace length and the polynomial constraints over it.
///
/// Constraints are checked on the trace-length subgroup $\langle g \rangle$, where row `i` sits at
/// $g^i$. A constraint may read cells of the row it is evaluated on and of the next row; the
/// latter is only allowed when the target excludes the last row.
#[derive(Debug, Clone)]
pub struct ConstraintSystem<F> {
	layout: Arc<TraceLayout>,
	log_n_rows: usize,
	constraints: Vec<Constraint<F>>,
}

impl<F: FieldExt> ConstraintSystem<F> {
	/// ## Throws
	///
	/// * [`Error::InvalidTraceLength`] unless `n_rows` is a power of two and at least 2
	pub fn new(layout: Arc<TraceLayout>, n_rows: usize) -> Result<Self, Error> {
		ensure!(
			n_rows >= 2 && n_rows.is_power_of_two(),
			Error::InvalidTraceLength { n_rows }
		);
		Ok(Self {
			layout,
			log_n_rows: n_rows.ilog2() as usize,
			constraints: Vec::new(),
		})
	}

	pub fn layout(&self) -> &Arc<TraceLayout> {
		&self.layout
	}

	pub const fn log_n_rows(&self) -> usize {
		self.log_n_rows
	}

	pub const fn n_rows(&self) -> usize {
		1 << self.log_n_rows
	}

	pub fn constraints(&self) -> &[Constraint<F>] {
		&self.constraints
	}

	/// Adds a constraint after checking that it is well formed for this trace.
	pub fn add(
		&mut self,
		name: impl Into<String>,
		expr: ArithExpr<F>,
		target: ConstraintTarget,
	) -> Result<(), Error> {
		let name = name.into();
		let n_rows = self.n_rows();
		if let ConstraintTarget::Rows(rows) = &target {
			ensure!(!rows.is_empty(), Error::EmptyTarget { name });
			if let Some(&row) = rows.iter().find(|&&row| row >= n_rows) {
				bail!(Error::TargetRowOutOfRange { name, row, n_rows });
			}
		}
		if expr.reads_next_row() && target.includes_last_row(n_rows) {
			bail!(Error::NextRowOnLastRow { name });
		}
		let n_registers = self.layout.n_registers();
		if expr
			.cells()
			.iter()
			.any(|cell| cell.register.index() >= n_registers)
		{
			bail!(Error::UnknownRegister { name });
		}

		self.constraints.push(Constraint {
			name,
			expr: expr.optimize(),
			target,
		});
		Ok(())
	}

	/// Requires `expr` to vanish on every row.
	pub fn assert_zero(&mut self, name: impl Into<String>, expr: ArithExpr<F>) -> Result<(), Error> {
		self.add(name, expr, ConstraintTarget::AllRows)
	}

	/// Requires `expr`, which may read the next row, to vanish on every row but the last.
	pub fn assert_transition(
		&mut self,
		name: impl Into<String>,
		expr: ArithExpr<F>,
	) -> Result<(), Error> {
		self.add(name, expr, ConstraintTarget::AllButLast)
	}

	/// Requires `expr` to vanish on the given rows.
	pub fn assert_at(
		&mut self,
		name: impl Into<String>,
		expr: ArithExpr<F>,
		rows: Vec<usize>,
	) -> Result<(), Error> {
		self.add(name, expr, ConstraintTarget::Rows(rows))
	}

	/// Pins `register` to `value` on `row`.
	pub fn assert_boundary(
		&mut self,
		name: impl Into<String>,
		register: Register,
		row: usize,
		value: F,
	) -> Result<(), Error> {
		self.assert_at(name, ArithExpr::cur(register) - value.into(), vec![row])
	}

	pub fn max_degree(&self) -> usize {
		self.constraints
			.iter()
			.map(Constraint::degree)
			.max()
			.unwrap_or(0)
	}

	/// Degree bound of the trace columns once blinded for `options`.
	pub const fn column_degree_bound(&self, options: &ProofOptions) -> usize {
		self.n_rows() + options.hiding_degree()
	}

	/// Degree bound of the composition polynomial, which the verifier hands to FRI.
	pub fn composition_degree_bound(&self, options: &ProofOptions) -> usize {
		let n_rows = self.n_rows();
		let column_degree = self.column_degree_bound(options);
		self.constraints
			.iter()
			.map(|constraint| constraint.quotient_degree_bound(n_rows, column_degree))
			.max()
			.unwrap_or(0)
	}

	/// Log2 of the extension factor actually used for `options`.
	///
	/// This is at least `options.log_blowup()`, raised until every constraint numerator over the
	/// blinded columns fits the extension.
	pub fn lde_log_blowup(&self, options: &ProofOptions) -> usize {
		let numerator_len = self.max_degree().max(1) * self.column_degree_bound(options) + 1;
		let required = log2_ceil(numerator_len).saturating_sub(self.log_n_rows);
		options.log_blowup().max(required)
	}
}
