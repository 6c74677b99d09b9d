// Copyright 2024-2025 Irreducible Inc.

//! Row-by-row evaluation of a constraint system on a concrete trace, for debugging witnesses
//! before running the prover.

use ecstark_field::FieldExt;
use ecstark_math::{RowOffset, Trace};
use ecstark_utils::{bail, ensure};

use super::{error::Error, ConstraintSystem};

/// Checks every constraint on every target row.
///
/// ## Throws
///
/// * [`Error::TraceShapeMismatch`] if the trace does not have the system's shape
/// * [`Error::UnsatisfiedConstraint`] for the first failing constraint and row
pub fn validate_witness<F: FieldExt>(
	constraint_system: &ConstraintSystem<F>,
	trace: &Trace<F>,
) -> Result<(), Error> {
	check_trace_shape(constraint_system, trace)?;

	let n_rows = trace.n_rows();
	for constraint in constraint_system.constraints() {
		for row in constraint.target.rows(n_rows) {
			let value = constraint.expr.evaluate(&|cell| {
				let row = match cell.offset {
					RowOffset::Current => row,
					RowOffset::Next => (row + 1) % n_rows,
				};
				trace.get(cell.register, row)
			});
			if !value.is_zero() {
				bail!(Error::UnsatisfiedConstraint {
					name: constraint.name.clone(),
					row,
				});
			}
		}
	}
	Ok(())
}

pub(crate) fn check_trace_shape<F: FieldExt>(
	constraint_system: &ConstraintSystem<F>,
	trace: &Trace<F>,
) -> Result<(), Error> {
	ensure!(
		trace.n_rows() == constraint_system.n_rows()
			&& trace.n_columns() == constraint_system.layout().n_registers(),
		Error::TraceShapeMismatch {
			n_columns: trace.n_columns(),
			n_rows: trace.n_rows(),
		}
	);
	Ok(())
}
