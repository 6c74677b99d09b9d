// Copyright 2024-2025 Irreducible Inc.

//! Execution traces: a fixed number of rows over a set of named registers.

use std::{collections::HashMap, io::Write, ops::Range, sync::Arc};

use ecstark_field::{write_decimal_felts, FieldExt};
use ecstark_utils::{bail, ensure};
use rayon::prelude::*;

use super::{domain::EvaluationDomain, error::Error, univariate::Polynomial};

/// Handle to a trace column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Register(usize);

impl Register {
	pub const fn index(self) -> usize {
		self.0
	}
}

/// The ordered set of registers in a trace.
#[derive(Debug, Clone, Default)]
pub struct TraceLayout {
	names: Vec<String>,
	by_name: HashMap<String, Register>,
}

impl TraceLayout {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares a new register, returning its handle. Registers are ordered by declaration.
	pub fn add_register(&mut self, name: impl Into<String>) -> Result<Register, Error> {
		let name = name.into();
		if self.by_name.contains_key(&name) {
			bail!(Error::DuplicateRegister { name });
		}
		let register = Register(self.names.len());
		self.by_name.insert(name.clone(), register);
		self.names.push(name);
		Ok(register)
	}

	pub fn register(&self, name: &str) -> Result<Register, Error> {
		self.by_name
			.get(name)
			.copied()
			.ok_or_else(|| Error::UnknownRegister {
				name: name.to_string(),
			})
	}

	pub fn name(&self, register: Register) -> &str {
		&self.names[register.0]
	}

	pub fn n_registers(&self) -> usize {
		self.names.len()
	}

	pub fn registers(&self) -> impl Iterator<Item = Register> {
		(0..self.names.len()).map(Register)
	}
}

/// Write-once trace construction with a row cursor.
///
/// Gadget witness code writes the cells of the row under the cursor and advances it with
/// [`Self::next_row`]. Every cell must be written exactly once before [`Self::finish`].
#[derive(Debug)]
pub struct TraceBuilder<F> {
	layout: Arc<TraceLayout>,
	n_rows: usize,
	columns: Vec<Vec<Option<F>>>,
	cursor: usize,
}

impl<F: FieldExt> TraceBuilder<F> {
	pub fn new(layout: Arc<TraceLayout>, n_rows: usize) -> Self {
		let columns = vec![vec![None; n_rows]; layout.n_registers()];
		Self {
			layout,
			n_rows,
			columns,
			cursor: 0,
		}
	}

	pub fn layout(&self) -> &TraceLayout {
		&self.layout
	}

	pub const fn n_rows(&self) -> usize {
		self.n_rows
	}

	pub const fn cursor(&self) -> usize {
		self.cursor
	}

	/// Moves the cursor to `row`. The cursor may sit one past the last row.
	pub fn seek(&mut self, row: usize) -> Result<(), Error> {
		ensure!(
			row <= self.n_rows,
			Error::RowOutOfRange {
				row,
				n_rows: self.n_rows
			}
		);
		self.cursor = row;
		Ok(())
	}

	pub fn next_row(&mut self) -> Result<(), Error> {
		self.seek(self.cursor + 1)
	}

	/// Writes a cell of the row under the cursor.
	pub fn write(&mut self, register: Register, value: F) -> Result<(), Error> {
		self.write_at(register, self.cursor, value)
	}

	pub fn write_at(&mut self, register: Register, row: usize, value: F) -> Result<(), Error> {
		if row >= self.n_rows {
			bail!(Error::TraceLengthMismatch {
				expected: self.n_rows,
				actual: row + 1,
			});
		}
		let cell = &mut self.columns[register.0][row];
		if cell.is_some() {
			bail!(Error::CellOverwritten {
				register: self.layout.name(register).to_string(),
				row,
			});
		}
		*cell = Some(value);
		Ok(())
	}

	/// Writes `value` into every row of `rows`.
	pub fn fill(&mut self, register: Register, rows: Range<usize>, value: F) -> Result<(), Error> {
		for row in rows {
			self.write_at(register, row, value)?;
		}
		Ok(())
	}

	pub fn get(&self, register: Register, row: usize) -> Option<F> {
		self.columns
			.get(register.0)
			.and_then(|column| column.get(row))
			.copied()
			.flatten()
	}

	/// Checks that every cell was written and freezes the trace.
	///
	/// ## Throws
	///
	/// * [`Error::TraceLengthMismatch`] if no register reaches the final row
	/// * [`Error::UnwrittenCell`] for the first missing cell in register order
	pub fn finish(self) -> Result<Trace<F>, Error> {
		let rows_reached = self
			.columns
			.iter()
			.filter_map(|column| column.iter().rposition(Option::is_some))
			.max()
			.map_or(0, |last| last + 1);
		ensure!(
			rows_reached == self.n_rows,
			Error::TraceLengthMismatch {
				expected: self.n_rows,
				actual: rows_reached,
			}
		);

		let mut columns = Vec::with_capacity(self.columns.len());
		for (register, column) in self.layout.registers().zip(self.columns) {
			let values = column
				.into_iter()
				.enumerate()
				.map(|(row, cell)| {
					cell.ok_or_else(|| Error::UnwrittenCell {
						register: self.layout.name(register).to_string(),
						row,
					})
				})
				.collect::<Result<Vec<_>, _>>()?;
			columns.push(values);
		}

		Ok(Trace {
			layout: self.layout,
			n_rows: self.n_rows,
			columns,
		})
	}
}

/// A complete, immutable trace.
#[derive(Debug, Clone)]
pub struct Trace<F> {
	layout: Arc<TraceLayout>,
	n_rows: usize,
	columns: Vec<Vec<F>>,
}

impl<F: FieldExt> Trace<F> {
	pub fn layout(&self) -> &TraceLayout {
		&self.layout
	}

	pub const fn n_rows(&self) -> usize {
		self.n_rows
	}

	pub fn n_columns(&self) -> usize {
		self.columns.len()
	}

	pub fn column(&self, register: Register) -> &[F] {
		&self.columns[register.0]
	}

	pub fn get(&self, register: Register, row: usize) -> F {
		self.columns[register.0][row]
	}

	pub fn columns(&self) -> &[Vec<F>] {
		&self.columns
	}

	/// Interpolates every column over `domain`, which must have exactly `n_rows` elements.
	#[tracing::instrument(skip_all, level = "debug", fields(n_columns = self.columns.len()))]
	pub fn interpolate_columns(
		&self,
		domain: &EvaluationDomain<F>,
	) -> Result<Vec<Polynomial<F>>, Error> {
		self.columns
			.par_iter()
			.map(|column| Polynomial::interpolate_over(domain, column))
			.collect()
	}

	/// Writes the trace as decimal residues, one per line, row by row in register order.
	pub fn write_replay(&self, writer: impl Write) -> Result<(), Error> {
		let flat = (0..self.n_rows)
			.flat_map(|row| self.columns.iter().map(move |column| column[row]))
			.collect::<Vec<_>>();
		write_decimal_felts(writer, &flat)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use ecstark_field::{read_decimal_felts, ToyField};

	use super::*;

	type F = ToyField;

	fn layout() -> (Arc<TraceLayout>, Register, Register) {
		let mut layout = TraceLayout::new();
		let a = layout.add_register("a").unwrap();
		let b = layout.add_register("b").unwrap();
		(Arc::new(layout), a, b)
	}

	#[test]
	fn test_duplicate_register() {
		let mut layout = TraceLayout::new();
		layout.add_register("x").unwrap();
		assert_matches!(layout.add_register("x"), Err(Error::DuplicateRegister { .. }));
		assert_matches!(layout.register("y"), Err(Error::UnknownRegister { .. }));
		assert_eq!(layout.register("x").unwrap().index(), 0);
	}

	#[test]
	fn test_cursor_writes() {
		let (layout, a, b) = layout();
		let mut builder = TraceBuilder::<F>::new(layout, 4);
		for i in 0..4u64 {
			builder.write(a, F::from(i)).unwrap();
			builder.write(b, F::from(i * i)).unwrap();
			builder.next_row().unwrap();
		}
		assert_matches!(builder.next_row(), Err(Error::RowOutOfRange { row: 5, n_rows: 4 }));

		let trace = builder.finish().unwrap();
		assert_eq!(trace.column(b), &[0u64, 1, 4, 9].map(F::from));
		assert_eq!(trace.get(a, 3), F::from(3u64));
	}

	#[test]
	fn test_write_once() {
		let (layout, a, _) = layout();
		let mut builder = TraceBuilder::<F>::new(layout, 2);
		builder.write(a, F::from(1u64)).unwrap();
		assert_matches!(
			builder.write(a, F::from(2u64)),
			Err(Error::CellOverwritten { row: 0, .. })
		);
		assert_matches!(
			builder.write_at(a, 2, F::from(2u64)),
			Err(Error::TraceLengthMismatch { expected: 2, actual: 3 })
		);
	}

	#[test]
	fn test_short_trace_rejected() {
		let (layout, a, b) = layout();
		let mut builder = TraceBuilder::<F>::new(layout.clone(), 4);
		builder.fill(a, 0..3, F::from(7u64)).unwrap();
		builder.fill(b, 0..3, F::from(8u64)).unwrap();
		assert_matches!(
			builder.finish(),
			Err(Error::TraceLengthMismatch { expected: 4, actual: 3 })
		);

		let mut builder = TraceBuilder::<F>::new(layout, 4);
		builder.fill(a, 0..4, F::from(7u64)).unwrap();
		builder.fill(b, 0..3, F::from(8u64)).unwrap();
		assert_matches!(
			builder.finish(),
			Err(Error::UnwrittenCell { register, row: 3 }) if register == "b"
		);
	}

	#[test]
	fn test_replay_is_row_major() {
		let (layout, a, b) = layout();
		let mut builder = TraceBuilder::<F>::new(layout, 2);
		builder.fill(a, 0..2, F::from(1u64)).unwrap();
		builder.write_at(b, 0, F::from(2u64)).unwrap();
		builder.write_at(b, 1, F::from(3u64)).unwrap();
		let trace = builder.finish().unwrap();

		let mut out = Vec::new();
		trace.write_replay(&mut out).unwrap();
		let values = read_decimal_felts::<F>(out.as_slice()).unwrap();
		assert_eq!(values, [1u64, 2, 1, 3].map(F::from));
	}

	#[test]
	fn test_interpolate_columns() {
		let (layout, a, b) = layout();
		let mut builder = TraceBuilder::<F>::new(layout, 8);
		for row in 0..8u64 {
			builder.write_at(a, row as usize, F::from(row)).unwrap();
			builder.write_at(b, row as usize, F::from(5u64)).unwrap();
		}
		let trace = builder.finish().unwrap();
		let domain = EvaluationDomain::subgroup(3).unwrap();
		let polys = trace.interpolate_columns(&domain).unwrap();
		assert_eq!(polys[b.index()], Polynomial::constant(F::from(5u64)));
		assert_eq!(polys[a.index()].evaluate(domain.element(6)), F::from(6u64));
	}
}
