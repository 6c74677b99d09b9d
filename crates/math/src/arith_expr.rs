// Copyright 2024-2025 Irreducible Inc.

use std::{
	collections::BTreeSet,
	fmt::{self, Display},
	iter::{Product, Sum},
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use ecstark_field::FieldExt;

use super::trace::Register;

/// Which row of a transition a cell reference reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowOffset {
	Current,
	Next,
}

impl RowOffset {
	/// Row distance from the current row.
	pub const fn shift(self) -> usize {
		match self {
			Self::Current => 0,
			Self::Next => 1,
		}
	}
}

/// A reference to one trace cell relative to the row a constraint is evaluated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
	pub register: Register,
	pub offset: RowOffset,
}

/// Arithmetic expressions over trace cells.
///
/// Expressions are trees whose leaves are constants or cell references, and whose inner nodes are
/// field operations. A constraint holds on a row when its expression evaluates to zero there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArithExpr<F> {
	Const(F),
	Cell(CellRef),
	Add(Box<ArithExpr<F>>, Box<ArithExpr<F>>),
	Sub(Box<ArithExpr<F>>, Box<ArithExpr<F>>),
	Mul(Box<ArithExpr<F>>, Box<ArithExpr<F>>),
	Neg(Box<ArithExpr<F>>),
	Pow(Box<ArithExpr<F>>, u64),
}

impl<F: FieldExt> Display for ArithExpr<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Const(v) => write!(f, "{}", v.to_decimal()),
			Self::Cell(cell) => match cell.offset {
				RowOffset::Current => write!(f, "r{}", cell.register.index()),
				RowOffset::Next => write!(f, "r{}'", cell.register.index()),
			},
			Self::Add(x, y) => write!(f, "({} + {})", &**x, &**y),
			Self::Sub(x, y) => write!(f, "({} - {})", &**x, &**y),
			Self::Mul(x, y) => write!(f, "({} * {})", &**x, &**y),
			Self::Neg(x) => write!(f, "-{}", &**x),
			Self::Pow(x, p) => write!(f, "({})^{p}", &**x),
		}
	}
}

impl<F: FieldExt> ArithExpr<F> {
	pub const fn cur(register: Register) -> Self {
		Self::Cell(CellRef {
			register,
			offset: RowOffset::Current,
		})
	}

	pub const fn next(register: Register) -> Self {
		Self::Cell(CellRef {
			register,
			offset: RowOffset::Next,
		})
	}

	pub const fn constant(value: F) -> Self {
		Self::Const(value)
	}

	pub fn zero() -> Self {
		Self::Const(F::zero())
	}

	pub fn one() -> Self {
		Self::Const(F::one())
	}

	pub fn pow(self, exp: u64) -> Self {
		Self::Pow(Box::new(self), exp)
	}

	pub fn square(self) -> Self {
		self.pow(2)
	}

	/// The total degree of the polynomial the expression represents, in the trace cells.
	pub fn degree(&self) -> usize {
		match self {
			Self::Const(_) => 0,
			Self::Cell(_) => 1,
			Self::Add(left, right) | Self::Sub(left, right) => left.degree().max(right.degree()),
			Self::Mul(left, right) => left.degree() + right.degree(),
			Self::Neg(inner) => inner.degree(),
			Self::Pow(base, exp) => base.degree() * *exp as usize,
		}
	}

	/// Whether any leaf reads the next row.
	pub fn reads_next_row(&self) -> bool {
		self.cells()
			.iter()
			.any(|cell| cell.offset == RowOffset::Next)
	}

	/// The distinct cells the expression reads.
	pub fn cells(&self) -> BTreeSet<CellRef> {
		let mut cells = BTreeSet::new();
		self.collect_cells(&mut cells);
		cells
	}

	fn collect_cells(&self, cells: &mut BTreeSet<CellRef>) {
		match self {
			Self::Const(_) => {}
			Self::Cell(cell) => {
				cells.insert(*cell);
			}
			Self::Add(left, right) | Self::Sub(left, right) | Self::Mul(left, right) => {
				left.collect_cells(cells);
				right.collect_cells(cells);
			}
			Self::Neg(inner) | Self::Pow(inner, _) => inner.collect_cells(cells),
		}
	}

	/// Evaluates the expression, reading cells through `cell_value`.
	pub fn evaluate(&self, cell_value: &impl Fn(CellRef) -> F) -> F {
		match self {
			Self::Const(value) => *value,
			Self::Cell(cell) => cell_value(*cell),
			Self::Add(left, right) => left.evaluate(cell_value) + right.evaluate(cell_value),
			Self::Sub(left, right) => left.evaluate(cell_value) - right.evaluate(cell_value),
			Self::Mul(left, right) => left.evaluate(cell_value) * right.evaluate(cell_value),
			Self::Neg(inner) => -inner.evaluate(cell_value),
			Self::Pow(base, exp) => base.evaluate(cell_value).pow([*exp]),
		}
	}

	/// Creates a new expression with constant subtrees folded and trivial identities removed.
	pub fn optimize(&self) -> Self {
		match self {
			Self::Const(_) | Self::Cell(_) => self.clone(),
			Self::Add(left, right) => match (left.optimize(), right.optimize()) {
				(Self::Const(left), Self::Const(right)) => Self::Const(left + right),
				(Self::Const(left), right) if left.is_zero() => right,
				(left, Self::Const(right)) if right.is_zero() => left,
				(left, right) => left + right,
			},
			Self::Sub(left, right) => match (left.optimize(), right.optimize()) {
				(Self::Const(left), Self::Const(right)) => Self::Const(left - right),
				(left, Self::Const(right)) if right.is_zero() => left,
				(left, right) => left - right,
			},
			Self::Mul(left, right) => match (left.optimize(), right.optimize()) {
				(Self::Const(left), Self::Const(right)) => Self::Const(left * right),
				(Self::Const(zero), _) | (_, Self::Const(zero)) if zero.is_zero() => Self::zero(),
				(Self::Const(left), right) if left.is_one() => right,
				(left, Self::Const(right)) if right.is_one() => left,
				(left, right) => left * right,
			},
			Self::Neg(inner) => match inner.optimize() {
				Self::Const(value) => Self::Const(-value),
				Self::Neg(inner) => *inner,
				inner => -inner,
			},
			Self::Pow(base, exp) => match base.optimize() {
				Self::Const(value) => Self::Const(value.pow([*exp])),
				Self::Pow(inner, exp_inner) => Self::Pow(inner, *exp * exp_inner),
				base => base.pow(*exp),
			},
		}
	}

	/// Returns `Some(F)` if the expression is a constant.
	pub const fn as_constant(&self) -> Option<F> {
		match self {
			Self::Const(value) => Some(*value),
			_ => None,
		}
	}
}

impl<F: FieldExt> Default for ArithExpr<F> {
	fn default() -> Self {
		Self::zero()
	}
}

impl<F: FieldExt> From<F> for ArithExpr<F> {
	fn from(value: F) -> Self {
		Self::Const(value)
	}
}

impl<F: FieldExt> Add for ArithExpr<F> {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::Add(Box::new(self), Box::new(rhs))
	}
}

impl<F: FieldExt> AddAssign for ArithExpr<F> {
	fn add_assign(&mut self, rhs: Self) {
		*self = std::mem::take(self) + rhs;
	}
}

impl<F: FieldExt> Sub for ArithExpr<F> {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self::Sub(Box::new(self), Box::new(rhs))
	}
}

impl<F: FieldExt> SubAssign for ArithExpr<F> {
	fn sub_assign(&mut self, rhs: Self) {
		*self = std::mem::take(self) - rhs;
	}
}

impl<F: FieldExt> Mul for ArithExpr<F> {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self {
		Self::Mul(Box::new(self), Box::new(rhs))
	}
}

impl<F: FieldExt> MulAssign for ArithExpr<F> {
	fn mul_assign(&mut self, rhs: Self) {
		*self = std::mem::take(self) * rhs;
	}
}

impl<F: FieldExt> Neg for ArithExpr<F> {
	type Output = Self;

	fn neg(self) -> Self {
		Self::Neg(Box::new(self))
	}
}

impl<F: FieldExt> Sum for ArithExpr<F> {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.reduce(|acc, item| acc + item).unwrap_or_default()
	}
}

impl<F: FieldExt> Product for ArithExpr<F> {
	fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.reduce(|acc, item| acc * item)
			.unwrap_or_else(Self::one)
	}
}
