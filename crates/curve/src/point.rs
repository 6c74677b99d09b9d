// Copyright 2024 Irreducible Inc.

use std::fmt;

use ecstark_field::FieldExt;

/// A point on a short Weierstrass curve in affine coordinates.
///
/// The point at infinity is the concrete sentinel `(0, 1)` with the flag set, so that every point,
/// including the identity, occupies the same three trace cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AffinePoint<F> {
	pub x: F,
	pub y: F,
	pub infinity: bool,
}

impl<F: FieldExt> AffinePoint<F> {
	pub const fn new(x: F, y: F) -> Self {
		Self {
			x,
			y,
			infinity: false,
		}
	}

	pub fn infinity() -> Self {
		Self {
			x: F::zero(),
			y: F::one(),
			infinity: true,
		}
	}

	pub const fn is_infinity(&self) -> bool {
		self.infinity
	}

	/// The infinity flag as a field element, 0 or 1.
	pub fn infinity_flag(&self) -> F {
		F::from(self.infinity as u64)
	}
}

impl<F: FieldExt> fmt::Display for AffinePoint<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.infinity {
			write!(f, "O")
		} else {
			write!(f, "({}, {})", self.x.to_decimal(), self.y.to_decimal())
		}
	}
}
