// Copyright 2024 Irreducible Inc.

use ecstark_field::FieldExt;
use ecstark_utils::{bail, ensure};
use num_bigint::BigUint;

use crate::{error::Error, params::CurveParams, point::AffinePoint};

/// Group law on a short Weierstrass curve.
#[derive(Debug, Clone, Copy)]
pub struct Curve<F> {
	params: CurveParams<F>,
}

impl<F: FieldExt> Curve<F> {
	pub const fn new(params: CurveParams<F>) -> Self {
		Self { params }
	}

	pub const fn params(&self) -> &CurveParams<F> {
		&self.params
	}

	pub fn is_on_curve(&self, p: &AffinePoint<F>) -> bool {
		if p.infinity {
			return true;
		}
		p.y.square() == p.x.square() * p.x + self.params.alpha() * p.x + self.params.beta()
	}

	pub fn negate(&self, p: &AffinePoint<F>) -> AffinePoint<F> {
		if p.infinity {
			return *p;
		}
		AffinePoint::new(p.x, -p.y)
	}

	/// Chord addition of two distinct points.
	///
	/// ## Throws
	///
	/// * [`Error::EqualPoints`] if `p == q`; use [`Self::double`]
	/// * [`Error::DegenerateAddition`] if `p == -q`
	pub fn add(&self, p: &AffinePoint<F>, q: &AffinePoint<F>) -> Result<AffinePoint<F>, Error> {
		if p.infinity {
			return Ok(*q);
		}
		if q.infinity {
			return Ok(*p);
		}
		let lambda = chord_slope(p, q)?;
		Ok(chord_result(p, q, lambda))
	}

	pub fn double(&self, p: &AffinePoint<F>) -> AffinePoint<F> {
		match self.tangent_slope(p) {
			Some(lambda) if !p.infinity => chord_result(p, p, lambda),
			_ => AffinePoint::infinity(),
		}
	}

	/// The complete group law: handles equal operands and operands that cancel.
	pub fn add_any(&self, p: &AffinePoint<F>, q: &AffinePoint<F>) -> AffinePoint<F> {
		if p.infinity {
			return *q;
		}
		if q.infinity {
			return *p;
		}
		if p.x != q.x {
			let lambda = (q.y - p.y) * (q.x - p.x).inverse().unwrap_or_default();
			return chord_result(p, q, lambda);
		}
		if p.y == q.y {
			self.double(p)
		} else {
			AffinePoint::infinity()
		}
	}

	/// Scalar multiplication with a Montgomery ladder, most significant bit first.
	///
	/// The ladder keeps `r1 - r0 = p` after every step, so its chord additions never see equal
	/// operands unless `p` itself is the identity.
	pub fn mul(&self, k: &BigUint, p: &AffinePoint<F>) -> Result<AffinePoint<F>, Error> {
		let mut r0 = AffinePoint::infinity();
		let mut r1 = *p;
		for i in (0..k.bits()).rev() {
			if k.bit(i) {
				r0 = self.add(&r0, &r1)?;
				r1 = self.double(&r1);
			} else {
				r1 = self.add(&r0, &r1)?;
				r0 = self.double(&r0);
			}
		}
		Ok(r0)
	}

	/// Tangent slope $(3x^2 + \alpha) / 2y$, or `None` for a vertical tangent.
	///
	/// The formula is applied to the raw coordinates, so the infinity sentinel `(0, 1)` has the
	/// slope $\alpha / 2$.
	pub(crate) fn tangent_slope(&self, p: &AffinePoint<F>) -> Option<F> {
		let numerator = F::from(3u64) * p.x.square() + self.params.alpha();
		p.y.double().checked_inverse().ok().map(|inv| numerator * inv)
	}
}

/// Chord slope $(q_y - p_y) / (q_x - p_x)$ on the raw coordinates.
pub(crate) fn chord_slope<F: FieldExt>(p: &AffinePoint<F>, q: &AffinePoint<F>) -> Result<F, Error> {
	let dx = q.x - p.x;
	if dx.is_zero() {
		ensure!(p.y != q.y, Error::EqualPoints);
		bail!(Error::DegenerateAddition);
	}
	Ok((q.y - p.y) * dx.checked_inverse()?)
}

/// The third intersection of the line of slope `lambda` through `p` and `q`, reflected.
pub(crate) fn chord_result<F: FieldExt>(
	p: &AffinePoint<F>,
	q: &AffinePoint<F>,
	lambda: F,
) -> AffinePoint<F> {
	let x = lambda.square() - p.x - q.x;
	let y = lambda * (p.x - x) - p.y;
	AffinePoint::new(x, y)
}
