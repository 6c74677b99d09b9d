// Copyright 2024 Irreducible Inc.

//! Jacobian-coordinate arithmetic and windowed fixed-base multiplication.
//!
//! A Jacobian triple $(X, Y, Z)$ represents the affine point $(X/Z^2, Y/Z^3)$, and $Z = 0$ is the
//! identity. Additions need no inversions, which makes this the representation of choice for
//! hashing many values against the same few generators.

use ecstark_field::{batch_inversion, FieldExt};
use ecstark_utils::bail;
use num_bigint::BigUint;

use crate::{error::Error, params::CurveParams, point::AffinePoint, Curve};

/// Bits of scalar consumed per table lookup.
pub const WINDOW_BITS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JacobianPoint<F> {
	pub x: F,
	pub y: F,
	pub z: F,
}

impl<F: FieldExt> JacobianPoint<F> {
	pub fn identity() -> Self {
		Self {
			x: F::one(),
			y: F::one(),
			z: F::zero(),
		}
	}

	pub fn is_identity(&self) -> bool {
		self.z.is_zero()
	}

	pub fn from_affine(p: &AffinePoint<F>) -> Self {
		if p.infinity {
			return Self::identity();
		}
		Self {
			x: p.x,
			y: p.y,
			z: F::one(),
		}
	}

	pub fn to_affine(&self) -> AffinePoint<F> {
		match self.z.inverse() {
			Some(z_inv) => self.normalize_with(z_inv),
			None => AffinePoint::infinity(),
		}
	}

	fn normalize_with(&self, z_inv: F) -> AffinePoint<F> {
		let z_inv2 = z_inv.square();
		AffinePoint::new(self.x * z_inv2, self.y * z_inv2 * z_inv)
	}

	pub fn double(&self, params: &CurveParams<F>) -> Self {
		if self.is_identity() || self.y.is_zero() {
			return Self::identity();
		}
		let yy = self.y.square();
		let zz = self.z.square();
		let s = (self.x * yy).double().double();
		let m = F::from(3u64) * self.x.square() + params.alpha() * zz.square();
		let x = m.square() - s.double();
		let y = m * (s - x) - yy.square().double().double().double();
		let z = (self.y * self.z).double();
		Self { x, y, z }
	}

	/// Mixed addition with an affine point; complete over all operand combinations.
	pub fn add_affine(&self, q: &AffinePoint<F>, params: &CurveParams<F>) -> Self {
		if q.infinity {
			return *self;
		}
		if self.is_identity() {
			return Self::from_affine(q);
		}

		let zz = self.z.square();
		let u2 = q.x * zz;
		let s2 = q.y * zz * self.z;
		let h = u2 - self.x;
		let r = s2 - self.y;
		if h.is_zero() {
			return if r.is_zero() {
				self.double(params)
			} else {
				Self::identity()
			};
		}

		let hh = h.square();
		let hhh = hh * h;
		let v = self.x * hh;
		let x = r.square() - hhh - v.double();
		let y = r * (v - x) - self.y * hhh;
		let z = self.z * h;
		Self { x, y, z }
	}
}

/// Converts many Jacobian points to affine with a single field inversion.
pub fn batch_normalize<F: FieldExt>(points: &[JacobianPoint<F>]) -> Vec<AffinePoint<F>> {
	let mut z_invs = points.iter().map(|p| p.z).collect::<Vec<_>>();
	// Zero entries are left untouched and mark the identity.
	batch_inversion(&mut z_invs);
	points
		.iter()
		.zip(z_invs)
		.map(|(p, z_inv)| {
			if p.is_identity() {
				AffinePoint::infinity()
			} else {
				p.normalize_with(z_inv)
			}
		})
		.collect()
}

/// Precomputed multiples of a fixed base for scalars of bounded width.
///
/// `windows[w][d] = d * 2^(8w) * base`, so `k * base` is the sum of one entry per scalar byte.
#[derive(Debug, Clone)]
pub struct FixedBaseTable<F> {
	params: CurveParams<F>,
	max_bits: usize,
	windows: Vec<Vec<AffinePoint<F>>>,
}

impl<F: FieldExt> FixedBaseTable<F> {
	#[tracing::instrument(skip_all, level = "debug", fields(max_bits))]
	pub fn new(curve: &Curve<F>, base: &AffinePoint<F>, max_bits: usize) -> Self {
		let params = *curve.params();
		let n_windows = max_bits.div_ceil(WINDOW_BITS).max(1);

		let mut window_base = JacobianPoint::from_affine(base);
		let mut jacobian = Vec::with_capacity(n_windows << WINDOW_BITS);
		for _ in 0..n_windows {
			let window_base_affine = window_base.to_affine();
			let mut acc = JacobianPoint::identity();
			for _ in 0..1 << WINDOW_BITS {
				jacobian.push(acc);
				acc = acc.add_affine(&window_base_affine, &params);
			}
			// acc now holds 2^8 * window_base.
			window_base = acc;
		}

		let affine = batch_normalize(&jacobian);
		let windows = affine
			.chunks_exact(1 << WINDOW_BITS)
			.map(<[_]>::to_vec)
			.collect();
		Self {
			params,
			max_bits,
			windows,
		}
	}

	pub const fn max_bits(&self) -> usize {
		self.max_bits
	}

	/// Accumulates `k * base` into `acc`.
	pub fn mul_add(&self, k: &BigUint, acc: &mut JacobianPoint<F>) -> Result<(), Error> {
		if k.bits() as usize > self.max_bits {
			bail!(Error::ScalarTooWide {
				bits: k.bits(),
				width: self.max_bits,
			});
		}
		self.mul_add_bytes_le(&k.to_bytes_le(), acc);
		Ok(())
	}

	/// Accumulates `k * base` for a little-endian scalar. Bytes past the table width are ignored,
	/// so callers must bound the scalar themselves.
	pub fn mul_add_bytes_le(&self, k: &[u8], acc: &mut JacobianPoint<F>) {
		for (window, &digit) in self.windows.iter().zip(k) {
			if digit != 0 {
				*acc = acc.add_affine(&window[digit as usize], &self.params);
			}
		}
	}

	pub fn mul(&self, k: &BigUint) -> Result<AffinePoint<F>, Error> {
		let mut acc = JacobianPoint::identity();
		self.mul_add(k, &mut acc)?;
		Ok(acc.to_affine())
	}
}
