// Copyright 2024 Irreducible Inc.

use ecstark_curve::{stark_curve_params, toy_curve_params, AffinePoint, CurveParams};
use ecstark_field::{FieldExt, MontFp, StarkField, ToyField};
use getset::{CopyGetters, Getters};

/// Fixed configuration of the two-input Pedersen hash.
///
/// The hash of `(a, b)` is the x-coordinate of
/// `offset + a_low * g[0] + a_high * g[1] + b_low * g[2] + b_high * g[3]`, where each input is
/// split at `low_bits` into a low part and a `high_bits`-wide high part.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct PedersenParams<F> {
	curve: CurveParams<F>,
	offset: AffinePoint<F>,
	#[getset(get = "pub")]
	generators: [AffinePoint<F>; 4],
	#[getset(get_copy = "pub")]
	low_bits: usize,
	#[getset(get_copy = "pub")]
	high_bits: usize,
}

impl<F: FieldExt> PedersenParams<F> {
	pub const fn new(
		curve: CurveParams<F>,
		offset: AffinePoint<F>,
		generators: [AffinePoint<F>; 4],
		low_bits: usize,
		high_bits: usize,
	) -> Self {
		Self {
			curve,
			offset,
			generators,
			low_bits,
			high_bits,
		}
	}

	pub fn curve(&self) -> CurveParams<F> {
		self.curve
	}

	pub fn offset(&self) -> AffinePoint<F> {
		self.offset
	}

	/// Total width of one hash input.
	pub const fn input_bits(&self) -> usize {
		self.low_bits + self.high_bits
	}
}

/// The StarkWare Pedersen parameters: points `P0..P4` on the Stark curve, split at 248 bits.
pub fn stark_pedersen_params() -> PedersenParams<StarkField> {
	PedersenParams::new(
		stark_curve_params(),
		AffinePoint::new(
			MontFp!("2089986280348253421170679821480865132823066470938446095505822317253594081284"),
			MontFp!("1713931329540660377023406109199410414810705867260802078187082345529207694986"),
		),
		[
			AffinePoint::new(
				MontFp!("996781205833008774514500082376783249102396023663454813447423147977397232763"),
				MontFp!(
					"1668503676786377725805489344771023921079126552019160156920634619255970485781"
				),
			),
			AffinePoint::new(
				MontFp!(
					"2251563274489750535117886426533222435294046428347329203627021249169616184184"
				),
				MontFp!(
					"1798716007562728905295480679789526322175868328062420237419143593021674992973"
				),
			),
			AffinePoint::new(
				MontFp!(
					"2138414695194151160943305727036575959195309218611738193261179310511854807447"
				),
				MontFp!("113410276730064486255102093846540133784865286929052426931474106396135072156"),
			),
			AffinePoint::new(
				MontFp!(
					"2379962749567351885752724891227938183011949129833673362440656643086021394946"
				),
				MontFp!("776496453633298175483985398648758586525933812536653089401905292063708816422"),
			),
		],
		248,
		4,
	)
}

/// Five fixed points on the toy curve, split at 16 bits.
pub fn toy_pedersen_params() -> PedersenParams<ToyField> {
	let point = |x: u64, y: u64| AffinePoint::new(ToyField::from(x), ToyField::from(y));
	PedersenParams::new(
		toy_curve_params(),
		point(1000003, 1086080253),
		[
			point(2000004, 111232081),
			point(3000017, 759977611),
			point(4000040, 169499448),
			point(5000012, 730501145),
		],
		16,
		16,
	)
}
