// Copyright 2024 Irreducible Inc.

use ark_ff::fields::{Fp256, MontBackend, MontConfig};

/// Montgomery configuration of the Stark field, $p = 2^{251} + 17 \cdot 2^{192} + 1$.
///
/// $p - 1 = 2^{192} \cdot 576460752303423505$ and 3 generates the full multiplicative group.
#[derive(MontConfig)]
#[modulus = "3618502788666131213697322783095070105623107215331596699973092056135872020481"]
#[generator = "3"]
pub struct StarkFieldConfig;

pub type StarkField = Fp256<MontBackend<StarkFieldConfig, 4>>;
