// Copyright 2024 Irreducible Inc.

use ark_ff::fields::{Fp64, MontBackend, MontConfig};

/// Montgomery configuration of the toy field, $p = 3 \cdot 2^{30} + 1$.
///
/// 5 generates the full multiplicative group.
#[derive(MontConfig)]
#[modulus = "3221225473"]
#[generator = "5"]
pub struct ToyFieldConfig;

pub type ToyField = Fp64<MontBackend<ToyFieldConfig, 1>>;
