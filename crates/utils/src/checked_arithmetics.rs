// Copyright 2024 Irreducible Inc.

/// Returns `ceil(log2(val))`, with `log2_ceil(0) = log2_ceil(1) = 0`.
pub const fn log2_ceil(val: usize) -> usize {
	if val <= 1 {
		0
	} else {
		(usize::BITS - (val - 1).leading_zeros()) as usize
	}
}
