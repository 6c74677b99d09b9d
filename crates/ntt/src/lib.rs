// Copyright 2024 Ulvetanna Inc.

//! Radix-2 number-theoretic transforms over the power-of-two subgroups of a prime field.
//!
//! The transforms move between the coefficient form of a polynomial and its evaluations over a
//! multiplicative subgroup $\langle \omega \rangle$ of order $2^k$, or over a coset
//! $s \cdot \langle \omega \rangle$. Evaluations are in natural order: entry $i$ holds the value at
//! $s \cdot \omega^i$, where $\omega$ is [`FieldExt::power_of_two_root`].
//!
//! [`FieldExt::power_of_two_root`]: ecstark_field::FieldExt::power_of_two_root

mod error;
mod multiplicative_ntt;
mod radix2;
#[cfg(test)]
mod reference;
#[cfg(test)]
mod tests;
pub mod twiddle;

pub use error::Error;
pub use multiplicative_ntt::MultiplicativeNTT;
pub use radix2::Radix2NTT;
