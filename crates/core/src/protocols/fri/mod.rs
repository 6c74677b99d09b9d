// Copyright 2024 Irreducible Inc.

//! Implementation of the Fast Reed–Solomon IOPP (FRI) over prime-field cosets.
//!
//! FRI is an IOP of Proximity for Reed–Solomon codes, introduced in [BBHR17]. The prover commits
//! to the evaluations of a polynomial $f$ over a coset $D$ of a power-of-two subgroup. In each
//! round it receives a challenge $\beta$, splits $f(x) = e(x^2) + x \cdot o(x^2)$ and commits to
//! $e + \beta \cdot o$ over the squared coset $D^2$, which has half the size. Once the folded
//! polynomial is constant, the constant is sent in the clear.
//!
//! In the query phase the verifier samples a position, and at every committed layer the prover
//! opens the pair $f(x), f(-x)$. The verifier recomputes the folded value
//!
//! $$
//! \frac{f(x) + f(-x)}{2} + \beta \cdot \frac{f(x) - f(-x)}{2x}
//! $$
//!
//! and checks it against the opening of the next layer, or against the final constant.
//!
//! [BBHR17]: <https://eccc.weizmann.ac.il/report/2017/134/>

mod common;
mod error;
mod prove;
mod verify;

pub use common::*;
pub use error::*;
pub use prove::*;
pub use verify::*;
