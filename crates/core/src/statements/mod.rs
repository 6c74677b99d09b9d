// Copyright 2024 Irreducible Inc.

//! Ready-made AIRs for the two membership statements.
//!
//! Both statements prove that a secret witness maps into a public set without revealing which
//! element it hits. The set is checked with a running product, so every element adds one column
//! and one constraint.

mod error;
mod pedersen_membership;
mod scalar_mul;

pub use error::Error;
pub use pedersen_membership::{PedersenMembershipAir, PedersenMembershipRegisters};
pub use scalar_mul::{ScalarMulAir, ScalarMulRegisters};
