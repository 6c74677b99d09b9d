// Copyright 2023 Ulvetanna Inc.

//! A transparent STARK-style prover over prime fields.
//!
//! Traces are interpolated over a power-of-two subgroup, extended over a coset and committed with
//! Merkle trees built on the Pedersen hash. Constraint quotients are combined with challenges from
//! a hash-chained Fiat-Shamir channel, and the combination is shown to be low-degree with FRI.
//! The [`statements`] module packages two membership AIRs on top of this machinery.

pub mod constraint_system;
pub mod fiat_shamir;
pub mod gadgets;
pub mod merkle_tree;
pub mod protocols;
pub mod statements;
