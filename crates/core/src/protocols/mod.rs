// Copyright 2023-2024 Irreducible Inc.

//! Interactive subprotocols, made non-interactive with the Fiat-Shamir channel.
//!
//! The prover side of each protocol simulates the verifier on the same channel, so both sides
//! draw identical challenges.

pub mod fri;
