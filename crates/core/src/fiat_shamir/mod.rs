// Copyright 2024 Irreducible Inc.

//! The Fiat-Shamir transform: a hash-chained transcript stands in for the verifier's coins.

mod channel;
pub mod sampling;

pub use channel::Channel;
pub use sampling::{CanObserve, CanSample, CanSampleBits};
