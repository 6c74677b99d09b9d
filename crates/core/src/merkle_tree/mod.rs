// Copyright 2024 Irreducible Inc.

//! Binary Merkle trees over field elements, compressed with a two-input hash.
//!
//! Leaves are padded to a power of two with a sentinel that lies outside the field, so a padded
//! slot can never collide with a committed value.

mod error;
#[allow(clippy::module_inception)]
mod merkle_tree;

pub use error::*;
pub use merkle_tree::*;
