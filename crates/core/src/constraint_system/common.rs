// Copyright 2024 Irreducible Inc.

use ecstark_utils::env::parsed_env_var;
use getset::CopyGetters;

use crate::{merkle_tree::MerkleProof, protocols::fri::FriProof};

/// Environment variable that overrides the default query count.
pub const N_QUERIES_ENV: &str = "ECSTARK_N_QUERIES";

/// Protocol parameters shared by the prover and the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
pub struct ProofOptions {
	/// Log2 of the minimum ratio between the low-degree extension and the trace length.
	#[getset(get_copy = "pub")]
	log_blowup: usize,
	/// Number of query rounds.
	#[getset(get_copy = "pub")]
	n_queries: usize,
}

impl ProofOptions {
	pub const DEFAULT_LOG_BLOWUP: usize = 2;
	pub const DEFAULT_N_QUERIES: usize = 16;

	pub const fn new(log_blowup: usize, n_queries: usize) -> Self {
		Self {
			log_blowup,
			n_queries,
		}
	}

	/// Degree of the random multiple of $x^N - 1$ added to every trace column before extension.
	///
	/// Each query opens every column at two points, so this many coefficients of randomness keep
	/// the opened values independent of the witness.
	pub const fn hiding_degree(&self) -> usize {
		2 * self.n_queries
	}
}

impl Default for ProofOptions {
	/// Blowup 4 and 16 queries, unless `ECSTARK_N_QUERIES` is set.
	fn default() -> Self {
		let n_queries = parsed_env_var(N_QUERIES_ENV).unwrap_or(Self::DEFAULT_N_QUERIES);
		Self::new(Self::DEFAULT_LOG_BLOWUP, n_queries)
	}
}

/// One opened row of the trace extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOpening<F> {
	pub values: Vec<F>,
	pub proof: MerkleProof<F>,
}

/// The two rows a query reads: the queried point `x` and its successor `g * x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceQuery<F> {
	pub current: RowOpening<F>,
	pub next: RowOpening<F>,
}

/// A non-interactive proof.
#[derive(Debug, Clone)]
pub struct Proof<F> {
	pub trace_root: F,
	pub trace_queries: Vec<TraceQuery<F>>,
	pub fri: FriProof<F>,
	/// Every `(label, value)` the prover sent through the channel, in order.
	pub transcript: Vec<(String, F)>,
}

impl<F> Proof<F> {
	/// Number of field elements in the proof, transcript excluded.
	pub fn size_in_elements(&self) -> usize {
		let opening_size = |opening: &RowOpening<F>| opening.values.len() + opening.proof.depth();
		let trace = self
			.trace_queries
			.iter()
			.map(|query| opening_size(&query.current) + opening_size(&query.next))
			.sum::<usize>();
		1 + trace + self.fri.size_in_elements()
	}
}
