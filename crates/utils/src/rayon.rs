// Copyright 2024 Irreducible Inc.

use std::{env, sync::OnceLock};

/// In case when number of threads is set to 1, use rayon thread pool with
/// `use_current_thread` set to true. The prover then behaves exactly like a single-threaded
/// program, which keeps profiles and tracing output readable.
///
/// NOTE: rayon doesn't allow initializing global thread pool several times, so
/// in case when it was initialized before this function returns an error.
/// The function returns reference to the result because `ThreadPoolBuildError`
/// doesn't implement `Clone`.
pub fn adjust_thread_pool() -> &'static Result<(), rayon::ThreadPoolBuildError> {
	static ONCE_GUARD: OnceLock<Result<(), rayon::ThreadPoolBuildError>> = OnceLock::new();

	ONCE_GUARD.get_or_init(|| {
		// `rayon::current_num_threads` would force the global pool to initialize.
		match env::var("RAYON_NUM_THREADS") {
			Ok(v) if v == "1" => rayon::ThreadPoolBuilder::new()
				.num_threads(1)
				.use_current_thread()
				.build_global(),
			_ => Ok(()),
		}
	})
}

/// Minimum number of items per rayon task when splitting per-element work, such as hashing LDE
/// rows or evaluating constraints over a domain.
pub fn min_len_per_task(total: usize) -> usize {
	(total / (4 * rayon::current_num_threads())).max(1)
}
