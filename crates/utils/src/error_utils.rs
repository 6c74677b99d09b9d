// Copyright 2024-2025 Irreducible Inc.

/// Returns early with the given error, converted with `Into`.
///
/// With the `bail_panic` feature enabled the macro panics instead, which gives a backtrace at the
/// point of failure when debugging a prover.
#[cfg(feature = "bail_panic")]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		panic!("{}", $err);
	};
}

#[cfg(not(feature = "bail_panic"))]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		return Err($err.into());
	};
}

/// Returns early with the given error unless the condition holds.
#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}

#[cfg(all(test, not(feature = "bail_panic")))]
mod tests {
	#[derive(Debug, PartialEq)]
	struct Failed(u32);

	fn check(value: u32) -> Result<u32, Failed> {
		ensure!(value < 10, Failed(value));
		if value == 7 {
			bail!(Failed(7));
		}
		Ok(value)
	}

	#[test]
	fn test_ensure_and_bail() {
		assert_eq!(check(3), Ok(3));
		assert_eq!(check(7), Err(Failed(7)));
		assert_eq!(check(12), Err(Failed(12)));
	}
}
