// Copyright 2024 Irreducible Inc.

use std::str::FromStr;

/// Reads a value from the environment variable, ignoring it when it is unset or malformed.
pub fn parsed_env_var<T: FromStr>(name: &str) -> Option<T> {
	match std::env::var(name) {
		Ok(val) => match val.parse::<T>() {
			Ok(parsed) => Some(parsed),
			Err(_) => {
				tracing::warn!(var = name, value = %val, "ignoring malformed environment variable");
				None
			}
		},
		Err(_) => None,
	}
}
