// Copyright 2024 Irreducible Inc.

//! Replay artifacts: flat lists of field elements stored as decimal residues, one per line.
//!
//! These are debugging aids for comparing traces, interpolated coefficients or domain
//! evaluations across prover runs. Nothing in the proving pipeline depends on them.

use std::io::{BufRead, Write};

use crate::{Error, FieldExt};

pub fn write_decimal_felts<F: FieldExt>(mut writer: impl Write, felts: &[F]) -> Result<(), Error> {
	for felt in felts {
		writeln!(writer, "{}", felt.to_decimal())?;
	}
	writer.flush()?;
	Ok(())
}

/// Reads back a list written by [`write_decimal_felts`]. Blank lines are skipped.
pub fn read_decimal_felts<F: FieldExt>(reader: impl BufRead) -> Result<Vec<F>, Error> {
	let mut felts = Vec::new();
	for (i, line) in reader.lines().enumerate() {
		let line = line?;
		let trimmed = line.trim();
		if trimmed.is_empty() {
			continue;
		}
		let felt = F::from_decimal(trimmed).map_err(|_| Error::MalformedDecimal { line: i + 1 })?;
		felts.push(felt);
	}
	Ok(felts)
}
