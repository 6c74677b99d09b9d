// Copyright 2024 Irreducible Inc.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use ecstark_field::{Field, FieldExt, StarkField, ToyField, UniformRand};
use rand::{rngs::StdRng, SeedableRng};

const BATCH: usize = 1 << 12;

fn bench_field<F: FieldExt>(c: &mut Criterion, name: &str) {
	let mut rng = StdRng::seed_from_u64(0);
	let lhs = (0..BATCH).map(|_| F::rand(&mut rng)).collect::<Vec<_>>();
	let rhs = (0..BATCH).map(|_| F::rand(&mut rng)).collect::<Vec<_>>();

	let mut group = c.benchmark_group(name);
	group.throughput(Throughput::Elements(BATCH as u64));
	group.bench_function("mul", |b| {
		b.iter(|| lhs.iter().zip(&rhs).map(|(x, y)| *x * y).sum::<F>())
	});
	group.bench_function("inverse", |b| {
		b.iter(|| {
			lhs.iter()
				.filter_map(|x| x.checked_inverse().ok())
				.sum::<F>()
		})
	});
	group.bench_function("square", |b| b.iter(|| lhs.iter().map(|x| x.square()).sum::<F>()));
	group.finish();
}

fn bench_prime_fields(c: &mut Criterion) {
	bench_field::<StarkField>(c, "StarkField");
	bench_field::<ToyField>(c, "ToyField");
}

criterion_group!(prime_field, bench_prime_fields);
criterion_main!(prime_field);
