// Copyright 2025 Irreducible Inc.

use std::iter::repeat_with;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use ecstark_core::merkle_tree::MerkleTree;
use ecstark_field::{StarkField, ToyField, UniformRand};
use ecstark_hash::{stark_pedersen_params, toy_pedersen_params, PedersenHash};
use rand::{rngs::StdRng, SeedableRng};

const LOG_TREE_SIZE: usize = 10;
const ELEMS_IN_ROW: usize = 16;

fn bench_merkle_tree(c: &mut Criterion) {
	let mut group = c.benchmark_group("slow/merkle_tree");
	group.sample_size(10);
	group.throughput(Throughput::Elements((1 << LOG_TREE_SIZE) as u64));
	let mut rng = StdRng::seed_from_u64(0);

	let toy = PedersenHash::new(toy_pedersen_params()).unwrap();
	let leaves = repeat_with(|| ToyField::rand(&mut rng))
		.take(1 << LOG_TREE_SIZE)
		.collect::<Vec<_>>();
	group.bench_function(format!("toy build 2^{LOG_TREE_SIZE} leaves"), |b| {
		b.iter(|| MerkleTree::build(&toy, leaves.clone()))
	});
	let rows = repeat_with(|| {
		repeat_with(|| ToyField::rand(&mut rng))
			.take(ELEMS_IN_ROW)
			.collect::<Vec<_>>()
	})
	.take(1 << LOG_TREE_SIZE)
	.collect::<Vec<_>>();
	group.bench_function(format!("toy commit 2^{LOG_TREE_SIZE}x{ELEMS_IN_ROW} rows"), |b| {
		b.iter(|| MerkleTree::commit_rows(&toy, &rows))
	});

	let stark = PedersenHash::new(stark_pedersen_params()).unwrap();
	let leaves = repeat_with(|| StarkField::rand(&mut rng))
		.take(1 << LOG_TREE_SIZE)
		.collect::<Vec<_>>();
	group.bench_function(format!("stark build 2^{LOG_TREE_SIZE} leaves"), |b| {
		b.iter(|| MerkleTree::build(&stark, leaves.clone()))
	});
	group.finish()
}

criterion_main!(merkle_tree);
criterion_group!(merkle_tree, bench_merkle_tree);
