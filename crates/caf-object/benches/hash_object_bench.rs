use caf_object::encode::{encode_commit, encode_tree};
use caf_object::{Commit, Encoding, HashAlgorithm, ObjectFormat, ObjectHash, Tree, TreeRecord};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sample_tree(entries: usize) -> Tree {
    Tree::from_records((0..entries).map(|i| {
        TreeRecord::blob(
            format!("file-{i:05}.rs"),
            ObjectHash::new(format!("{:040x}", i * 7919)),
        )
    }))
}

fn sample_commit() -> Commit {
    Commit::new(
        ObjectHash::new("da39a3ee5e6b4b0d3255bfef95601890afd80709"),
        "Alice Author",
        "Implement feature X\n\nThis commit adds the feature X with full test coverage.\n",
        1_700_000_000,
        vec![
            ObjectHash::new("0000000000000000000000000000000000000001"),
            ObjectHash::new("0000000000000000000000000000000000000002"),
        ],
    )
}

fn encode_benchmarks(c: &mut Criterion) {
    let tree = sample_tree(1000);
    let commit = sample_commit();

    let mut group = c.benchmark_group("encode");

    group.bench_function("tree_1000_concatenated", |b| {
        b.iter(|| encode_tree(black_box(&tree), Encoding::Concatenated))
    });

    group.bench_function("tree_1000_length_prefixed", |b| {
        b.iter(|| encode_tree(black_box(&tree), Encoding::LengthPrefixed))
    });

    group.bench_function("commit", |b| {
        b.iter(|| encode_commit(black_box(&commit), Encoding::Concatenated))
    });

    group.finish();
}

fn hash_benchmarks(c: &mut Criterion) {
    let tree = sample_tree(1000);
    let sha1 = ObjectFormat::default();
    let sha256 = ObjectFormat::new(HashAlgorithm::Sha256, Encoding::Concatenated);

    let mut group = c.benchmark_group("hash_object");

    group.bench_function("tree_1000_sha1", |b| {
        b.iter(|| sha1.hash(black_box(&tree)))
    });

    group.bench_function("tree_1000_sha256", |b| {
        b.iter(|| sha256.hash(black_box(&tree)))
    });

    group.bench_function("build_tree_1000", |b| {
        b.iter(|| sample_tree(black_box(1000)))
    });

    group.finish();
}

criterion_group!(benches, encode_benchmarks, hash_benchmarks);
criterion_main!(benches);
