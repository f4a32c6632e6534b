use criterion::{Criterion, criterion_group, criterion_main};
use pagecraft_engine::editing::{Direction, change_column_count, duplicate_block, move_block};
use pagecraft_engine::models::{BlockId, Language};
use pagecraft_engine::normalize::{decode_blocks, mangle_nested_arrays};
use pagecraft_engine::views::{RenderContext, render_blocks};
use pagecraft_engine::Registry;
use std::hint::black_box;
mod common;

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    group.sample_size(20);

    let canonical = common::generate_tree(100, 5);
    let mangled = mangle_nested_arrays(&canonical);

    group.bench_function("decode_canonical", |b| {
        b.iter(|| black_box(decode_blocks(Some(black_box(&canonical)))));
    });
    group.bench_function("decode_mangled", |b| {
        b.iter(|| black_box(decode_blocks(Some(black_box(&mangled)))));
    });

    group.finish();
}

fn bench_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutations");
    group.sample_size(20);

    let tree = decode_blocks(Some(&common::generate_tree(100, 5)));
    let nested = BlockId::from("h-99-1-4");
    let container = BlockId::from("cols-50");

    group.bench_function("move_deepest", |b| {
        b.iter(|| black_box(move_block(&tree, black_box(&nested), Direction::Up)));
    });
    group.bench_function("duplicate_container", |b| {
        b.iter(|| black_box(duplicate_block(&tree, black_box(&container))));
    });
    group.bench_function("shrink_columns", |b| {
        b.iter(|| black_box(change_column_count(&tree, black_box(&container), 1)));
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(20);

    let tree = decode_blocks(Some(&common::generate_tree(100, 5)));
    let registry = Registry::builtin();

    for language in [Language::Ar, Language::En] {
        group.bench_function(format!("render_blocks_{}", language.key_suffix()), |b| {
            let ctx = RenderContext::new(language, &registry);
            b.iter(|| black_box(render_blocks(black_box(&tree), &ctx)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_mutations, bench_render);
criterion_main!(benches);
