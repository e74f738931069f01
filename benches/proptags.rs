//! Property tag arithmetic benchmarks
//!
//! The free functions should compile to single mask/shift instructions; the
//! name lookup pays one hash probe after the lazy table is built.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mapikit::proptags::{prop_tag, prop_tag_name, prop_type_and_id, PR_MESSAGE_CLASS_W, PT_UNICODE};

fn bench_proptags(c: &mut Criterion) {
    c.bench_function("prop_tag_pack", |b| {
        b.iter(|| prop_tag(black_box(PT_UNICODE), black_box(26)))
    });

    c.bench_function("prop_tag_unpack", |b| {
        b.iter(|| prop_type_and_id(black_box(PR_MESSAGE_CLASS_W)))
    });

    c.bench_function("prop_tag_name_lookup", |b| {
        b.iter(|| prop_tag_name(black_box(PR_MESSAGE_CLASS_W)))
    });
}

criterion_group!(benches, bench_proptags);
criterion_main!(benches);
