//! Benchmark: shared vs copied permission binding
//!
//! # Background
//!
//! `BindMode::Shared` clones an `Arc` handle; `BindMode::Copy` duplicates
//! every entry into a new allocation. Shared is the default.
//!
//! # When to revisit
//!
//! - If role tables grow to hundreds of capabilities
//! - If views are created per request rather than per session

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rolebook_auth::{BindMode, Freeze, PermissionDraft, PermissionView};
use rolebook_types::Subject;

fn permission_set(capabilities: usize) -> rolebook_auth::PermissionSet {
    let mut draft = PermissionDraft::new();
    for i in 0..capabilities {
        draft
            .try_set(&format!("cap_{i}"), i % 2 == 0)
            .expect("valid capability name");
    }
    draft.freeze()
}

fn bench_bind(c: &mut Criterion) {
    let mut group = c.benchmark_group("bind");

    for size in [4usize, 32, 256] {
        let set = permission_set(size);
        let subject = Subject::new("Kante");

        for mode in [BindMode::Shared, BindMode::Copy] {
            group.bench_with_input(BenchmarkId::new(mode.as_str(), size), &set, |b, set| {
                b.iter(|| black_box(PermissionView::bind(subject.clone(), set, mode)));
            });
        }
    }

    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let set = permission_set(32);
    let view = PermissionView::bind(Subject::new("Hazard"), &set, BindMode::Shared);

    c.bench_function("report/32", |b| {
        b.iter(|| black_box(view.report().count()));
    });
}

criterion_group!(benches, bench_bind, bench_report);
criterion_main!(benches);
