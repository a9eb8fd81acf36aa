//! Model construction benchmarks.

use codemodel_bench::fixtures;
use codemodel_model::CodeModel;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn benchmark_type_interning(c: &mut Criterion) {
    let mut cm = CodeModel::new();

    c.bench_function("ref_name_interned", |b| {
        b.iter(|| cm.ref_name(black_box("java.util.concurrent.ConcurrentHashMap")))
    });

    let map = cm.ref_name("java.util.Map");
    let string = cm.ref_name("java.lang.String");
    c.bench_function("narrow_interned", |b| {
        b.iter(|| cm.narrow(black_box(map), &[string, string]))
    });
}

fn benchmark_bean_construction(c: &mut Criterion) {
    c.bench_function("build_bean_16_fields", |b| {
        b.iter(|| {
            let mut cm = CodeModel::new();
            fixtures::bean(&mut cm, black_box("com.acme.Bean"), 16)
        })
    });
}

criterion_group!(benches, benchmark_type_interning, benchmark_bean_construction);
criterion_main!(benches);
