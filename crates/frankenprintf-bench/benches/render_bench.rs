//! Render benchmarks: compiled templates against `format!`.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use frankenprintf_bench::workloads;
use frankenprintf_core::{Arg, Template};

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for workload in workloads() {
        let template = match Template::compile(workload.template) {
            Ok(template) => template,
            Err(err) => panic!("{}: {err}", workload.name),
        };
        let len = template.render_bytes(&workload.args).map_or(0, |b| b.len());
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(
            BenchmarkId::new("frankenprintf", workload.name),
            &workload.args,
            |b, args| {
                b.iter(|| black_box(template.render(black_box(args))));
            },
        );
    }
    group.finish();
}

fn bench_against_format(c: &mut Criterion) {
    let template = Template::compile("%-12s|%8.3f|%5d").ok();
    let mut group = c.benchmark_group("row");
    group.bench_function("frankenprintf", |b| {
        b.iter(|| {
            template.as_ref().map(|t| {
                t.render(&[
                    Arg::from(black_box("latency")),
                    Arg::from(black_box(12.3456)),
                    Arg::from(black_box(42)),
                ])
            })
        });
    });
    group.bench_function("std_format", |b| {
        b.iter(|| {
            format!(
                "{:<12}|{:8.3}|{:5}",
                black_box("latency"),
                black_box(12.3456),
                black_box(42)
            )
        });
    });
    group.finish();
}

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimated_len");
    for workload in workloads() {
        let Ok(template) = Template::compile(workload.template) else {
            continue;
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(workload.name),
            &workload.args,
            |b, args| {
                b.iter(|| black_box(template.estimated_len(black_box(args))));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_render, bench_against_format, bench_estimate);
criterion_main!(benches);
