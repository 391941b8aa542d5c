//! Generation throughput across spec sizes.
//!
//! Run with: cargo bench --package specgen-codegen

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Value, json};
use specgen_codegen::CodeGenerator;
use specgen_core::{GeneratorConfig, Spec};
use std::hint::black_box;

/// One API with CRUD operations over a model.
fn api(index: usize) -> Value {
    let model = format!("Item{index}");
    json!({
        "name": format!("items_{index}"),
        "operations": [
            {
                "name": "get",
                "endpoint": {
                    "method": "GET",
                    "url": format!("/items-{index}/{{id}}"),
                    "url_params": [{ "name": "id", "type": "uuid" }]
                },
                "responses": [
                    { "status": "ok", "body": { "json": model } },
                    { "status": "not_found" }
                ]
            },
            {
                "name": "list",
                "endpoint": { "method": "GET", "url": format!("/items-{index}") },
                "query_params": [
                    { "name": "tag", "type": "string[]" },
                    { "name": "limit", "type": "int", "default": "50" }
                ],
                "responses": [{ "status": "ok", "body": { "json": format!("{model}[]") } }]
            },
            {
                "name": "create",
                "endpoint": { "method": "POST", "url": format!("/items-{index}") },
                "body": { "json": { "type": model } },
                "responses": [{ "status": "created", "body": { "json": model } }]
            }
        ]
    })
}

fn model(index: usize) -> Value {
    json!({
        "name": format!("Item{index}"),
        "kind": { "object": { "fields": [
            { "name": "id", "type": "uuid" },
            { "name": "name", "type": "string" },
            { "name": "price", "type": "decimal" },
            { "name": "createdAt", "type": "datetime" },
            { "name": "labels", "type": "string{}" },
            { "name": "parent", "type": format!("Item{index}?") }
        ] } }
    })
}

fn spec(apis: usize, versions: usize) -> Spec {
    let versions: Vec<Value> = (0..versions)
        .map(|version| {
            json!({
                "name": format!("v{}", version + 1),
                "apis": (0..apis).map(api).collect::<Vec<_>>(),
                "models": (0..apis).map(model).collect::<Vec<_>>()
            })
        })
        .collect();
    serde_json::from_value(json!({ "name": "bench", "versions": versions }))
        .expect("benchmark spec is valid")
}

fn bench_service_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("service_generation");
    let generator = CodeGenerator::new(GeneratorConfig::default()).unwrap();

    for apis in [1, 10, 50] {
        let spec = spec(apis, 1);
        group.throughput(Throughput::Elements(apis as u64));
        group.bench_with_input(BenchmarkId::from_parameter(apis), &spec, |b, spec| {
            b.iter(|| generator.generate_service(black_box(spec)).unwrap());
        });
    }

    group.finish();
}

fn bench_client_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("client_generation");
    let generator = CodeGenerator::new(GeneratorConfig::default()).unwrap();

    for apis in [1, 10, 50] {
        let spec = spec(apis, 1);
        group.throughput(Throughput::Elements(apis as u64));
        group.bench_with_input(BenchmarkId::from_parameter(apis), &spec, |b, spec| {
            b.iter(|| generator.generate_client(black_box(spec)).unwrap());
        });
    }

    group.finish();
}

fn bench_versions(c: &mut Criterion) {
    let mut group = c.benchmark_group("versions");
    let generator = CodeGenerator::new(GeneratorConfig::default()).unwrap();

    // Versions are the unit of parallel generation
    for versions in [1, 4, 16] {
        let spec = spec(10, versions);
        group.throughput(Throughput::Elements(versions as u64));
        group.bench_with_input(BenchmarkId::from_parameter(versions), &spec, |b, spec| {
            b.iter(|| generator.generate_service(black_box(spec)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_service_generation,
    bench_client_generation,
    bench_versions
);
criterion_main!(benches);
