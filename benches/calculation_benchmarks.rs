//! Performance benchmarks for the Estate Distribution Engine.
//!
//! This benchmark suite measures:
//! - A single distribution computed directly by the engine
//! - A single distribution through the HTTP API
//! - A batch of 100 varied cases through the HTTP API
//! - Scaling with the number of declared relatives
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use estate_engine::api::{create_router, AppState, CalculationRequest};
use estate_engine::calculation::calculate_distribution;
use estate_engine::config::ConfigLoader;
use estate_engine::models::InheritanceCase;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/faraid").expect("Failed to load config");
    AppState::new(config)
}

/// Roles cycled through when building larger families.
const FAMILY_ROLES: [(&str, &str); 8] = [
    ("son", "male"),
    ("daughter", "female"),
    ("full_brother", "male"),
    ("full_sister", "female"),
    ("maternal_brother", "male"),
    ("paternal_uncle", "male"),
    ("grandson_son", "male"),
    ("granddaughter_son", "female"),
];

/// Creates a calculation request with a wife, a mother and `extra` further relatives.
fn create_request_with_relatives(extra: usize) -> CalculationRequest {
    let mut relatives = vec![
        serde_json::json!({ "id": "wife", "role": "wife", "gender": "female" }),
        serde_json::json!({ "id": "mother", "role": "mother", "gender": "female" }),
    ];
    relatives.extend(
        FAMILY_ROLES
            .iter()
            .cycle()
            .take(extra)
            .enumerate()
            .map(|(i, (role, gender))| {
                serde_json::json!({
                    "id": format!("{}_{:03}", role, i + 1),
                    "role": role,
                    "gender": gender
                })
            }),
    );

    let request_json = serde_json::json!({
        "deceased": { "gender": "male" },
        "relatives": relatives,
        "estate_value": "250000.00"
    });

    serde_json::from_value(request_json).expect("Failed to create request")
}

async fn post(router: axum::Router, body: String) -> axum::response::Response {
    router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Benchmark: One distribution computed directly, without HTTP.
fn bench_engine_direct(c: &mut Criterion) {
    let loader = ConfigLoader::load("./config/faraid").expect("Failed to load config");
    let case: InheritanceCase = create_request_with_relatives(4).into();

    c.bench_function("engine_direct", |b| {
        b.iter(|| black_box(calculate_distribution(black_box(&case), loader.catalog())))
    });
}

/// Benchmark: One distribution through the API.
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::to_string(&create_request_with_relatives(4)).unwrap();

    c.bench_function("single_request", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(post(router.clone(), body.clone()).await) })
    });
}

/// Benchmark: Batch of 100 varied cases.
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();

    let requests: Vec<String> = (0..100)
        .map(|i| serde_json::to_string(&create_request_with_relatives(i % 12)).unwrap())
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                results.push(post(router, body.clone()).await);
            }
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: Various family sizes to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let loader = ConfigLoader::load("./config/faraid").expect("Failed to load config");

    let mut group = c.benchmark_group("scaling");

    for extra in [0usize, 4, 16, 64].iter() {
        let case: InheritanceCase = create_request_with_relatives(*extra).into();

        group.throughput(Throughput::Elements(case.relatives.len() as u64));
        group.bench_with_input(BenchmarkId::new("relatives", extra + 2), &case, |b, case| {
            b.iter(|| black_box(calculate_distribution(case, loader.catalog())))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_engine_direct,
    bench_single_request,
    bench_batch_100,
    bench_scaling,
);
criterion_main!(benches);
