use cc_json::{decode, tokenize};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::Value;

// A sample "medium" JSON document
const MEDIUM_JSON: &str = r#"
{
    "name": "Babbage",
    "age": 30,
    "admin": true,
    "friends": ["Ada", "Charles", "Grace"],
    "tasks": [
        { "id": 1, "title": "Parse JSON", "done": false },
        { "id": 2, "title": "Write \"docs\"\n", "done": true }
    ],
    "nested": {"key": [null, 1, 1.23e4, "é"]}
}
"#;

fn bench_tokenizing(c: &mut Criterion) {
    c.bench_function("tokenize", |b| {
        b.iter(|| tokenize(black_box(MEDIUM_JSON)).unwrap())
    });
}

fn bench_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("JSON Decoding");

    group.bench_function("cc_json::decode", |b| {
        b.iter(|| decode(black_box(MEDIUM_JSON)).unwrap())
    });

    group.bench_function("serde_json::from_str", |b| {
        b.iter(|| {
            let _: Value = serde_json::from_str(black_box(MEDIUM_JSON)).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tokenizing, bench_decoding);
criterion_main!(benches);
