use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pxshot_json::{parse, print, print_pretty, Value};

const SCREENSHOT_RESPONSE: &str = r#"{
    "url": "https://cdn.pxshot.com/s/abc123.png",
    "expires_at": "2026-01-02T03:04:05Z",
    "width": 1920,
    "height": 1080,
    "size_bytes": 482133
}"#;

fn large_document() -> String {
    let mut source = String::from("[");
    for i in 0..1000 {
        if i > 0 {
            source.push(',');
        }
        source.push_str(&format!(
            r#"{{"id":{},"url":"https://example.com/page/{}","ratio":{}.5,"tags":["a","b\n"],"ok":true,"extra":null}}"#,
            i, i, i
        ));
    }
    source.push(']');
    source
}

fn parse_small_response(c: &mut Criterion) {
    c.bench_function("parse_small_response", |b| {
        b.iter(|| parse(black_box(SCREENSHOT_RESPONSE)))
    });
}

fn parse_large_document(c: &mut Criterion) {
    let source = large_document();

    c.bench_function("parse_large_document", |b| {
        b.iter(|| parse(black_box(&source)))
    });
}

fn print_large_document(c: &mut Criterion) {
    let value: Value = parse(&large_document()).unwrap();

    c.bench_function("print_large_document", |b| {
        b.iter(|| print(black_box(&value)))
    });
    c.bench_function("print_pretty_large_document", |b| {
        b.iter(|| print_pretty(black_box(&value)))
    });
}

fn lex_only(c: &mut Criterion) {
    use pxshot_json::lexer::lex;

    let source = large_document();

    c.bench_function("lex_only", |b| {
        b.iter(|| lex(black_box(&source)).count())
    });
}

criterion_group!(
    benches,
    parse_small_response,
    parse_large_document,
    print_large_document,
    lex_only
);
criterion_main!(benches);
