//! Performance benchmarks for pagesift.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks walk synthetic snapshots: a small article-shaped page for
//! microbenchmarks and a wide page that saturates the node budget.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pagesift::{
    extract_content, extract_interactive, DocumentInfo, DocumentSnapshot, SnapshotBuilder,
};

fn article_snapshot() -> DocumentSnapshot {
    let mut builder = SnapshotBuilder::new();
    let body = builder.root();

    let heading = builder.element(body, "h1");
    builder.text(heading, "Sample Article Title");
    for i in 0..20 {
        let p = builder.element(body, "p");
        builder.text(
            p,
            &format!("Paragraph {i} carries enough prose to exercise the cleaner and the walk."),
        );
    }

    let table = builder.element(body, "table");
    let head = builder.element(table, "tr");
    for label in ["Name", "Role", "City"] {
        let th = builder.element(head, "th");
        builder.text(th, label);
    }
    for i in 0..5 {
        let tr = builder.element(table, "tr");
        for j in 0..3 {
            let td = builder.element(tr, "td");
            builder.text(td, &format!("cell {i}-{j}"));
        }
    }

    let list = builder.element(body, "ul");
    for i in 0..5 {
        let li = builder.element(list, "li");
        builder.text(li, &format!("list item {i}"));
    }

    for i in 0..10 {
        let a = builder.element(body, "a");
        builder.attr(a, "href", &format!("https://example.com/{i}"));
        builder.text(a, &format!("link {i}"));
    }

    let button = builder.element(body, "button");
    builder.attr(button, "id", "submit");
    let input = builder.element(body, "input");
    builder.attr(input, "type", "text");
    builder.attr(input, "placeholder", "Search");

    builder.document(DocumentInfo {
        title: "Sample Article".to_string(),
        url: "https://example.com/article".to_string(),
        ..DocumentInfo::default()
    });
    builder.finish()
}

fn wide_snapshot(paragraphs: usize) -> DocumentSnapshot {
    let mut builder = SnapshotBuilder::new();
    let body = builder.root();
    for i in 0..paragraphs {
        let div = builder.element(body, "div");
        let p = builder.element(div, "p");
        builder.text(p, &format!("Generated paragraph {i} with filler text."));
    }
    builder.finish()
}

fn bench_extract_content(c: &mut Criterion) {
    let snapshot = article_snapshot();
    c.bench_function("extract_content_article", |b| {
        b.iter(|| extract_content(black_box(&snapshot)));
    });
}

fn bench_extract_interactive(c: &mut Criterion) {
    let snapshot = article_snapshot();
    c.bench_function("extract_interactive_article", |b| {
        b.iter(|| extract_interactive(black_box(&snapshot)));
    });
}

fn bench_node_budget(c: &mut Criterion) {
    let mut group = c.benchmark_group("node_budget");
    for paragraphs in [100usize, 500, 1000] {
        let snapshot = wide_snapshot(paragraphs);
        group.bench_with_input(
            BenchmarkId::new("extract_content", paragraphs),
            &snapshot,
            |b, snapshot| {
                b.iter(|| extract_content(black_box(snapshot)));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_extract_content,
    bench_extract_interactive,
    bench_node_budget
);
criterion_main!(benches);
