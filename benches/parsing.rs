//! Performance benchmarks for marksift
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use marksift::{Document, Options};

/// Sample articles of various sizes
mod samples {
    pub const SMALL: &str = r#"# Layout

Flexbox basics and terminology.

- main axis
- cross axis

`display: flex` turns it on.
"#;

    pub const ARTICLE: &str = r#"# Flexible Box Layout

The flex container distributes space along a main axis.

## Container Properties

Set **display** to `flex` on the container.

|property|values|
|-|-|
|justify-content|start, center, end|
|align-items|stretch, center|

## Gap

Use the gap property for spacing between items.

```css
.container {
  display: flex;
  gap: 16px;
}
```

![Axes overview](axes__420.png)

## Wrapping

Items wrap onto new lines with [flex-wrap](wrap.html).
"#;

    /// Generate a large article by repeating sections
    pub fn large() -> String {
        let mut out = String::new();
        for index in 0..200 {
            out.push_str(&format!("# Section {index}\n\n"));
            out.push_str("A paragraph with **bold**, `code`, and [a link](page.html).\n\n");
            out.push_str("- first\n  - nested\n- second\n\n");
            out.push_str("```\nlet x = a < b;\n```\n\n");
        }
        out
    }
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for (name, input) in [("small", samples::SMALL), ("article", samples::ARTICLE)] {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_function(name, |b| b.iter(|| marksift::to_tokens(black_box(input))));
    }

    let large = samples::large();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large", |b| b.iter(|| marksift::to_tokens(black_box(&large))));

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let options = Options::default();
    let documents = vec![
        Document::parse("flex", samples::ARTICLE, &options),
        Document::parse("grid", &samples::large(), &options),
    ];

    c.bench_function("search", |b| {
        b.iter(|| marksift::search(black_box(&documents), black_box("gap")))
    });
}

criterion_group!(benches, bench_pipeline, bench_search);
criterion_main!(benches);
