//! Accumulator benchmark: Measure per-event cost of folding a stream.
//!
//! Target: appending a word-sized delta stays well under 1µs.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use redline::document::word_chunks;
use redline::{DocumentEvent, RevisionAccumulator};

const SAMPLE: &str = "## Streaming\n\nA model emits **tokens** quickly; the accumulator appends each \
fragment and the display re-annotates on its own schedule.\n\n```rust\nfn main() {}\n```\n";

fn events(repeat: usize) -> Vec<DocumentEvent> {
    let text = SAMPLE.repeat(repeat);
    let mut events = vec![DocumentEvent::title("Bench"), DocumentEvent::Clear];
    events.extend(word_chunks(&text).map(DocumentEvent::delta));
    events.push(DocumentEvent::Finish);
    events
}

fn accumulate_stream(c: &mut Criterion) {
    let events = events(100);
    let mut group = c.benchmark_group("accumulate");
    group.throughput(Throughput::Elements(events.len() as u64));
    group.bench_function("word_chunks_100", |b| {
        b.iter(|| {
            let mut acc = RevisionAccumulator::new();
            acc.apply_all(black_box(&events));
            acc
        });
    });
    group.finish();
}

fn decode_events(c: &mut Criterion) {
    let lines: Vec<String> = events(10)
        .iter()
        .filter_map(|e| serde_json::to_string(e).ok())
        .collect();

    c.bench_function("decode_ndjson_10", |b| {
        b.iter(|| {
            let mut acc = RevisionAccumulator::new();
            for line in &lines {
                if let Ok(event) = serde_json::from_str::<DocumentEvent>(black_box(line)) {
                    acc.apply(&event);
                }
            }
            acc
        });
    });
}

criterion_group!(benches, accumulate_stream, decode_events);
criterion_main!(benches);
