//! Rich buffer performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use emojikit::text::{EmojiAttachment, delete_backward};
use emojikit::{EmojiEntry, GlyphMetrics, RichBuffer, Selection};
use std::hint::black_box;

fn attachment() -> EmojiAttachment {
    let entry = EmojiEntry::new("bench", "/bench/bench.png").unwrap();
    EmojiAttachment::new(entry, GlyphMetrics::default())
}

fn buffer_with_attachments(runs: usize) -> RichBuffer {
    let mut buffer = RichBuffer::new();
    for _ in 0..runs {
        buffer.push_text("some words ");
        buffer.push_emoji(attachment());
    }
    buffer
}

fn buffer_creation(c: &mut Criterion) {
    c.bench_function("richbuffer_from_text_10k", |b| {
        let text = "x".repeat(10_000);
        b.iter(|| RichBuffer::from_text(black_box(&text)));
    });

    c.bench_function("richbuffer_push_emoji_100", |b| {
        b.iter(|| buffer_with_attachments(black_box(100)));
    });
}

fn buffer_queries(c: &mut Criterion) {
    let buffer = buffer_with_attachments(500);

    c.bench_function("richbuffer_attachment_at", |b| {
        b.iter(|| black_box(&buffer).attachment_at(black_box(3_000)));
    });

    c.bench_function("richbuffer_plain_text", |b| {
        b.iter(|| black_box(&buffer).plain_text());
    });

    c.bench_function("richbuffer_segments", |b| {
        b.iter(|| black_box(&buffer).segments());
    });
}

fn buffer_edits(c: &mut Criterion) {
    let buffer = buffer_with_attachments(500);

    c.bench_function("richbuffer_insert_middle", |b| {
        b.iter_batched(
            || buffer.clone(),
            |mut buffer| buffer.insert_text(3_000, "typed"),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("richbuffer_delete_backward_attachment", |b| {
        b.iter_batched(
            || buffer.clone(),
            |mut buffer| delete_backward(&mut buffer, Selection::caret(12)),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, buffer_creation, buffer_queries, buffer_edits);
criterion_main!(benches);
