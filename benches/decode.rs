//! Decoding throughput over a synthetic multi-document stream.
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use jsondrip::decode::{StreamDecoder, decode_buffer};

/// Build a stream of `n` back-to-back documents with no separators.
fn stream_fixture(n: usize) -> String {
    let mut stream = String::new();
    for i in 0..n {
        stream.push_str(&format!(
            r#"{{"seq": {i}, "state": {{"reported": {{"temp": 21.5, "tags": ["a", "b", "c"], "ok": true}}}}}}"#
        ));
    }
    stream
}

fn bench_decode(c: &mut Criterion) {
    let stream = stream_fixture(100);

    c.bench_function("decode_buffer/100 docs", |b| {
        b.iter(|| {
            let mut values = Vec::new();
            decode_buffer(black_box(&stream), &mut values);
            values
        });
    });

    c.bench_function("stream_decoder/16 byte chunks", |b| {
        b.iter(|| {
            let mut decoder = StreamDecoder::new();
            let mut count = 0;
            for chunk in stream.as_bytes().chunks(16) {
                // fixture is ASCII, safe to split anywhere
                count += decoder
                    .push(std::str::from_utf8(chunk).expect("ascii fixture"))
                    .len();
            }
            black_box(count)
        });
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
