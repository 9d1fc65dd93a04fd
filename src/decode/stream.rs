/*!
# Streaming Decode Driver

Repeatedly applies the single-value decoder over a buffer that may hold
several JSON documents back-to-back with no separator (`{…}{…}`), plus a
trailing partial document that stays untouched until more of the stream
arrives.

[`decode_buffer`] is the primitive: it owns no state and reports how many
bytes it consumed, leaving the retained tail to the caller. Callers must
trim the consumed prefix between calls so that per-call work stays
proportional to the unconsumed remainder, not the whole stream.
[`StreamDecoder`] packages exactly that discipline behind a `push` API:

```rust
use jsondrip::decode::StreamDecoder;

let mut decoder = StreamDecoder::new();
assert!(decoder.push(r#"{"temp":"#).is_empty());

let docs = decoder.push("21.5}");
assert_eq!(docs.len(), 1);
assert!(decoder.pending().is_empty());
```
*/
use serde_json::Value;

use crate::decode::{Decoded, decode_value};

/// Decode every complete document at the front of `input`, appending them
/// to `values` in arrival order.
///
/// Returns the number of bytes consumed. The unconsumed tail — including a
/// document the buffer cut off mid-value — is the caller's to retain and
/// re-submit once more data has arrived; nothing of it is consumed here.
pub fn decode_buffer(input: &str, values: &mut Vec<Value>) -> usize {
    let mut cursor = 0;
    while cursor < input.len() {
        match decode_value(&input[cursor..]) {
            Decoded::Value(value, consumed) => {
                values.push(value);
                cursor += consumed;
            }
            Decoded::Incomplete => break,
        }
    }
    cursor
}

/// An accumulating decoder for a stream that arrives in arbitrary slices.
///
/// Each [`push`](Self::push) appends a chunk, drains every document that is
/// now complete, and keeps only the unconsumed tail buffered. The buffer
/// never holds consumed text, so repeated pushes of a slow stream re-scan
/// only the pending fragment.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    /// Unconsumed tail of the stream seen so far
    buffer: String,
}

impl StreamDecoder {
    /// Create an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Feed the next chunk of the stream, returning every document that
    /// completed with it (possibly none).
    pub fn push(&mut self, chunk: &str) -> Vec<Value> {
        self.buffer.push_str(chunk);
        let mut values = Vec::new();
        let consumed = decode_buffer(&self.buffer, &mut values);
        self.buffer.drain(..consumed);
        values
    }

    /// The retained, not-yet-decodable tail of the stream.
    #[must_use]
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Discard any retained tail, e.g. on transport reconnect.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
