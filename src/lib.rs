/*!
# `jsondrip` Library

Incremental decoding for JSON streams that arrive in arbitrarily small,
arbitrarily split fragments — packetized transports, base64-decoded
notification payloads, anything where chunk boundaries ignore value
boundaries. Feed text as it arrives and get back every document that is
fully present, in arrival order, with the partial tail retained for later.

Also ships [`decycle`](decycle::decycle), which snapshots shared or cyclic
in-memory value graphs into acyclic trees safe for any JSON encoder.

```rust
use jsondrip::decode::StreamDecoder;

let mut decoder = StreamDecoder::new();
assert!(decoder.push(r#"{"a": 1}{"b""#).len() == 1);
assert!(decoder.push(r#": 2}"#).len() == 1);
```
*/

pub mod commands;
pub mod decode;
pub mod decycle;
pub mod tokenizer;
pub mod utils;
