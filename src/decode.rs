/*!
# Incremental JSON Decoding

The decode pipeline: a single-value decoder that treats incompleteness as a
first-class outcome, a streaming driver that drains every complete document
out of an accumulating buffer, and an optional bottom-up reviver pass over
freshly decoded values.

All of it is synchronous, allocation-bounded, and side-effect-free on its
inputs: one call per inbound chunk from an I/O callback, no retained
references to caller buffers, and no logging — observability belongs to the
caller.
*/

pub mod builder;
pub mod reviver;
pub mod stream;

// Re-exports
pub use builder::{Decoded, decode_value};
pub use reviver::{decode_value_with, revive};
pub use stream::{StreamDecoder, decode_buffer};
