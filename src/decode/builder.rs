/*!
# Single-Value Decoder

Drives the [`Lexer`](crate::tokenizer::Lexer) token stream through a stack
machine that builds one top-level JSON value and detects the exact token at
which it becomes structurally complete.

Incompleteness is an outcome, not an error: a fragment that ends mid-value
reports [`Decoded::Incomplete`] and consumes nothing, so the caller can
retry once more of the stream has arrived.

```rust
use jsondrip::decode::{Decoded, decode_value};

assert_eq!(decode_value(r#"{"a": [1, 2"#), Decoded::Incomplete);

let Decoded::Value(value, consumed) = decode_value(r#"{"a": [1, 2]}"#) else {
    unreachable!()
};
assert_eq!(value["a"][1], 2.0);
assert_eq!(consumed, 13);
```

Malformed input is tolerated rather than diagnosed: stray closers and
keyless scalars inside objects are dropped, and the produced value for such
input is deliberately unspecified. Higher layers are the ones equipped to
tell valid traffic from noise.
*/
use serde_json::{Map, Value};

use crate::tokenizer::{Lexer, Token, TokenKind};

/// Outcome of attempting to decode one JSON value from the front of a
/// fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A full value was present: the value itself plus the byte offset just
    /// past its final token (or the fragment length when nothing but
    /// whitespace trails it).
    Value(Value, usize),
    /// The fragment ends before a value completes. Nothing is consumed.
    Incomplete,
}

/// An in-progress container on the build stack.
enum Frame {
    /// Array under construction
    Array(Vec<Value>),
    /// Object under construction, with the key (if any) awaiting its value
    Object {
        entries: Map<String, Value>,
        pending: Option<String>,
    },
}

impl Frame {
    /// Store a finished value into this container. Inside an object a value
    /// with no pending key has nowhere to go and is dropped; JSON forbids
    /// the shape that would produce one.
    fn store(&mut self, value: Value) {
        match self {
            Self::Array(items) => items.push(value),
            Self::Object { entries, pending } => {
                if let Some(key) = pending.take() {
                    // duplicate keys: last write wins
                    entries.insert(key, value);
                }
            }
        }
    }

    /// Close this container into a value.
    fn finish(self) -> Value {
        match self {
            Self::Array(items) => Value::Array(items),
            Self::Object { entries, .. } => Value::Object(entries),
        }
    }
}

/// Decode one JSON value from the front of `input`.
///
/// The stack is seeded with a synthetic root so that a bare top-level
/// scalar (`42`, `"abc"`, `true`, `null`) is permitted — an extension
/// beyond RFC 4627 — and completes at its own token. The value is complete
/// after the first token that leaves the stack empty with something stored
/// at the root; the reported offset is just past that token, or the full
/// fragment length when no further token follows (trailing whitespace is
/// then consumed along with the value).
#[must_use]
pub fn decode_value(input: &str) -> Decoded {
    let mut lexer = Lexer::new(input);
    // open containers, innermost last; an empty stack targets the root
    let mut stack: Vec<Frame> = Vec::new();
    // the synthetic root: receives exactly one completed top-level value
    let mut root: Vec<Value> = Vec::new();

    while let Some(token) = lexer.next() {
        match token.kind {
            TokenKind::BeginObject => stack.push(Frame::Object {
                entries: Map::new(),
                pending: None,
            }),
            TokenKind::BeginArray => stack.push(Frame::Array(Vec::new())),
            TokenKind::EndObject | TokenKind::EndArray => {
                let Some(frame) = stack.pop() else {
                    // stray closer before any open: dropped
                    continue;
                };
                let value = frame.finish();
                store(&mut stack, &mut root, value);
            }
            TokenKind::Str => {
                let text = unescape(&token.text[1..token.text.len() - 1]);
                match stack.last_mut() {
                    Some(Frame::Object { pending, .. }) if pending.is_none() => {
                        *pending = Some(text);
                    }
                    _ => store(&mut stack, &mut root, Value::String(text)),
                }
            }
            TokenKind::Number | TokenKind::True | TokenKind::False | TokenKind::Null => {
                store(&mut stack, &mut root, scalar(&token));
            }
        }

        if stack.is_empty() {
            if let Some(value) = root.pop() {
                // consume any trailing whitespace when this was the last token
                let consumed = if lexer.next().is_some() {
                    token.end()
                } else {
                    input.len()
                };
                return Decoded::Value(value, consumed);
            }
        }
    }

    Decoded::Incomplete
}

/// Store a finished value into the innermost open container, or into the
/// synthetic root when no container is open.
fn store(stack: &mut [Frame], root: &mut Vec<Value>, value: Value) {
    match stack.last_mut() {
        Some(frame) => frame.store(value),
        None => root.push(value),
    }
}

/// Decode a non-string scalar token into its value.
fn scalar(token: &Token<'_>) -> Value {
    match token.kind {
        TokenKind::True => Value::Bool(true),
        TokenKind::False => Value::Bool(false),
        TokenKind::Number => parse_number(token.text),
        _ => Value::Null,
    }
}

/// Parse JSON number text as a double. Text the lexer let through that does
/// not survive `f64` parsing, or that lands outside the finite range, maps
/// to null.
fn parse_number(text: &str) -> Value {
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

/// Decode the escape sequences of a raw string literal body.
///
/// Recognizes the short escapes `\" \/ \\ \b \f \n \r \t` and `\uXXXX`
/// including surrogate pairs. An unknown escape keeps its character; a
/// malformed or unpaired `\u` escape decodes to U+FFFD.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('/') => out.push('/'),
            Some('\\') => out.push('\\'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => out.push(unicode_escape(&mut chars)),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Decode the four hex digits after `\u`, combining a high surrogate with a
/// following `\uXXXX` low surrogate when present.
fn unicode_escape(chars: &mut std::str::Chars<'_>) -> char {
    let Some(first) = hex4(chars) else {
        return char::REPLACEMENT_CHARACTER;
    };

    if (0xD800..=0xDBFF).contains(&first) {
        // high surrogate: pairs only with an immediately following \uDC00..\uDFFF
        let mut ahead = chars.clone();
        if ahead.next() == Some('\\') && ahead.next() == Some('u') {
            if let Some(second) = hex4(&mut ahead) {
                if (0xDC00..=0xDFFF).contains(&second) {
                    *chars = ahead;
                    let combined = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
                    return char::from_u32(combined)
                        .unwrap_or(char::REPLACEMENT_CHARACTER);
                }
            }
        }
        return char::REPLACEMENT_CHARACTER;
    }

    // lone low surrogates fall out of from_u32 as None
    char::from_u32(first).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Read exactly four hex digits into a code unit.
fn hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut code = 0u32;
    for _ in 0..4 {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete(input: &str) -> (Value, usize) {
        match decode_value(input) {
            Decoded::Value(value, consumed) => (value, consumed),
            Decoded::Incomplete => panic!("expected a complete value for {input:?}"),
        }
    }

    #[test]
    fn object_consumes_whole_input() {
        let (value, consumed) = complete(r#"{"name": "drip", "n": 3}"#);
        assert_eq!(value, json!({"name": "drip", "n": 3.0}));
        assert_eq!(consumed, 24);
    }

    #[test]
    fn nested_containers() {
        let (value, _) = complete(r#"{"a": [1, {"b": [true, null]}]}"#);
        assert_eq!(value, json!({"a": [1.0, {"b": [true, null]}]}));
    }

    #[test]
    fn every_strict_prefix_is_incomplete() {
        let doc = r#"{"a": [1, 2], "b": "xy"}"#;
        for end in 0..doc.len() {
            assert_eq!(
                decode_value(&doc[..end]),
                Decoded::Incomplete,
                "prefix {:?}",
                &doc[..end]
            );
        }
        assert!(matches!(decode_value(doc), Decoded::Value(_, 24)));
    }

    #[test]
    fn top_level_scalars() {
        assert_eq!(complete("42").0, json!(42.0));
        assert_eq!(complete(r#""abc""#).0, json!("abc"));
        assert_eq!(complete("true").0, json!(true));
        assert_eq!(complete("null").0, json!(null));
    }

    #[test]
    fn stops_at_first_document() {
        let input = r#"{"a":1}{"b":2}"#;
        let (value, consumed) = complete(input);
        assert_eq!(value, json!({"a": 1.0}));
        assert_eq!(consumed, 7);
    }

    #[test]
    fn trailing_whitespace_consumed_with_last_token() {
        let (_, consumed) = complete("[1, 2]  \n");
        assert_eq!(consumed, 9);
        // but not when another token follows
        let (_, consumed) = complete("[1, 2]  [3]");
        assert_eq!(consumed, 6);
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        let (value, _) = complete(r#"{"k": 1, "k": 2}"#);
        assert_eq!(value, json!({"k": 2.0}));
    }

    #[test]
    fn key_order_is_preserved() {
        let (value, _) = complete(r#"{"z": 1, "a": 2, "m": 3}"#);
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn escape_decoding() {
        let (value, _) = complete(r#""line\none\ttab \"q\" \\ \/ A""#);
        assert_eq!(value, json!("line\none\ttab \"q\" \\ / A"));
    }

    #[test]
    fn surrogate_pairs_combine() {
        let (value, _) = complete(r#""\ud83d\ude00""#);
        assert_eq!(value, json!("\u{1F600}"));
        // unpaired high surrogate degrades to the replacement character
        let (value, _) = complete(r#""\ud83d x""#);
        assert_eq!(value, json!("\u{FFFD} x"));
    }

    #[test]
    fn out_of_range_number_is_null() {
        let (value, _) = complete("[1e999]");
        assert_eq!(value, json!([null]));
    }

    #[test]
    fn stray_closers_are_dropped() {
        let (value, _) = complete("]} 42");
        assert_eq!(value, json!(42.0));
    }

    #[test]
    fn keyless_scalar_in_object_is_dropped() {
        // malformed: numbers cannot be keys, so both scalars have no home
        let (value, _) = complete("{1: 2}");
        assert_eq!(value, json!({}));
    }

    #[test]
    fn unterminated_string_is_incomplete() {
        assert_eq!(decode_value(r#"{"msg": "half"#), Decoded::Incomplete);
        assert_eq!(decode_value(r#""half"#), Decoded::Incomplete);
    }
}
