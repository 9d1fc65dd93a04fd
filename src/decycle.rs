/*!
# Decycle

Converts a possibly-cyclic [`GraphValue`] graph into an acyclic
`serde_json::Value` tree that any text-JSON encoder can serialize.

The walk memoizes every composite it has materialized, keyed by identity
(the `Rc` allocation address), mapped to the JSONPath-style locator of its
first occurrence — `$` at the root, `[0]` for array children, `["key"]`
with a JSON-quoted key for object children. Any later occurrence of the
same composite, including a genuine cycle back to an ancestor, is replaced
by a [`RefMarker`] carrying that first-seen path instead of being descended
into again, so the walk terminates regardless of cycle depth and a shared
branch is materialized exactly once.

```rust
use jsondrip::decycle::{GraphValue, decycle};

// a = []; a[0] = a
let a = GraphValue::array();
a.push(a.clone());

let tree = decycle(&a);
assert_eq!(serde_json::to_string(&tree).unwrap(), r#"[{"$ref":"$"}]"#);
```
*/

pub mod graph;

// Re-exports
pub use graph::GraphValue;

use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde_json::{Map, Value};

/// Stand-in emitted where a composite value occurs a second time by
/// identity: `{"$ref": "<path of first occurrence>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefMarker {
    /// JSONPath-style locator of the first occurrence.
    #[serde(rename = "$ref")]
    pub target: String,
}

/// Identity-keyed memo of composites already materialized, mapped to the
/// path of their first occurrence. Lives for one decycle call.
type Memo = HashMap<usize, String>;

/// Produce a deep, acyclic copy of `root`.
#[must_use]
pub fn decycle(root: &GraphValue) -> Value {
    decycle_with(root, Clone::clone)
}

/// Produce a deep, acyclic copy of `root`, passing every node — repeats
/// included — through `replacer` before the identity check.
///
/// The identity that is memoized is the one `replacer` returns, so a
/// replacer that preserves handles (e.g. the default `Clone::clone`) keeps
/// sharing intact, while one that fabricates a fresh composite on every
/// call would defeat cycle detection and must not be used on cyclic input.
pub fn decycle_with<F>(root: &GraphValue, mut replacer: F) -> Value
where
    F: FnMut(&GraphValue) -> GraphValue,
{
    let mut memo = Memo::new();
    descend(root, "$", &mut memo, &mut replacer)
}

/// Recursive step: transform, consult the memo, then materialize.
fn descend<F>(
    node: &GraphValue,
    path: &str,
    memo: &mut Memo,
    replacer: &mut F,
) -> Value
where
    F: FnMut(&GraphValue) -> GraphValue,
{
    match &replacer(node) {
        GraphValue::Null => Value::Null,
        GraphValue::Bool(b) => Value::Bool(*b),
        GraphValue::Number(n) => serde_json::Number::from_f64(*n)
            .map_or(Value::Null, Value::Number),
        GraphValue::Str(s) => Value::String(s.clone()),
        GraphValue::Array(items) => {
            let address = Rc::as_ptr(items) as usize;
            if let Some(first) = memo.get(&address) {
                return marker(first);
            }
            memo.insert(address, path.to_string());

            let items = items.borrow();
            Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, child)| {
                        descend(child, &format!("{path}[{i}]"), memo, replacer)
                    })
                    .collect(),
            )
        }
        GraphValue::Object(entries) => {
            let address = Rc::as_ptr(entries) as usize;
            if let Some(first) = memo.get(&address) {
                return marker(first);
            }
            memo.insert(address, path.to_string());

            let entries = entries.borrow();
            let mut materialized = Map::new();
            for (key, child) in entries.iter() {
                // JSON-quote the key so any key is a valid path segment
                let quoted = serde_json::to_string(key)
                    .expect("key serialization cannot fail");
                let value =
                    descend(child, &format!("{path}[{quoted}]"), memo, replacer);
                materialized.insert(key.clone(), value);
            }
            Value::Object(materialized)
        }
    }
}

/// Build the `{"$ref": path}` stand-in value.
fn marker(path: &str) -> Value {
    serde_json::to_value(RefMarker {
        target: path.to_string(),
    })
    .expect("marker serialization cannot fail")
}
