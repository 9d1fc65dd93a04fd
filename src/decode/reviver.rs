/*!
# Reviver Walk

Optional post-decode transform pass: a depth-first, post-order walk over a
freshly decoded value in which a caller-supplied closure may replace or
delete every node, the root included.

Children are visited — and already replaced — before their parent is
presented, so the reviver always sees fully revived substructure. The walk
starts from a synthetic holder `{"": value}`, which is why the root is
revived once under the empty key, mirroring how text-JSON revivers behave.
*/
use serde_json::{Map, Value};

use crate::decode::{Decoded, decode_value};

/// Walk `value` bottom-up, offering every node to `reviver` as
/// `(key, value)`.
///
/// `Some(replacement)` substitutes the node; `None` deletes it — a deleted
/// object key is absent from the result, a deleted array element leaves a
/// null in its place (the JSON rendering of a hole), and `None` for the
/// root makes the whole result `None`. Array elements are presented under
/// their decimal index as the key.
///
/// Panics raised by the reviver propagate to the caller unchanged.
pub fn revive<F>(value: Value, reviver: &mut F) -> Option<Value>
where
    F: FnMut(&str, Value) -> Option<Value>,
{
    walk("", value, reviver)
}

/// Decode one value from `input` and revive it before returning.
///
/// A reviver that deletes the root decodes to null.
pub fn decode_value_with<F>(input: &str, reviver: &mut F) -> Decoded
where
    F: FnMut(&str, Value) -> Option<Value>,
{
    match decode_value(input) {
        Decoded::Value(value, consumed) => {
            let revived = revive(value, reviver).unwrap_or(Value::Null);
            Decoded::Value(revived, consumed)
        }
        Decoded::Incomplete => Decoded::Incomplete,
    }
}

/// Recursive step: rebuild containers from revived children, then offer
/// the rebuilt node itself.
fn walk<F>(key: &str, value: Value, reviver: &mut F) -> Option<Value>
where
    F: FnMut(&str, Value) -> Option<Value>,
{
    let value = match value {
        Value::Object(entries) => {
            let mut revived = Map::new();
            for (k, v) in entries {
                if let Some(kept) = walk(&k, v, reviver) {
                    revived.insert(k, kept);
                }
            }
            Value::Object(revived)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| {
                    walk(&i.to_string(), v, reviver).unwrap_or(Value::Null)
                })
                .collect(),
        ),
        leaf => leaf,
    };
    reviver(key, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_reviver_changes_nothing() {
        let value = json!({"a": [1, {"b": "c"}], "d": null});
        let revived = revive(value.clone(), &mut |_, v| Some(v));
        assert_eq!(revived, Some(value));
    }

    #[test]
    fn deleted_keys_are_absent() {
        let value = json!({"keep": 1, "secret": 2, "nested": {"secret": 3}});
        let revived = revive(value, &mut |key, v| {
            if key == "secret" { None } else { Some(v) }
        })
        .unwrap();
        assert_eq!(revived, json!({"keep": 1, "nested": {}}));
    }

    #[test]
    fn deleted_array_elements_leave_nulls() {
        let value = json!(["a", "drop", "b"]);
        let revived = revive(value, &mut |_, v| {
            if v == json!("drop") { None } else { Some(v) }
        })
        .unwrap();
        assert_eq!(revived, json!(["a", null, "b"]));
    }

    #[test]
    fn replacement_applies_at_the_root() {
        let value = json!({"inner": true});
        let revived = revive(value, &mut |key, v| {
            if key.is_empty() { Some(json!("root")) } else { Some(v) }
        });
        assert_eq!(revived, Some(json!("root")));
    }

    #[test]
    fn deleting_the_root_deletes_everything() {
        assert_eq!(revive(json!([1, 2]), &mut |_, _| None), None);
    }

    #[test]
    fn walk_is_post_order() {
        let value = json!({"parent": {"child": 1}, "sibling": 2});
        let mut order = Vec::new();
        revive(value, &mut |key, v| {
            order.push(key.to_string());
            Some(v)
        });
        assert_eq!(order, vec!["child", "parent", "sibling", ""]);
    }

    #[test]
    fn parent_sees_revived_children() {
        let value = json!({"a": {"n": 1}});
        let revived = revive(value, &mut |key, v| {
            if key == "n" {
                Some(json!(100))
            } else {
                Some(v)
            }
        })
        .unwrap();
        assert_eq!(revived, json!({"a": {"n": 100}}));
    }

    #[test]
    fn array_keys_are_decimal_indices() {
        let mut keys = Vec::new();
        revive(json!(["x", "y"]), &mut |key, v| {
            keys.push(key.to_string());
            Some(v)
        });
        assert_eq!(keys, vec!["0", "1", ""]);
    }

    #[test]
    fn decode_then_revive_prunes_fields() {
        let Decoded::Value(value, consumed) = decode_value_with(
            r#"{"state": {"reported": 1, "noise": 2}}"#,
            &mut |key, v| if key == "noise" { None } else { Some(v) },
        ) else {
            panic!("document is complete");
        };
        assert_eq!(consumed, 38);
        assert_eq!(value, json!({"state": {"reported": 1.0}}));
    }

    #[test]
    fn incomplete_input_skips_the_reviver() {
        let mut calls = 0;
        let outcome = decode_value_with(r#"{"a":"#, &mut |_, v| {
            calls += 1;
            Some(v)
        });
        assert_eq!(outcome, Decoded::Incomplete);
        assert_eq!(calls, 0);
    }
}
