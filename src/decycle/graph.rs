/*!
# Shared-Graph Value Model

A JSON-shaped value type whose containers are reference-counted and
interior-mutable, so one composite can legitimately appear in several
places — shared branches, or outright cycles. This is the input side of
[`decycle`](crate::decycle::decycle); plain decoded trees can be lifted
into it with `From<serde_json::Value>`.

Composite identity is the `Rc` allocation: cloning a `GraphValue` clones
handles, so the clone *is* the same array or object. Equality is therefore
deliberately not implemented — comparing graphs that may share or cycle by
value would be misleading, and by identity surprising. The same goes for
`Debug`: a derived traversal would never terminate on a cycle.
*/
use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

/// Insertion-ordered object entries.
pub type Entries = Vec<(String, GraphValue)>;

/// A JSON-shaped value graph node.
#[derive(Clone)]
pub enum GraphValue {
    /// Null leaf
    Null,
    /// Boolean leaf
    Bool(bool),
    /// Double-precision numeric leaf
    Number(f64),
    /// String leaf
    Str(String),
    /// Array composite; clones share the allocation
    Array(Rc<RefCell<Vec<GraphValue>>>),
    /// Object composite with insertion-ordered entries; clones share the
    /// allocation
    Object(Rc<RefCell<Entries>>),
}

impl GraphValue {
    /// Create an empty array composite.
    #[must_use]
    pub fn array() -> Self {
        Self::Array(Rc::new(RefCell::new(Vec::new())))
    }

    /// Create an empty object composite.
    #[must_use]
    pub fn object() -> Self {
        Self::Object(Rc::new(RefCell::new(Vec::new())))
    }

    /// Append `item` to an array composite. A no-op on any other variant.
    pub fn push(&self, item: Self) {
        if let Self::Array(items) = self {
            items.borrow_mut().push(item);
        }
    }

    /// Set `key` in an object composite, replacing an existing entry in
    /// place (insertion order is kept). A no-op on any other variant.
    pub fn insert(&self, key: &str, value: Self) {
        if let Self::Object(entries) = self {
            let mut entries = entries.borrow_mut();
            match entries.iter_mut().find(|(k, _)| k == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key.to_string(), value)),
            }
        }
    }
}

impl From<Value> for GraphValue {
    /// Lift a decoded tree into a (necessarily acyclic) graph. Numbers that
    /// have no `f64` image become null.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::String(s) => Self::Str(s),
            Value::Array(items) => {
                let converted = items.into_iter().map(Self::from).collect();
                Self::Array(Rc::new(RefCell::new(converted)))
            }
            Value::Object(entries) => {
                let converted =
                    entries.into_iter().map(|(k, v)| (k, Self::from(v))).collect();
                Self::Object(Rc::new(RefCell::new(converted)))
            }
        }
    }
}
