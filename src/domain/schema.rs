//! JSON Schema `$ref` resolution against an API document
//!
//! Request-body schemas in an API description usually point at shared
//! component schemas through `$ref` nodes. The resolver inlines those targets
//! so the schema can be handed to a generator that has no access to the rest
//! of the document.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// Default recursion limit for reference resolution
pub const DEFAULT_MAX_DEPTH: usize = 10;

// ============================================================================
// Schema Node Classification
// ============================================================================

/// Shape of a schema node as far as resolution is concerned
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaNode<'a> {
    /// `null` / missing schema
    Absent,
    /// `{"$ref": "#/components/schemas/User"}`
    Reference(&'a str),
    /// Node carrying a `properties` mapping
    Object(&'a Map<String, Value>),
    /// Node carrying an `items` schema
    Array(&'a Value),
    /// Anything else
    Leaf,
}

impl<'a> SchemaNode<'a> {
    /// Classify a schema value.
    ///
    /// Precedence follows the resolution rules: a reference wins over
    /// `properties`, which wins over `items`.
    pub fn classify(schema: &'a Value) -> Self {
        let Some(node) = schema.as_object() else {
            return if schema.is_null() { Self::Absent } else { Self::Leaf };
        };

        if let Some(reference) = node
            .get("$ref")
            .and_then(|v| v.as_str())
            .filter(|r| !r.is_empty())
        {
            return Self::Reference(reference);
        }

        if let Some(properties) = node.get("properties").and_then(|v| v.as_object()) {
            return Self::Object(properties);
        }

        match node.get("items") {
            Some(items) if is_present(items) => Self::Array(items),
            _ => Self::Leaf,
        }
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Inlines `$ref` nodes up to a fixed recursion depth.
///
/// Resolution never fails: a reference that cannot be followed, or any node
/// past the depth limit, is returned as it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaResolver {
    max_depth: usize,
}

impl Default for SchemaResolver {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SchemaResolver {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Resolve `schema` against `document`, starting at depth 0
    pub fn resolve(&self, schema: &Value, document: &Value) -> Value {
        self.resolve_at(schema, document, 0)
    }

    /// Resolve `schema` as if it was reached at `depth`
    pub fn resolve_at(&self, schema: &Value, document: &Value, depth: usize) -> Value {
        if depth > self.max_depth {
            return schema.clone();
        }

        match SchemaNode::classify(schema) {
            SchemaNode::Absent | SchemaNode::Leaf => schema.clone(),
            SchemaNode::Reference(reference) => match lookup_reference(document, reference) {
                Some(target) => self.resolve_at(target, document, depth + 1),
                None => schema.clone(),
            },
            SchemaNode::Object(properties) => {
                let resolved: Map<String, Value> = properties
                    .iter()
                    .map(|(name, prop)| (name.clone(), self.resolve_at(prop, document, depth + 1)))
                    .collect();
                with_field(schema, "properties", Value::Object(resolved))
            }
            SchemaNode::Array(items) => {
                with_field(schema, "items", self.resolve_at(items, document, depth + 1))
            }
        }
    }

    /// Check whether any `$ref` node is left anywhere in `value`
    pub fn contains_reference(value: &Value) -> bool {
        match value {
            Value::Object(map) => {
                map.get("$ref").is_some_and(|r| r.is_string())
                    || map.values().any(Self::contains_reference)
            }
            Value::Array(items) => items.iter().any(Self::contains_reference),
            _ => false,
        }
    }
}

/// Resolve with the default depth limit, starting at `depth`
pub fn resolve_schema(schema: &Value, document: &Value, depth: usize) -> Value {
    SchemaResolver::default().resolve_at(schema, document, depth)
}

/// Follow a slash-delimited reference into `document`.
///
/// The first segment (`#`) is skipped. A segment that leads to a missing or
/// falsy value (`null`, `false`, `0`, `""`) aborts the walk.
pub fn lookup_reference<'a>(document: &'a Value, reference: &str) -> Option<&'a Value> {
    reference.split('/').skip(1).try_fold(document, |node, segment| {
        let segment = decode_segment(segment);
        let next = match node {
            Value::Object(map) => map.get(segment.as_ref()),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }?;
        is_present(next).then_some(next)
    })
}

/// Undo JSON Pointer escaping (`~1` → `/`, `~0` → `~`)
fn decode_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') {
        Cow::Owned(segment.replace("~1", "/").replace("~0", "~"))
    } else {
        Cow::Borrowed(segment)
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Shallow copy of `schema` with `key` replaced
fn with_field(schema: &Value, key: &str, value: Value) -> Value {
    let mut node = schema.clone();
    if let Some(map) = node.as_object_mut() {
        map.insert(key.to_string(), value);
    }
    node
}

// ============================================================================
// Tests
// ============================================================================
