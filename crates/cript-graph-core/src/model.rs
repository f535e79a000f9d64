//! In-memory, schema-typed domain objects.
//!
//! [`Node`] is a shared handle: clones point at the same record, and field
//! values can be edited after a graph has been built from it. Structure is
//! validated against the node type's [`TypeSchema`] on every write.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use uuid::Uuid;

use crate::object::{DomainObject, FieldValue};
use crate::schema::{FieldKind, SchemaRegistry, TypeSchema};
use crate::{Error, Result};

#[derive(Clone)]
enum Value {
    Text(String),
    Number(f64),
    Reference(Node),
    References(Vec<Node>),
}

struct NodeInner {
    uid: String,
    schema: Rc<TypeSchema>,
    values: RefCell<HashMap<String, Value>>,
}

impl NodeInner {
    /// Move out every referenced node, leaving this record without children.
    fn take_children(&mut self, into: &mut Vec<Node>) {
        for (_, value) in self.values.get_mut().drain() {
            match value {
                Value::Reference(node) => into.push(node),
                Value::References(nodes) => into.extend(nodes),
                Value::Text(_) | Value::Number(_) => {}
            }
        }
    }
}

// Frees owned descendants from a work-list so long reference chains do not
// recurse once per link.
impl Drop for NodeInner {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(node) = pending.pop() {
            if let Ok(mut inner) = Rc::try_unwrap(node.0) {
                inner.take_children(&mut pending);
            }
        }
    }
}

/// Shared handle to one domain object.
///
/// Equality and hashing use the `uid`. Reference cycles between nodes keep
/// each other alive until one side is [`cleared`](Node::clear).
#[derive(Clone)]
pub struct Node(Rc<NodeInner>);

impl Node {
    /// Create a node of a registered type with a fresh UUID v4 uid.
    pub fn new(registry: &SchemaRegistry, node_type: &str) -> Result<Self> {
        Self::with_uid(registry, node_type, Uuid::new_v4().to_string())
    }

    /// Create a node with a caller-chosen uid.
    pub fn with_uid(
        registry: &SchemaRegistry,
        node_type: &str,
        uid: impl Into<String>,
    ) -> Result<Self> {
        let schema = registry
            .get(node_type)
            .cloned()
            .ok_or_else(|| Error::unknown_node_type(node_type).with_operation("node::new"))?;

        let uid = uid.into();
        if uid.is_empty() {
            return Err(Error::invalid_input("uid must not be empty")
                .with_operation("node::new")
                .with_context("node_type", node_type));
        }

        Ok(Node(Rc::new(NodeInner {
            uid,
            schema,
            values: RefCell::new(HashMap::new()),
        })))
    }

    pub fn schema(&self) -> &TypeSchema {
        &self.0.schema
    }

    /// Whether both handles point at the same record.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn set_text(&self, field: &str, value: impl Into<String>) -> Result<&Self> {
        self.expect_kind(field, FieldKind::Scalar)?;
        self.store(field, Value::Text(value.into()));
        Ok(self)
    }

    pub fn set_number(&self, field: &str, value: f64) -> Result<&Self> {
        self.expect_kind(field, FieldKind::Scalar)?;
        self.store(field, Value::Number(value));
        Ok(self)
    }

    /// Point a single-reference field at `target`.
    pub fn set_reference(&self, field: &str, target: &Node) -> Result<&Self> {
        self.expect_kind(field, FieldKind::Reference)?;
        self.store(field, Value::Reference(target.clone()));
        Ok(self)
    }

    /// Append `target` to a reference-list field. Repeats are kept.
    pub fn push_reference(&self, field: &str, target: &Node) -> Result<&Self> {
        self.extend_references(field, std::slice::from_ref(target))
    }

    pub fn extend_references(&self, field: &str, targets: &[Node]) -> Result<&Self> {
        self.expect_kind(field, FieldKind::ReferenceList)?;
        let mut values = self.0.values.borrow_mut();
        let entry = values
            .entry(field.to_string())
            .or_insert_with(|| Value::References(Vec::new()));
        if let Value::References(list) = entry {
            list.extend(targets.iter().cloned());
        }
        Ok(self)
    }

    /// Reset a declared field to unset.
    pub fn clear(&self, field: &str) -> Result<&Self> {
        self.declared(field)?;
        self.0.values.borrow_mut().remove(field);
        Ok(self)
    }

    /// Referenced nodes of a relationship field, in order.
    pub fn references(&self, field: &str) -> Vec<Node> {
        match self.0.values.borrow().get(field) {
            Some(Value::Reference(node)) => vec![node.clone()],
            Some(Value::References(nodes)) => nodes.clone(),
            _ => Vec::new(),
        }
    }

    fn declared(&self, field: &str) -> Result<FieldKind> {
        self.0
            .schema
            .field(field)
            .map(|decl| decl.kind)
            .ok_or_else(|| {
                Error::invalid_input(format!(
                    "'{}' is not a field of {}",
                    field,
                    self.0.schema.node_type()
                ))
                .with_operation("node::set")
                .with_context("uid", self.0.uid.clone())
            })
    }

    fn expect_kind(&self, field: &str, expected: FieldKind) -> Result<()> {
        let kind = self.declared(field)?;
        if kind != expected {
            return Err(Error::invalid_input(format!(
                "field '{}' holds {}, not {}",
                field, kind, expected
            ))
            .with_operation("node::set")
            .with_context("uid", self.0.uid.clone())
            .with_context("node_type", self.0.schema.node_type().to_string()));
        }
        Ok(())
    }

    fn store(&self, field: &str, value: Value) {
        self.0.values.borrow_mut().insert(field.to_string(), value);
    }
}

impl DomainObject for Node {
    fn uid(&self) -> String {
        self.0.uid.clone()
    }

    fn node_type(&self) -> String {
        self.0.schema.node_type().to_string()
    }

    fn fields(&self) -> Vec<(String, FieldValue<Self>)> {
        let values = self.0.values.borrow();
        self.0
            .schema
            .fields()
            .iter()
            .map(|decl| {
                let value = match decl.kind {
                    FieldKind::Scalar => FieldValue::Scalar,
                    FieldKind::Reference => match values.get(&decl.name) {
                        Some(Value::Reference(node)) => FieldValue::Reference(Some(node.clone())),
                        _ => FieldValue::Reference(None),
                    },
                    FieldKind::ReferenceList => match values.get(&decl.name) {
                        Some(Value::References(nodes)) => FieldValue::ReferenceList(nodes.clone()),
                        _ => FieldValue::ReferenceList(Vec::new()),
                    },
                };
                (decl.name.clone(), value)
            })
            .collect()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "uid" => return Some(self.uid()),
            "node_type" => return Some(self.node_type()),
            _ => {}
        }

        self.0.schema.field(name)?;
        let text = match self.0.values.borrow().get(name) {
            None => String::new(),
            Some(Value::Text(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Reference(node)) => node.0.uid.clone(),
            Some(Value::References(nodes)) => nodes
                .iter()
                .map(|n| n.0.uid.as_str())
                .collect::<Vec<_>>()
                .join(","),
        };
        Some(text)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.0.uid == other.0.uid
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.uid.hash(state);
    }
}

// Shallow on purpose: printing nested values would recurse through cycles.
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.0.schema.node_type(), self.0.uid)
    }
}
