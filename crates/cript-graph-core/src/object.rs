//! Capability interface the graph builder and DOT encoder need from a domain object.
//!
//! The domain model itself lives outside this crate. Anything that can report
//! an identity, a type tag, its declared fields in order, and answer attribute
//! probes can be turned into a [`DirectedGraph`](crate::DirectedGraph).

/// Value of one declared field, as seen by the graph builder.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<N> {
    /// A single nested object; `None` when declared but unset.
    Reference(Option<N>),
    /// An ordered sequence of nested objects.
    ReferenceList(Vec<N>),
    /// Not an object reference; ignored during discovery.
    Scalar,
}

impl<N> FieldValue<N> {
    /// Normalize to an ordered sequence of referenced objects.
    ///
    /// A single reference becomes a one-element sequence, a list is kept
    /// as-is, and scalars or unset references yield nothing.
    pub fn into_references(self) -> Vec<N> {
        match self {
            FieldValue::Reference(Some(node)) => vec![node],
            FieldValue::Reference(None) | FieldValue::Scalar => Vec::new(),
            FieldValue::ReferenceList(nodes) => nodes,
        }
    }

    pub fn is_relationship(&self) -> bool {
        !matches!(self, FieldValue::Scalar)
    }
}

/// A typed domain object, implemented on a cheap-to-clone handle.
///
/// Cloning a handle must not copy the object: the graph keeps handles, so
/// later edits to scalar values stay visible through it.
pub trait DomainObject: Clone {
    /// Stable identity key. Two handles with the same uid are the same object.
    fn uid(&self) -> String;

    /// Type tag, e.g. `"Material"`.
    fn node_type(&self) -> String;

    /// All declared fields in declaration order.
    fn fields(&self) -> Vec<(String, FieldValue<Self>)>;

    /// Read a named attribute as text.
    ///
    /// Returns `None` only when the type does not declare the attribute;
    /// a declared but empty attribute yields `Some` (possibly empty).
    fn attribute(&self, name: &str) -> Option<String>;
}
