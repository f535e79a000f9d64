//! Turn a CRIPT object tree into a directed graph, and that graph into DOT.
//!
//! ```
//! use cript_graph::{Node, SchemaRegistry, to_dot};
//!
//! let registry = SchemaRegistry::cript();
//! let project = Node::new(&registry, "Project")?;
//! let collection = Node::new(&registry, "Collection")?;
//! project.set_text("name", "demo")?;
//! project.push_reference("collection", &collection)?;
//!
//! let dot = to_dot(&project)?;
//! assert!(dot.contains("[label=\"collection\"]"));
//! # Ok::<(), cript_graph::Error>(())
//! ```

pub use cript_graph_core::{
    DirectedGraph, DomainObject, Edge, FieldDecl, FieldKind, FieldValue, GraphBuilder, Node,
    SchemaRegistry, TypeSchema, VertexId, build_graph,
};
pub use cript_graph_dot::{
    ColorTable, DEFAULT_LABEL_FIELDS, EncodeOptions, HexColor, encode, encode_with_options,
    node_label,
};
pub use cript_graph_error::{Error, ErrorKind, Result};

/// Build the graph reachable from `root` and encode it with `options`.
pub fn render_dot<N: DomainObject>(root: &N, options: &EncodeOptions) -> Result<String> {
    let graph = build_graph(root)?;
    tracing::debug!("rendering {} rooted at {}", root.node_type(), root.uid());
    encode_with_options(&graph, options)
}

/// Build and encode with the default label fields and CRIPT palette.
pub fn to_dot<N: DomainObject>(root: &N) -> Result<String> {
    render_dot(root, &EncodeOptions::default())
}
