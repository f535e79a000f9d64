pub mod builder;
pub mod graph;
pub mod model;
pub mod object;
pub mod schema;

pub use cript_graph_error::{Error, ErrorKind, Result};

pub use builder::{GraphBuilder, build_graph};
pub use graph::{DirectedGraph, Edge, VertexId};
pub use model::Node;
pub use object::{DomainObject, FieldValue};
pub use schema::{FieldDecl, FieldKind, SchemaRegistry, TypeSchema};
