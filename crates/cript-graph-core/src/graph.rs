use std::collections::HashMap;
use std::fmt;

use crate::object::DomainObject;

/// Dense index of a vertex inside one [`DirectedGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(u32);

impl VertexId {
    pub fn new(id: u32) -> Self {
        VertexId(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A directed edge labeled with the field name that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: VertexId,
    pub target: VertexId,
    pub attribute: String,
}

/// Snapshot of the object graph reachable from a root.
///
/// Vertices are domain object handles deduplicated by `uid`, kept in
/// discovery order. Edges are kept in discovery order too and are never
/// merged: the same endpoints may appear under several labels, or several
/// times under one label when a list repeats an entry.
///
/// The structure does not follow later edits to the objects, but attribute
/// values read through the stored handles do.
#[derive(Debug, Clone)]
pub struct DirectedGraph<N> {
    vertices: Vec<N>,
    uids: Vec<String>,
    index: HashMap<String, VertexId>,
    edges: Vec<Edge>,
}

impl<N> Default for DirectedGraph<N> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            uids: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        }
    }
}

impl<N: DomainObject> DirectedGraph<N> {
    /// Insert a vertex keyed by `uid`, or return the existing id.
    pub(crate) fn insert_vertex(&mut self, uid: String, node: N) -> (VertexId, bool) {
        if let Some(&id) = self.index.get(&uid) {
            return (id, false);
        }
        let id = VertexId::new(self.vertices.len() as u32);
        self.vertices.push(node);
        self.uids.push(uid.clone());
        self.index.insert(uid, id);
        (id, true)
    }

    pub(crate) fn push_edge(&mut self, source: VertexId, target: VertexId, attribute: String) {
        self.edges.push(Edge {
            source,
            target,
            attribute,
        });
    }
}

impl<N> DirectedGraph<N> {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertex discovery started from, if any.
    pub fn root(&self) -> Option<VertexId> {
        (!self.vertices.is_empty()).then(|| VertexId::new(0))
    }

    pub fn vertex(&self, id: VertexId) -> Option<&N> {
        self.vertices.get(id.index())
    }

    /// The uid the vertex had when it was discovered.
    pub fn uid(&self, id: VertexId) -> Option<&str> {
        self.uids.get(id.index()).map(String::as_str)
    }

    pub fn find(&self, uid: &str) -> Option<VertexId> {
        self.index.get(uid).copied()
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.index.contains_key(uid)
    }

    /// Vertices with their ids, in discovery order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &N)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, node)| (VertexId::new(i as u32), node))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_from(&self, id: VertexId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.source == id)
    }

    pub fn edges_to(&self, id: VertexId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.target == id)
    }

    pub fn edges_labeled<'a>(&'a self, attribute: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.attribute == attribute)
    }

    /// Distinct direct successors, in edge order.
    pub fn successors(&self, id: VertexId) -> Vec<VertexId> {
        let mut out = Vec::new();
        for edge in self.edges_from(id) {
            if !out.contains(&edge.target) {
                out.push(edge.target);
            }
        }
        out
    }

    /// Distinct direct predecessors, in edge order.
    pub fn predecessors(&self, id: VertexId) -> Vec<VertexId> {
        let mut out = Vec::new();
        for edge in self.edges_to(id) {
            if !out.contains(&edge.source) {
                out.push(edge.source);
            }
        }
        out
    }
}
