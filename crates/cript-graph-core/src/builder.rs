//! Graph builder: depth-first discovery of every object reachable from a root.
//!
//! Discovery order matches the natural recursive formulation:
//!
//! 1. skip an object that is already a vertex,
//! 2. otherwise add it as a vertex,
//! 3. walk its relationship fields in declaration order,
//! 4. for each referenced child, finish the child's own discovery first and
//!    only then record the edge `parent -> child` labeled with the field name.
//!
//! The walk runs on an explicit stack of frames so deep object chains cannot
//! overflow the call stack.

use std::vec;

use crate::graph::{DirectedGraph, VertexId};
use crate::object::DomainObject;
use crate::{Error, Result};

/// One object whose children are still being walked.
struct Frame<N> {
    vertex: VertexId,
    children: vec::IntoIter<(String, N)>,
    /// Edge recorded once this frame's subtree is complete.
    on_exit: Option<(VertexId, String)>,
}

/// Builds one [`DirectedGraph`] per call. Owns the uid index for the
/// duration of the build.
#[derive(Debug)]
pub struct GraphBuilder<N> {
    graph: DirectedGraph<N>,
}

impl<N: DomainObject> GraphBuilder<N> {
    pub fn new() -> Self {
        Self {
            graph: DirectedGraph::default(),
        }
    }

    /// Discover everything reachable from `root` and return the graph.
    ///
    /// Fails with `InvalidInput` when the root, or any object reached from it,
    /// has an empty uid; no partial graph is returned.
    #[tracing::instrument(skip_all)]
    pub fn build(mut self, root: &N) -> Result<DirectedGraph<N>> {
        let Some(root_frame) = self.enter(root, None)? else {
            return Ok(self.graph);
        };

        let mut stack = vec![root_frame];
        while let Some(frame) = stack.last_mut() {
            let parent = frame.vertex;
            let Some((field, child)) = frame.children.next() else {
                if let Some(frame) = stack.pop()
                    && let Some((source, field)) = frame.on_exit
                {
                    self.graph.push_edge(source, frame.vertex, field);
                }
                continue;
            };

            let child_uid = identity(&child)?;
            match self.graph.find(&child_uid) {
                Some(existing) => {
                    tracing::trace!("edge {} -[{}]-> {} (seen)", parent, field, existing);
                    self.graph.push_edge(parent, existing, field);
                }
                None => {
                    if let Some(child_frame) = self.enter(&child, Some((parent, field)))? {
                        stack.push(child_frame);
                    }
                }
            }
        }

        tracing::debug!(
            "built graph with {} vertices and {} edges",
            self.graph.vertex_count(),
            self.graph.edge_count()
        );
        Ok(self.graph)
    }

    /// Add `node` as a vertex and open a frame over its children.
    ///
    /// Returns `None` if the node was already present.
    fn enter(&mut self, node: &N, on_exit: Option<(VertexId, String)>) -> Result<Option<Frame<N>>> {
        let uid = identity(node)?;
        let (vertex, inserted) = self.graph.insert_vertex(uid, node.clone());
        if !inserted {
            return Ok(None);
        }
        tracing::trace!("vertex {} {} {}", vertex, node.node_type(), node.uid());

        let children: Vec<(String, N)> = node
            .fields()
            .into_iter()
            .filter(|(_, value)| value.is_relationship())
            .flat_map(|(field, value)| {
                value
                    .into_references()
                    .into_iter()
                    .map(move |child| (field.clone(), child))
            })
            .collect();

        Ok(Some(Frame {
            vertex,
            children: children.into_iter(),
            on_exit,
        }))
    }
}

impl<N: DomainObject> Default for GraphBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

fn identity<N: DomainObject>(node: &N) -> Result<String> {
    let uid = node.uid();
    if uid.is_empty() {
        return Err(Error::invalid_input("object has an empty uid")
            .with_operation("builder::build_graph")
            .with_context("node_type", node.node_type()));
    }
    Ok(uid)
}

/// Build the directed graph of everything reachable from `root`.
///
/// Edges carry the name of the relationship field that produced them.
pub fn build_graph<N: DomainObject>(root: &N) -> Result<DirectedGraph<N>> {
    GraphBuilder::new().build(root)
}
