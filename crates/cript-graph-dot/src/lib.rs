//! DOT encoding of a [`DirectedGraph`] for visualization with Graphviz.
//!
//! Every vertex becomes one node statement keyed by its quoted `uid`, with a
//! label assembled from configurable attributes and a fill color chosen by
//! node type. Dark fills get a white font. Every edge becomes one edge
//! statement labeled with the relationship field that produced it.
//!
//! # Module Structure
//!
//! - [`color`]: color table and HSP brightness rule
//! - [`dot`]: DOT statement writer
//! - [`options`]: encoding options, loadable from TOML

pub mod color;
pub mod dot;
pub mod options;

use cript_graph_core::{DirectedGraph, DomainObject, Result};

pub use color::{ColorTable, DARK_THRESHOLD, HexColor};
pub use dot::{AttrValue, DotBuilder};
pub use options::{DEFAULT_LABEL_FIELDS, EncodeOptions};

// ============================================================================
// Public API
// ============================================================================

/// Encode `graph` as DOT, probing `label_fields` on each vertex for its label.
///
/// Uses the built-in CRIPT palette and a plain `digraph`.
pub fn encode<N, S>(graph: &DirectedGraph<N>, label_fields: &[S]) -> Result<String>
where
    N: DomainObject,
    S: AsRef<str>,
{
    render(graph, label_fields, false, &ColorTable::cript())
}

/// Encode `graph` as DOT with explicit options.
pub fn encode_with_options<N: DomainObject>(
    graph: &DirectedGraph<N>,
    options: &EncodeOptions,
) -> Result<String> {
    render(
        graph,
        options.label_fields.as_slice(),
        options.strict,
        &options.colors,
    )
}

/// Label text for one object: each present attribute followed by a space.
///
/// Attributes the object does not declare are skipped.
pub fn node_label<N: DomainObject, S: AsRef<str>>(node: &N, label_fields: &[S]) -> String {
    let mut label = String::new();
    for name in label_fields {
        if let Some(value) = node.attribute(name.as_ref()) {
            label.push_str(&value);
            label.push(' ');
        }
    }
    label
}

// ============================================================================
// Rendering
// ============================================================================

#[tracing::instrument(skip_all)]
fn render<N, S>(
    graph: &DirectedGraph<N>,
    label_fields: &[S],
    strict: bool,
    colors: &ColorTable,
) -> Result<String>
where
    N: DomainObject,
    S: AsRef<str>,
{
    let estimated_size = graph.vertex_count() * 120 + graph.edge_count() * 80 + 32;
    let mut dot = DotBuilder::with_capacity(strict, estimated_size);

    for (id, node) in graph.vertices() {
        let uid = graph.uid(id).unwrap_or_default();
        let node_type = node.node_type();
        let label = node_label(node, label_fields);

        let fill = colors.lookup(&node_type).map_err(|e| {
            e.with_operation("dot::encode")
                .with_context("uid", uid.to_string())
        })?;

        match fill {
            Some(color) => {
                let fill_color = color.to_string();
                let mut attrs = vec![
                    ("style", AttrValue::Bare("filled")),
                    ("fillcolor", AttrValue::Quoted(&fill_color)),
                ];
                if color.is_dark() {
                    attrs.push(("fontcolor", AttrValue::Bare("white")));
                }
                attrs.push(("label", AttrValue::Quoted(&label)));
                dot.node(uid, &attrs);
            }
            None => {
                tracing::trace!("no fill color for node type {}", node_type);
                dot.node(uid, &[("label", AttrValue::Quoted(&label))]);
            }
        }
    }

    for edge in graph.edges() {
        let from = graph.uid(edge.source).unwrap_or_default();
        let to = graph.uid(edge.target).unwrap_or_default();
        dot.edge(from, to, &[("label", AttrValue::Quoted(&edge.attribute))]);
    }

    tracing::debug!(
        "encoded {} vertices and {} edges as dot",
        graph.vertex_count(),
        graph.edge_count()
    );
    Ok(dot.build())
}
