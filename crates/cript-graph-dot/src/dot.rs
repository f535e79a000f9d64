//! DOT format utilities.

use std::fmt::Write;

/// Escape special characters for a double-quoted DOT string.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Quote a DOT identifier. Uids are not guaranteed to be bare identifiers.
pub fn quote_id(input: &str) -> String {
    format!("\"{}\"", escape_label(input))
}

/// Attribute value written into a bracket list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrValue<'a> {
    /// Written as-is, e.g. `style=filled`.
    Bare(&'a str),
    /// Written quoted and escaped, e.g. `label="Project a "`.
    Quoted(&'a str),
}

fn write_attrs(output: &mut String, attrs: &[(&str, AttrValue<'_>)]) {
    output.push('[');
    for (i, (key, value)) in attrs.iter().enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        match value {
            AttrValue::Bare(v) => {
                let _ = write!(output, "{key}={v}");
            }
            AttrValue::Quoted(v) => {
                let _ = write!(output, "{key}=\"{}\"", escape_label(v));
            }
        }
    }
    output.push(']');
}

/// Builder for a flat directed-graph document: one statement per line.
#[derive(Debug)]
pub struct DotBuilder {
    output: String,
}

impl DotBuilder {
    /// Open a `digraph`, or a `strict digraph` which merges parallel edges
    /// when rendered.
    pub fn new(strict: bool) -> Self {
        Self::with_capacity(strict, 4096)
    }

    pub fn with_capacity(strict: bool, capacity: usize) -> Self {
        let mut output = String::with_capacity(capacity);
        if strict {
            output.push_str("strict ");
        }
        output.push_str("digraph {\n");
        Self { output }
    }

    /// Add a node statement keyed by a quoted id.
    pub fn node(&mut self, id: &str, attrs: &[(&str, AttrValue<'_>)]) -> &mut Self {
        self.output.push_str(&quote_id(id));
        if !attrs.is_empty() {
            self.output.push(' ');
            write_attrs(&mut self.output, attrs);
        }
        self.output.push_str(";\n");
        self
    }

    /// Add an edge statement between two quoted ids.
    pub fn edge(&mut self, from: &str, to: &str, attrs: &[(&str, AttrValue<'_>)]) -> &mut Self {
        let _ = write!(self.output, "{} -> {}", quote_id(from), quote_id(to));
        if !attrs.is_empty() {
            self.output.push(' ');
            write_attrs(&mut self.output, attrs);
        }
        self.output.push_str(";\n");
        self
    }

    /// Finish building and return the DOT string.
    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}
