//! GraphViz `dot` rendering of references.
//!
//! Each reference becomes one record-shaped node whose label shows the
//! authors, the year and, when known, the host publication, separated by `|`
//! so GraphViz draws them as adjacent fields. No edges are emitted.

use serde::{Deserialize, Serialize};

use crate::models::Reference;

/// Global attributes written in the graph preamble
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotStyle {
    /// Node shape
    pub shape: String,

    /// Node font size
    pub font_size: u32,

    /// Whether edges are drawn as splines
    pub splines: bool,

    /// Rank direction (LR, TB, ...)
    pub rank_dir: String,

    /// Node fill color
    pub fill_color: String,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            shape: "record".to_string(),
            font_size: 12,
            splines: true,
            rank_dir: "LR".to_string(),
            fill_color: "white".to_string(),
        }
    }
}

/// A directed graph with one node per reference
#[derive(Debug, Clone, Default)]
pub struct DotDigraph {
    style: DotStyle,
    references: Vec<Reference>,
}

impl DotDigraph {
    /// Create an empty graph with the default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with a custom style
    pub fn with_style(style: DotStyle) -> Self {
        Self {
            style,
            references: Vec::new(),
        }
    }

    /// Append a reference as a node
    pub fn push(&mut self, reference: Reference) {
        self.references.push(reference);
    }

    /// References in node order
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Graph opening line and global attribute statements
    pub fn header(&self) -> String {
        format!(
            "digraph\n{{\n\tnode [shape={}, fontsize={}];\n\
             \tgraph [splines={}];\n\trankdir={};\n\n",
            self.style.shape, self.style.font_size, self.style.splines, self.style.rank_dir
        )
    }

    /// Render the whole graph. The text ends with the closing brace, without a newline.
    pub fn render(&self) -> String {
        let mut out = self.header();
        for reference in &self.references {
            out.push('\t');
            out.push_str(&node_statement(reference, &self.style));
            out.push('\n');
        }
        out.push('}');
        out
    }
}

impl Extend<Reference> for DotDigraph {
    fn extend<T: IntoIterator<Item = Reference>>(&mut self, iter: T) {
        self.references.extend(iter);
    }
}

impl FromIterator<Reference> for DotDigraph {
    fn from_iter<T: IntoIterator<Item = Reference>>(iter: T) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

/// Node statement for one reference, e.g.
/// `r1 [style=filled, fillcolor=white, label="Doe & Smith | 1999 | Proc. Conf. X"];`
pub fn node_statement(reference: &Reference, style: &DotStyle) -> String {
    format!(
        "{} [style=filled, fillcolor={}, label=\"{}\"];",
        reference.id,
        style.fill_color,
        escape_label(&node_label(reference))
    )
}

/// Unescaped label fields joined by " | "
pub fn node_label(reference: &Reference) -> String {
    let mut label = format!("{} | {}", reference.authors_label(), reference.year);
    if let Some(host) = &reference.host {
        label.push_str(" | ");
        label.push_str(&host.title);
    }
    label
}

/// Backslashes first, so escaped quotes are not doubled
fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render references with the default style
pub fn render_references(references: &[Reference]) -> String {
    references.iter().cloned().collect::<DotDigraph>().render()
}
