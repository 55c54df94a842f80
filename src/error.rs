//! # Decode Error Algebra
//!
//! Structured errors for the parser system. A failed parse never surfaces as
//! a bare message: it is a small tree built from a closed set of variants,
//! combined bottom-up as combinators aggregate or annotate the failures of
//! their children, and rendered on demand as an indented tree.
//!
//! ## Variants
//!
//! * [`DecodeError::Leaf`]: a concrete value failed to match a reason
//! * [`DecodeError::Wrap`]: a context label around a nested error
//! * [`DecodeError::Key`] / [`DecodeError::Index`]: an error located at a
//!   named field or a positional slot
//! * [`DecodeError::Union`]: none of several alternatives matched
//! * [`DecodeError::Intersection`]: not all of several constraints held
//! * [`DecodeError::Many`]: an unordered bag of unrelated errors, and the
//!   identity element for [`DecodeError::concat`]
//!
//! Constructors flatten nested structure one level on the way in, so a
//! `Union` never directly contains another `Union`, and likewise for
//! `Intersection` and `Many`.
//!
//! ## Rendering
//!
//! [`DecodeError::draw`] produces the multi-line tree format with box-drawing
//! connectors. The exact text is part of the crate contract; tests assert on
//! it literally. `Display` gives the single-line label of one node, which is
//! also what `draw` prints for that node's line.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Whether a located error sits at a required or an optional slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Property {
    Required,
    Optional,
}

/// Structured parse/decode error tree.
///
/// Values are immutable once constructed; combination happens through the
/// flattening constructors and [`DecodeError::concat`], never by mutation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// A concrete value failed to match an expected shape.
    ///
    /// The offending value is captured as JSON at construction time; a value
    /// that cannot be serialized is stored as `None` and rendered through the
    /// fallback line.
    #[error("{}", leaf_line(.value, .reason))]
    Leaf {
        value: Option<Value>,
        reason: String,
    },
    /// A context label wrapping a nested error.
    #[error("{context}")]
    Wrap {
        context: String,
        error: Box<DecodeError>,
    },
    /// An error located at a named field.
    #[error("{property} property \"{key}\"")]
    Key {
        key: String,
        property: Property,
        error: Box<DecodeError>,
    },
    /// An error located at a positional slot.
    #[error("{property} index {index}")]
    Index {
        index: usize,
        property: Property,
        error: Box<DecodeError>,
    },
    /// None of these alternatives matched.
    #[error("cannot decode union (any of)")]
    Union(Vec<DecodeError>),
    /// Not all of these simultaneously matched.
    #[error("cannot decode intersection (all of)")]
    Intersection(Vec<DecodeError>),
    /// An unordered bag of unrelated errors.
    #[error("{}", many_line(.0))]
    Many(Vec<DecodeError>),
}

fn leaf_line(value: &Option<Value>, reason: &str) -> String {
    match value.as_ref().and_then(|v| serde_json::to_string(v).ok()) {
        Some(json) => format!("cannot decode {json}, should be {reason}"),
        None => format!("cannot decode or render, should be {reason}"),
    }
}

fn many_line(errors: &[DecodeError]) -> String {
    errors
        .iter()
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl DecodeError {
    /// A concrete value that failed to match, with the reason it should have.
    pub fn leaf(value: impl Serialize, reason: impl Into<String>) -> Self {
        Self::Leaf {
            value: serde_json::to_value(value).ok(),
            reason: reason.into(),
        }
    }

    /// Annotates a nested error with a context label.
    pub fn wrap(context: impl Into<String>, error: DecodeError) -> Self {
        Self::Wrap {
            context: context.into(),
            error: Box::new(error),
        }
    }

    /// Locates a nested error at a named field.
    pub fn key(key: impl Into<String>, property: Property, error: DecodeError) -> Self {
        Self::Key {
            key: key.into(),
            property,
            error: Box::new(error),
        }
    }

    /// Locates a nested error at a positional slot.
    pub fn index(index: usize, property: Property, error: DecodeError) -> Self {
        Self::Index {
            index,
            property,
            error: Box::new(error),
        }
    }

    /// "None of these matched". Nested unions are spliced into one flat list.
    pub fn union(errors: Vec<DecodeError>) -> Self {
        let mut flat = Vec::with_capacity(errors.len());
        for error in errors {
            match error {
                Self::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Self::Union(flat)
    }

    /// "Not all of these held". Nested intersections are spliced flat.
    pub fn intersection(errors: Vec<DecodeError>) -> Self {
        let mut flat = Vec::with_capacity(errors.len());
        for error in errors {
            match error {
                Self::Intersection(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Self::Intersection(flat)
    }

    /// An unordered bag of errors. Nested bags are absorbed.
    pub fn many(errors: Vec<DecodeError>) -> Self {
        let mut flat = Vec::with_capacity(errors.len());
        for error in errors {
            match error {
                Self::Many(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Self::Many(flat)
    }

    /// The identity element for [`DecodeError::concat`]: an empty bag.
    pub fn empty() -> Self {
        Self::many(Vec::new())
    }

    /// Monoidal combination of two independent failures.
    ///
    /// Two intersections merge into one intersection, two unions into one
    /// union; any other pairing lands in a bag, with nested bags absorbed.
    pub fn concat(self, other: DecodeError) -> Self {
        match (self, other) {
            (Self::Intersection(mut left), Self::Intersection(right)) => {
                left.extend(right);
                Self::Intersection(left)
            }
            (Self::Union(mut left), Self::Union(right)) => {
                left.extend(right);
                Self::Union(left)
            }
            (left, right) => Self::many(vec![left, right]),
        }
    }

    /// Renders the error as an indented tree with box-drawing connectors.
    ///
    /// `Many` nodes are transparent: their children splice directly into the
    /// parent's child list, and at the root they become independent top-level
    /// trees separated by newlines.
    pub fn draw(&self) -> String {
        let trees = forest(self);
        let mut out = String::new();
        for (i, tree) in trees.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&tree.line);
            render_children(tree, "", &mut out);
        }
        out
    }
}

/// One rendered node: its label line and its (already spliced) children.
struct Node {
    line: String,
    children: Vec<Node>,
}

fn forest(error: &DecodeError) -> Vec<Node> {
    match error {
        DecodeError::Many(errors) => errors.iter().flat_map(forest).collect(),
        DecodeError::Leaf { .. } => vec![Node {
            line: error.to_string(),
            children: Vec::new(),
        }],
        DecodeError::Wrap { error: inner, .. }
        | DecodeError::Key { error: inner, .. }
        | DecodeError::Index { error: inner, .. } => vec![Node {
            line: error.to_string(),
            children: forest(inner),
        }],
        DecodeError::Union(members) | DecodeError::Intersection(members) => vec![Node {
            line: error.to_string(),
            children: members.iter().flat_map(forest).collect(),
        }],
    }
}

fn render_children(node: &Node, prefix: &str, out: &mut String) {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        out.push('\n');
        out.push_str(prefix);
        out.push_str(if last { "└─ " } else { "├─ " });
        out.push_str(&child.line);
        let nested = format!("{prefix}{}", if last { "   " } else { "│  " });
        render_children(child, &nested, out);
    }
}
