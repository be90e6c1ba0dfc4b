//! Markup tree model.
//!
//! A dictionary export is parsed into an arena-backed [`Document`]. The tree
//! supports depth-first search ([`Document::find`]), reading-order text
//! flattening ([`Document::flattened_data`]) and upward attribute resolution
//! ([`Document::ancestor_attributes`]).
//!
//! # Example
//!
//! ```
//! use latin_vocab::markup::parse_document;
//!
//! let doc = parse_document("<html><body><p class='c1'><span class='c2'>amō</span></p></body></html>")?;
//! let root = doc.root().unwrap();
//! let span = doc.find(root, "span").unwrap();
//! assert_eq!(doc.ancestor_attributes(span, Some("class"), Some(' ')), vec!["c2", "c1"]);
//! # Ok::<(), latin_vocab::Error>(())
//! ```

mod arena;
mod builder;

pub use arena::{Attribute, ChildrenIter, Document, FlattenedRun, Node, NodeData, NodeId};
pub use builder::{ParseConfig, TreeBuilder, parse_document, parse_document_with_config};

/// Header level (1–9) of an `h1`…`h9` tag, `None` for anything else.
pub fn header_level(tag: &str) -> Option<usize> {
    match tag.as_bytes() {
        [b'h', d @ b'1'..=b'9'] => Some((d - b'0') as usize),
        _ => None,
    }
}
