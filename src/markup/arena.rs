//! Arena-based markup tree.
//!
//! Nodes live in a contiguous vector and refer to each other by index, so the
//! parent link is a plain non-owning [`NodeId`] rather than a reference.

use std::fmt::Write;

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value for no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// A markup attribute. Valueless attributes carry an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Tagged element. Attribute order is preserved and duplicates are kept.
    Element { tag: String, attrs: Vec<Attribute> },
    /// Raw text.
    Text(String),
}

/// A node in the arena.
#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// A text fragment paired with the element that directly contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenedRun<'a> {
    pub text: &'a str,
    pub node: NodeId,
}

/// Arena-backed markup tree with a single root element.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Document {
    /// Create an empty document with no root yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// The root element, if one has been set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, tag: impl Into<String>, attrs: Vec<Attribute>) -> NodeId {
        self.alloc(Node::new(NodeData::Element {
            tag: tag.into(),
            attrs,
        }))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(Node::new(NodeData::Text(text.into())))
    }

    /// Append a child to a parent node.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
        }

        if let Some(last_node) = self.get_mut(last_child) {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Append text to the parent's last child if it is text, or add a new text child.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let NodeData::Text(existing) = &mut last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text);
        self.append(parent, text_node);
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildrenIter<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        ChildrenIter {
            doc: self,
            current: first,
        }
    }

    /// Parent of a node, `None` for the root or detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(NodeId::is_some)
    }

    /// Element tag name.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { tag, .. } => Some(tag.as_str()),
            NodeData::Text(_) => None,
        })
    }

    /// Element attributes in document order.
    pub fn attrs(&self, id: NodeId) -> &[Attribute] {
        self.get(id)
            .and_then(|n| match &n.data {
                NodeData::Element { attrs, .. } => Some(attrs.as_slice()),
                NodeData::Text(_) => None,
            })
            .unwrap_or(&[])
    }

    /// First value of the named attribute.
    pub fn get_attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attrs(id)
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Content of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            NodeData::Element { .. } => None,
        })
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.tag(id).is_some()
    }

    /// First element in pre-order (starting with `from` itself) satisfying `predicate`.
    pub fn find_by<F>(&self, from: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&str) -> bool,
    {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if let Some(tag) = self.tag(id) {
                if predicate(tag) {
                    return Some(id);
                }
                // Push children in reverse order for left-to-right traversal
                let mut children: Vec<_> = self.children(id).collect();
                children.reverse();
                stack.extend(children);
            }
        }
        None
    }

    /// First element with the given tag in depth-first pre-order.
    pub fn find(&self, from: NodeId, tag: &str) -> Option<NodeId> {
        self.find_by(from, |t| t == tag)
    }

    /// All text under `id`, left to right, each paired with its containing element.
    pub fn flattened_data(&self, id: NodeId) -> Vec<FlattenedRun<'_>> {
        let mut runs = Vec::new();
        self.collect_runs(id, &mut runs);
        runs
    }

    fn collect_runs<'a>(&'a self, id: NodeId, runs: &mut Vec<FlattenedRun<'a>>) {
        for child in self.children(id) {
            match self.get(child).map(|n| &n.data) {
                Some(NodeData::Text(text)) => runs.push(FlattenedRun { text, node: id }),
                Some(NodeData::Element { .. }) => self.collect_runs(child, runs),
                None => {}
            }
        }
    }

    /// Attribute values of `id` and then each ancestor up to the root.
    ///
    /// `filter` restricts to attributes with that name; `split` further splits
    /// every value on the delimiter (e.g. `' '` for class lists). Empty pieces
    /// produced by splitting are dropped.
    pub fn ancestor_attributes(
        &self,
        id: NodeId,
        filter: Option<&str>,
        split: Option<char>,
    ) -> Vec<&str> {
        let mut values = Vec::new();
        let mut current = Some(id);

        while let Some(node) = current {
            for attr in self.attrs(node) {
                if filter.is_some_and(|name| attr.name != name) {
                    continue;
                }
                match split {
                    Some(delim) => values.extend(attr.value.split(delim).filter(|s| !s.is_empty())),
                    None => values.push(attr.value.as_str()),
                }
            }
            current = self.parent(node);
        }

        values
    }

    /// Indented dump of the subtree rooted at `id`, one node per line.
    pub fn pretty_print(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.pretty_print_into(id, 0, &mut out);
        out
    }

    fn pretty_print_into(&self, id: NodeId, depth: usize, out: &mut String) {
        let indent = "\t".repeat(depth);
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Element { tag, attrs }) => {
                let _ = write!(out, "{indent}<{tag}");
                for attr in attrs {
                    let _ = write!(out, " {}=\"{}\"", attr.name, attr.value);
                }
                out.push_str(">\n");
                for child in self.children(id) {
                    self.pretty_print_into(child, depth + 1, out);
                }
                let _ = writeln!(out, "{indent}</{tag}>");
            }
            Some(NodeData::Text(text)) => {
                let _ = writeln!(out, "{indent}{text}");
            }
            None => {}
        }
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    doc: &'a Document,
    current: NodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .doc
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}
