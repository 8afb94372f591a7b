use std::collections::HashMap;

/// Stable handle to a node in a [`Document`].
///
/// Handles are only created by [`Document::append`] and nodes are never
/// removed, so a `NodeId` stays valid for the life of its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

/// A single element in the document tree.
///
/// Built with consuming setters, then attached via [`Document::append`].
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) tag: String,
    pub(crate) element_id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: HashMap<String, String>,
    pub(crate) visible: bool,
    pub(crate) opacity: f32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            element_id: None,
            classes: Vec::new(),
            attrs: HashMap::new(),
            visible: true,
            opacity: 1.0,
            parent: None,
            children: Vec::new(),
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Start out hidden (display: none equivalent).
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self.opacity = 0.0;
        self
    }
}

/// An in-memory document tree.
///
/// Nodes live in an arena and are addressed by [`NodeId`]; the tree always
/// has a `body` root. Mutation is limited to what page behaviors need:
/// classes, attributes, visibility, and opacity.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("body")],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Attach a node as the last child of `parent`, returning its handle.
    pub fn append(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    // =========================================================================
    // Identity and attributes
    // =========================================================================

    pub fn tag(&self, id: NodeId) -> &str {
        &self.node(id).tag
    }

    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.node(id).element_id.as_deref()
    }

    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.element_id.as_deref() == Some(element_id))
            .map(NodeId)
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        self.node_mut(id).attrs.insert(name.into(), value.into());
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).classes.iter().any(|c| c == class)
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        &self.node(id).classes
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            self.node_mut(id).classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.node_mut(id).classes.retain(|c| c != class);
    }

    /// Add the class if absent, remove it if present. Returns whether the
    /// class is present afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            true
        }
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.node(id).visible
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.node_mut(id).visible = visible;
    }

    /// Flip visibility. Returns whether the node is visible afterwards.
    pub fn toggle_visible(&mut self, id: NodeId) -> bool {
        let node = self.node_mut(id);
        node.visible = !node.visible;
        node.visible
    }

    pub fn opacity(&self, id: NodeId) -> f32 {
        self.node(id).opacity
    }

    pub fn set_opacity(&mut self, id: NodeId, opacity: f32) {
        self.node_mut(id).opacity = opacity.clamp(0.0, 1.0);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&s| s == id)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    /// Walk the document in tree order (depth-first from the root).
    pub fn walk(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.walk_from(self.root(), &mut out);
        out
    }

    pub(crate) fn walk_from(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in self.children(id) {
            self.walk_from(child, out);
        }
    }
}
