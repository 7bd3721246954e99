use crate::ids::IdAllocator;
use crate::model::{Edge, EdgeId, GraphSnapshot, Node, NodeId, Position, RenderState};
use std::fmt;
use tracing::{debug, trace};

/// Snapshot callback: receives the whole graph after each change.
pub type Observer = Box<dyn FnMut(&GraphSnapshot) + Send>;

/// Owns the node and edge collections.
///
/// Id-keyed mutations never fail: an unknown id is a no-op that leaves the
/// revision untouched and notifies nobody. Insertion order is preserved for
/// whatever survives a deletion.
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    ids: IdAllocator,
    revision: u64,
    observers: Vec<Observer>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            ids: IdAllocator::new(),
            revision: 0,
            observers: Vec::new(),
        }
    }

    /// Register a snapshot observer.
    pub fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            revision: self.revision,
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn add_node(&mut self, label: impl Into<String>, position: Position) -> NodeId {
        let id = self.ids.allocate();
        let node = Node::new(id.clone(), label, position);
        debug!(node = %id, label = %node.label, x = position.x, y = position.y, "node added");
        self.nodes.push(node);
        self.commit();
        id
    }

    /// Remove a node and, in the same step, every edge that starts or ends at it.
    pub fn delete_node(&mut self, id: &NodeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| &n.id != id);
        if self.nodes.len() == before {
            trace!(node = %id, "delete of unknown node ignored");
            return false;
        }

        let edges_before = self.edges.len();
        self.edges.retain(|e| !e.touches(id));
        debug!(
            node = %id,
            cascaded_edges = edges_before - self.edges.len(),
            "node deleted"
        );
        self.commit();
        true
    }

    /// Append an edge. Endpoints are not checked and duplicates are kept.
    pub fn add_edge(&mut self, id: EdgeId, source: NodeId, target: NodeId) -> EdgeId {
        debug!(edge = %id, source = %source, target = %target, "edge added");
        self.edges.push(Edge::new(id.clone(), source, target));
        self.commit();
        id
    }

    /// Remove every edge carrying `id`.
    pub fn delete_edge(&mut self, id: &EdgeId) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| &e.id != id);
        if self.edges.len() == before {
            trace!(edge = %id, "delete of unknown edge ignored");
            return false;
        }
        debug!(edge = %id, removed = before - self.edges.len(), "edge deleted");
        self.commit();
        true
    }

    pub fn set_node_render_state(&mut self, id: &NodeId, state: RenderState) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| &n.id == id) else {
            trace!(node = %id, ?state, "render state for unknown node ignored");
            return false;
        };
        if node.render_state == state {
            return false;
        }
        debug!(node = %id, from = ?node.render_state, to = ?state, "render state changed");
        node.render_state = state;
        self.commit();
        true
    }

    /// Replace the label and drop the node back to `Normal`.
    pub fn update_node_label(&mut self, id: &NodeId, text: impl Into<String>) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| &n.id == id) else {
            trace!(node = %id, "label update for unknown node ignored");
            return false;
        };
        let text = text.into();
        if node.label == text && node.render_state == RenderState::Normal {
            trace!(node = %id, "label unchanged");
            return false;
        }
        node.label = text;
        node.render_state = RenderState::Normal;
        debug!(node = %id, label = %node.label, "label updated");
        self.commit();
        true
    }

    pub fn set_edge_hover_label(&mut self, id: &EdgeId, text: Option<String>) -> bool {
        let mut changed = false;
        for edge in self.edges.iter_mut().filter(|e| &e.id == id) {
            if edge.hover_label != text {
                edge.hover_label = text.clone();
                changed = true;
            }
        }
        if !changed {
            trace!(edge = %id, "edge hover label unchanged");
            return false;
        }
        debug!(edge = %id, label = ?text, "edge hover label set");
        self.commit();
        true
    }

    fn commit(&mut self) {
        self.revision += 1;
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in self.observers.iter_mut() {
            observer(&snapshot);
        }
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphStore")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}
