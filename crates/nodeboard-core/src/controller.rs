//! Interaction protocol: turns render-surface events and host commands into
//! store mutations.
//!
//! Node render state moves `Normal <-> Hover` on hover enter/leave and into
//! `Editing` on click; a commit brings it back to `Normal`. Edges show the
//! hover label while hovered and are deleted on click without confirmation.

use crate::layout::LayoutHint;
use crate::model::{EdgeId, GraphSnapshot, NodeId, RenderState, EDGE_HOVER_LABEL};
use crate::store::GraphStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Events emitted by the visualization surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SurfaceEvent {
    NodeHoverEnter { node: NodeId },
    NodeHoverLeave { node: NodeId },
    NodeClick { node: NodeId },
    /// Activation of the delete control shown over a hovered node.
    NodeDeleteControl { node: NodeId },
    EdgeHoverEnter { edge: EdgeId },
    EdgeHoverLeave { edge: EdgeId },
    EdgeClick { edge: EdgeId },
    /// Drag-release between two handles. `id` defaults to
    /// [`EdgeId::from_endpoints`] when the surface doesn't supply one.
    Connect {
        source: NodeId,
        target: NodeId,
        #[serde(default)]
        id: Option<EdgeId>,
    },
}

/// Commands from the host UI controls around the surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HostCommand {
    AddNode { label: String },
    /// Typing in the add-node text field.
    SetAddText { text: String },
    /// The "Add Node" control: adds a node labelled with the field's text.
    SubmitAddText,
    /// Typing in a node's edit overlay.
    EditInput { node: NodeId, text: String },
    EditCommit { node: NodeId, text: String },
    /// The overlay's save control: commits the current draft.
    SaveEdit { node: NodeId },
}

/// What handling an input did to the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    NodeAdded { node: NodeId },
    EdgeAdded { edge: EdgeId },
    Changed,
    Unchanged,
}

impl Effect {
    fn from_changed(changed: bool) -> Self {
        if changed {
            Effect::Changed
        } else {
            Effect::Unchanged
        }
    }
}

/// Consumer of graph snapshots, typically the visualization surface.
pub trait RenderSurface: Send {
    fn display(&mut self, snapshot: &GraphSnapshot);
}

impl<F> RenderSurface for F
where
    F: FnMut(&GraphSnapshot) + Send,
{
    fn display(&mut self, snapshot: &GraphSnapshot) {
        self(snapshot)
    }
}

/// Sole owner and writer of the [`GraphStore`].
#[derive(Debug, Default)]
pub struct InteractionController {
    store: GraphStore,
    layout: LayoutHint,
    add_text: String,
    drafts: HashMap<NodeId, String>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.store.snapshot()
    }

    /// Text currently held by the add-node field.
    pub fn add_text(&self) -> &str {
        &self.add_text
    }

    pub fn draft(&self, node: &NodeId) -> Option<&str> {
        self.drafts.get(node).map(String::as_str)
    }

    pub fn drafts(&self) -> &HashMap<NodeId, String> {
        &self.drafts
    }

    /// Attach a surface; it receives a snapshot after every change.
    pub fn attach<S>(&mut self, mut surface: S)
    where
        S: RenderSurface + 'static,
    {
        surface.display(&self.store.snapshot());
        self.store
            .subscribe(Box::new(move |snapshot: &GraphSnapshot| surface.display(snapshot)));
    }

    pub fn handle_event(&mut self, event: SurfaceEvent) -> Effect {
        trace!(?event, "surface event");
        match event {
            SurfaceEvent::NodeHoverEnter { node } => self.node_hover(&node, true),
            SurfaceEvent::NodeHoverLeave { node } => self.node_hover(&node, false),
            SurfaceEvent::NodeClick { node } => self.node_click(&node),
            SurfaceEvent::NodeDeleteControl { node } => self.node_delete_control(&node),
            SurfaceEvent::EdgeHoverEnter { edge } => Effect::from_changed(
                self.store
                    .set_edge_hover_label(&edge, Some(EDGE_HOVER_LABEL.to_string())),
            ),
            SurfaceEvent::EdgeHoverLeave { edge } => {
                Effect::from_changed(self.store.set_edge_hover_label(&edge, None))
            }
            SurfaceEvent::EdgeClick { edge } => Effect::from_changed(self.store.delete_edge(&edge)),
            SurfaceEvent::Connect { source, target, id } => {
                let id = id.unwrap_or_else(|| EdgeId::from_endpoints(&source, &target));
                let edge = self.store.add_edge(id, source, target);
                Effect::EdgeAdded { edge }
            }
        }
    }

    pub fn handle_command(&mut self, command: HostCommand) -> Effect {
        trace!(?command, "host command");
        match command {
            HostCommand::AddNode { label } => {
                let node = self.add_node(label);
                Effect::NodeAdded { node }
            }
            HostCommand::SetAddText { text } => {
                self.add_text = text;
                Effect::Unchanged
            }
            HostCommand::SubmitAddText => {
                let node = self.add_node(self.add_text.clone());
                Effect::NodeAdded { node }
            }
            HostCommand::EditInput { node, text } => {
                // keystrokes only matter while the overlay is open
                if let Some(draft) = self.drafts.get_mut(&node) {
                    *draft = text;
                }
                Effect::Unchanged
            }
            HostCommand::EditCommit { node, text } => self.edit_commit(&node, text),
            HostCommand::SaveEdit { node } => match self.drafts.get(&node).cloned() {
                Some(text) => self.edit_commit(&node, text),
                None => Effect::Unchanged,
            },
        }
    }

    /// Add a node at the next layout position.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let position = self.layout.next_position();
        self.store.add_node(label, position)
    }

    /// Apply a label edit and close the node's overlay.
    pub fn edit_commit(&mut self, node: &NodeId, text: impl Into<String>) -> Effect {
        self.drafts.remove(node);
        Effect::from_changed(self.store.update_node_label(node, text))
    }

    fn node_hover(&mut self, id: &NodeId, entering: bool) -> Effect {
        let Some(node) = self.store.node(id) else {
            return Effect::Unchanged;
        };
        if node.suppress_hover() {
            return Effect::Unchanged;
        }
        let next = match (node.render_state, entering) {
            (RenderState::Normal, true) => RenderState::Hover,
            (RenderState::Hover, false) => RenderState::Normal,
            (state, _) => {
                trace!(node = %id, ?state, entering, "hover ignored");
                return Effect::Unchanged;
            }
        };
        Effect::from_changed(self.store.set_node_render_state(id, next))
    }

    fn node_click(&mut self, id: &NodeId) -> Effect {
        let Some(node) = self.store.node(id) else {
            return Effect::Unchanged;
        };
        if node.render_state == RenderState::Editing {
            return Effect::Unchanged;
        }
        debug!(node = %id, "edit overlay opened");
        self.drafts.insert(id.clone(), node.label.clone());
        Effect::from_changed(self.store.set_node_render_state(id, RenderState::Editing))
    }

    fn node_delete_control(&mut self, id: &NodeId) -> Effect {
        match self.store.node(id).map(|n| n.render_state) {
            Some(RenderState::Hover) => {
                self.drafts.remove(id);
                Effect::from_changed(self.store.delete_node(id))
            }
            Some(state) => {
                trace!(node = %id, ?state, "delete control not shown");
                Effect::Unchanged
            }
            None => Effect::Unchanged,
        }
    }
}
