//! Presentation mapping from render state to what the surface should draw.
//!
//! The store knows nothing about overlays or controls; this module decides
//! them from the [`RenderState`] of each node.

use crate::model::{Edge, GraphSnapshot, Node, NodeId, Position, RenderState};
use serde::Serialize;
use std::collections::HashMap;

/// Tagged visual variant of a node: which overlay plus the text it shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeVisual {
    pub kind: RenderState,
    pub text: String,
}

impl NodeVisual {
    /// In `Editing` the text is the pending draft, otherwise the label.
    pub fn of(node: &Node, draft: Option<&str>) -> Self {
        let text = match (node.render_state, draft) {
            (RenderState::Editing, Some(draft)) => draft.to_string(),
            _ => node.label.clone(),
        };
        Self {
            kind: node.render_state,
            text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditOverlay {
    pub title: &'static str,
    pub draft: String,
    pub save_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub id: NodeId,
    pub position: Position,
    pub class_name: String,
    pub visual: NodeVisual,
    pub delete_control: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_overlay: Option<EditOverlay>,
}

impl NodeView {
    pub fn build(node: &Node, draft: Option<&str>) -> Self {
        let visual = NodeVisual::of(node, draft);
        let edit_overlay = (visual.kind == RenderState::Editing).then(|| EditOverlay {
            title: "Edit Text",
            draft: visual.text.clone(),
            save_label: "Save",
        });
        Self {
            id: node.id.clone(),
            position: node.position,
            class_name: format!("{} node", node.id),
            delete_control: visual.kind == RenderState::Hover,
            edit_overlay,
            visual,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeView {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl From<&Edge> for EdgeView {
    fn from(edge: &Edge) -> Self {
        Self {
            id: edge.id.to_string(),
            source: edge.source.to_string(),
            target: edge.target.to_string(),
            label: edge.hover_label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneView {
    pub revision: u64,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

impl SceneView {
    pub fn build(snapshot: &GraphSnapshot, drafts: &HashMap<NodeId, String>) -> Self {
        Self {
            revision: snapshot.revision,
            nodes: snapshot
                .nodes
                .iter()
                .map(|n| NodeView::build(n, drafts.get(&n.id).map(String::as_str)))
                .collect(),
            edges: snapshot.edges.iter().map(EdgeView::from).collect(),
        }
    }
}
