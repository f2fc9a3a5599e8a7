//! The mission document: placed nodes, safety docks, and metadata.

use crate::model::{MissionKind, MissionMetadata, MissionNode, NodeKind, SafetyDock};

use super::validate::NewEntity;

/// Where an inserted entity ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placed {
    /// Appended to the path at `index`.
    Node { id: String, index: usize },

    /// Added to the dock set.
    Dock { id: String },
}

/// Everything placed in a session.
///
/// Nodes and docks share one id namespace. Entities are append-only;
/// the only way to remove one is to replace the whole document.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionDocument {
    nodes: Vec<MissionNode>,
    docks: Vec<SafetyDock>,
    metadata: MissionMetadata,
}

impl MissionDocument {
    pub fn new(metadata: MissionMetadata) -> Self {
        Self {
            nodes: Vec::new(),
            docks: Vec::new(),
            metadata,
        }
    }

    /// Path nodes in placement order.
    pub fn nodes(&self) -> &[MissionNode] {
        &self.nodes
    }

    pub fn docks(&self) -> &[SafetyDock] {
        &self.docks
    }

    pub fn metadata(&self) -> &MissionMetadata {
        &self.metadata
    }

    /// Whether a node or dock already uses `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id) || self.docks.iter().any(|d| d.id == id)
    }

    pub fn home(&self) -> Option<&MissionNode> {
        self.nodes.iter().find(|n| n.kind == NodeKind::Home)
    }

    /// Record the mission name and type typed alongside the first node.
    pub fn capture_mission_fields(&mut self, name: &str, kind: MissionKind) {
        self.metadata.mission_name = name.trim().to_string();
        self.metadata.mission_type.kind = kind;
    }

    /// Insert a validated entity.
    ///
    /// Uniqueness and the single-home rule are checked by validation,
    /// which must run against this same document first.
    pub fn insert(&mut self, entity: NewEntity) -> Placed {
        match entity {
            NewEntity::Node(node) => {
                let id = node.id.clone();
                self.nodes.push(node);
                Placed::Node {
                    id,
                    index: self.nodes.len() - 1,
                }
            }
            NewEntity::Dock(dock) => {
                let id = dock.id.clone();
                self.docks.push(dock);
                Placed::Dock { id }
            }
        }
    }
}
