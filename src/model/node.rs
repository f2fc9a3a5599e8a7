//! Node types: placed mission nodes and safety docks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::LatLng;

/// What a node is for. Chosen in the side panel before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Where the mission starts and may end. At most one per mission.
    Home,

    /// A plain pass-through point.
    Waypoint,

    /// A point with a special task.
    Special,

    /// A point where the unit waits before moving on.
    Hold,

    /// A recovery location, kept outside the ordered path.
    Safety,
}

impl NodeKind {
    /// Whether a task duration is parsed for this kind.
    pub fn takes_task_duration(self) -> bool {
        !matches!(self, Self::Home | Self::Safety)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Waypoint => "waypoint",
            Self::Special => "special",
            Self::Hold => "hold",
            Self::Safety => "safety",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node on the ordered mission path. Immutable once placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionNode {
    pub id: String,
    pub name: String,
    pub task: String,
    pub kind: NodeKind,
    pub position: LatLng,

    /// Zero unless `kind` is `Hold`.
    pub hold_time_seconds: u32,

    /// `None` for `Home`; parsed for every other path kind.
    pub task_duration_seconds: Option<u32>,
}

/// A recovery location. Never part of the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyDock {
    pub id: String,
    pub name: String,
    pub task: String,
    pub position: LatLng,
    pub hold_time_seconds: u32,
}
