//! Events: the operator's interactions with the map and side panel.

use serde::{Deserialize, Serialize};

use super::NodeRequest;
use crate::geometry::LatLng;

/// A single operator interaction, serialized as one line of an event script.
///
/// Tagged enum so each line is self-describing when read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Event {
    /// The mission planner button: gates double clicks and export.
    ToggleMission,

    /// The work zone button: starts a fresh zone or stops drawing.
    ToggleWorkZone,

    /// A single map click. Only the work zone drawer listens.
    Click {
        #[serde(flatten)]
        at: LatLng,
    },

    /// A map double click. Picks a node position or closes the path.
    DoubleClick {
        #[serde(flatten)]
        at: LatLng,
    },

    /// "Create node" pressed with the panel's current fields.
    Submit(NodeRequest),

    /// "Cancel" pressed on the panel.
    Cancel,

    /// "Clear mission" pressed.
    Clear,

    /// "Export" pressed.
    Export,
}
