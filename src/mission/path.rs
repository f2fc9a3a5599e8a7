//! Mission path building.
//!
//! Double clicks either pick a position for a new node or close the path
//! onto an existing one. A submitted request turns the pending position into
//! a node. Once closed, the path accepts nothing until the session is cleared.

use crate::geometry::LatLng;
use crate::model::{MissionKind, NodeKind, NodeRequest};

use super::document::{MissionDocument, Placed};
use super::validate;
use super::Rejection;

/// How the path was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closure {
    /// Closed on the home node. The line returns to the first node.
    Ended,

    /// Closed on the last node: a clean, explicit end of the loop.
    ClosedLoop { index: usize },

    /// Closed on an earlier node: the unit revisits it indefinitely.
    LoopDetected { index: usize },
}

impl Closure {
    /// The node index the drawn line returns to.
    pub fn target(self) -> usize {
        match self {
            Self::Ended => 0,
            Self::ClosedLoop { index } | Self::LoopDetected { index } => index,
        }
    }
}

/// Observable path state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathState {
    /// No path nodes, nothing pending.
    Idle,

    /// A position is chosen and the panel is open.
    AwaitingNodeDetails { pending: LatLng },

    /// At least one node, path open.
    Active,

    Closed(Closure),
}

/// What a double click did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoubleClick {
    /// A new node position is pending; the panel opens.
    Pending(LatLng),

    /// The click landed on an existing node and closed the path.
    Closed(Closure),
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Phase {
    #[default]
    Open,
    Awaiting {
        pending: LatLng,
    },
    Closed(Closure),
}

/// The path state machine. Nodes themselves live in the [`MissionDocument`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathBuilder {
    phase: Phase,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, document: &MissionDocument) -> PathState {
        match self.phase {
            Phase::Open if document.nodes().is_empty() => PathState::Idle,
            Phase::Open => PathState::Active,
            Phase::Awaiting { pending } => PathState::AwaitingNodeDetails { pending },
            Phase::Closed(closure) => PathState::Closed(closure),
        }
    }

    #[allow(dead_code)]
    pub fn pending(&self) -> Option<LatLng> {
        match self.phase {
            Phase::Awaiting { pending } => Some(pending),
            _ => None,
        }
    }

    pub fn closure(&self) -> Option<Closure> {
        match self.phase {
            Phase::Closed(closure) => Some(closure),
            _ => None,
        }
    }

    /// A double click at `point`.
    ///
    /// The first node (in path order) strictly within `match_radius_m`
    /// decides the closure. Otherwise the point becomes the pending position
    /// if `inside_zone` accepts it, replacing any earlier pending position.
    pub fn double_click(
        &mut self,
        document: &MissionDocument,
        point: LatLng,
        match_radius_m: f64,
        inside_zone: impl FnOnce(LatLng) -> bool,
    ) -> Result<DoubleClick, Rejection> {
        if matches!(self.phase, Phase::Closed(_)) {
            return Err(Rejection::PathClosed);
        }

        let nodes = document.nodes();
        let hit = nodes
            .iter()
            .position(|n| n.position.distance_to(&point) < match_radius_m);

        if let Some(index) = hit {
            let closure = if nodes[index].kind == NodeKind::Home {
                Closure::Ended
            } else if index == nodes.len() - 1 {
                Closure::ClosedLoop { index }
            } else {
                Closure::LoopDetected { index }
            };
            self.phase = Phase::Closed(closure);
            return Ok(DoubleClick::Closed(closure));
        }

        if !inside_zone(point) {
            return Err(Rejection::OutsideWorkZone);
        }

        self.phase = Phase::Awaiting { pending: point };
        Ok(DoubleClick::Pending(point))
    }

    /// Turn the pending position into a node or dock.
    ///
    /// On any failure the document and the pending position are untouched.
    /// The mission name and type ride along with the first submission that
    /// succeeds while the path is still empty.
    pub fn submit(
        &mut self,
        document: &mut MissionDocument,
        request: &NodeRequest,
    ) -> Result<Placed, Rejection> {
        let pending = match self.phase {
            Phase::Awaiting { pending } => pending,
            Phase::Closed(_) => return Err(Rejection::PathClosed),
            Phase::Open => return Err(Rejection::NoPendingPosition),
        };

        let entity = validate::validate(request, pending, document)?;

        if document.nodes().is_empty() {
            document.capture_mission_fields(
                &request.mission_name,
                MissionKind::from(request.mission_type.as_str()),
            );
        }

        let placed = document.insert(entity);
        self.phase = Phase::Open;
        Ok(placed)
    }

    /// Drop the pending position. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        if matches!(self.phase, Phase::Awaiting { .. }) {
            self.phase = Phase::Open;
            true
        } else {
            false
        }
    }

    /// The line to draw through the path, closed back onto the closure
    /// target if there is one. `None` below two nodes.
    pub fn polyline(&self, document: &MissionDocument) -> Option<Vec<LatLng>> {
        let nodes = document.nodes();
        if nodes.len() < 2 {
            return None;
        }
        let mut line: Vec<LatLng> = nodes.iter().map(|n| n.position).collect();
        if let Some(closure) = self.closure() {
            line.push(nodes[closure.target()].position);
        }
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::mission::ValidationError;
    use crate::model::{MissionMetadata, TimeFields};

    const RADIUS: f64 = 20.0;

    fn document() -> MissionDocument {
        MissionDocument::new(MissionMetadata::new("1.0", "Unknown"))
    }

    fn request(kind: NodeKind, id: &str) -> NodeRequest {
        NodeRequest {
            kind: Some(kind),
            id: id.into(),
            name: id.into(),
            task: "run".into(),
            ..NodeRequest::default()
        }
    }

    /// Points roughly 111 m apart along the equator.
    fn spot(i: u32) -> LatLng {
        LatLng::new(0.0, f64::from(i) * 0.001)
    }

    fn place(
        path: &mut PathBuilder,
        doc: &mut MissionDocument,
        at: LatLng,
        kind: NodeKind,
        id: &str,
    ) {
        let clicked = path.double_click(doc, at, RADIUS, |_| true).unwrap();
        assert_eq!(clicked, DoubleClick::Pending(at));
        path.submit(doc, &request(kind, id)).unwrap();
    }

    #[test]
    fn idle_to_awaiting_to_active() {
        let mut doc = document();
        let mut path = PathBuilder::new();
        assert_eq!(path.state(&doc), PathState::Idle);

        path.double_click(&doc, spot(0), RADIUS, |_| true).unwrap();
        assert_eq!(
            path.state(&doc),
            PathState::AwaitingNodeDetails { pending: spot(0) }
        );

        let placed = path.submit(&mut doc, &request(NodeKind::Waypoint, "W1")).unwrap();
        assert_eq!(
            placed,
            Placed::Node {
                id: "W1".into(),
                index: 0
            }
        );
        assert_eq!(path.state(&doc), PathState::Active);
        assert!(path.pending().is_none());
    }

    #[test]
    fn pending_position_is_replaced() {
        let mut doc = document();
        let mut path = PathBuilder::new();
        path.double_click(&doc, spot(0), RADIUS, |_| true).unwrap();

        let clicked = path.double_click(&doc, spot(3), RADIUS, |_| true).unwrap();
        assert_eq!(clicked, DoubleClick::Pending(spot(3)));
        assert_eq!(path.pending(), Some(spot(3)));

        path.submit(&mut doc, &request(NodeKind::Waypoint, "W1")).unwrap();
        assert_eq!(doc.nodes().len(), 1);
        assert_eq!(doc.nodes()[0].position, spot(3));
    }

    #[test]
    fn submit_without_pending_is_rejected() {
        let mut doc = document();
        let mut path = PathBuilder::new();
        assert_eq!(
            path.submit(&mut doc, &request(NodeKind::Waypoint, "W1")),
            Err(Rejection::NoPendingPosition)
        );
        assert!(doc.nodes().is_empty());
    }

    #[test]
    fn failed_submit_keeps_pending_position() {
        let mut doc = document();
        let mut path = PathBuilder::new();
        path.double_click(&doc, spot(0), RADIUS, |_| true).unwrap();

        let mut bad = request(NodeKind::Hold, "H1");
        bad.hold_time = TimeFields::new("0", "60", "0");
        assert_eq!(
            path.submit(&mut doc, &bad),
            Err(Rejection::Validation(ValidationError::InvalidHoldTime))
        );
        assert_eq!(path.pending(), Some(spot(0)));
        assert!(doc.nodes().is_empty());
        assert!(doc.metadata().mission_name.is_empty());
    }

    #[test]
    fn cancel_discards_pending_only() {
        let mut doc = document();
        let mut path = PathBuilder::new();
        place(&mut path, &mut doc, spot(0), NodeKind::Waypoint, "W1");

        path.double_click(&doc, spot(1), RADIUS, |_| true).unwrap();
        assert!(path.cancel());
        assert_eq!(path.state(&doc), PathState::Active);
        assert!(!path.cancel());
        assert_eq!(doc.nodes().len(), 1);
    }

    #[test]
    fn outside_zone_is_rejected_without_change() {
        let doc = document();
        let mut path = PathBuilder::new();
        assert_eq!(
            path.double_click(&doc, spot(0), RADIUS, |_| false),
            Err(Rejection::OutsideWorkZone)
        );
        assert_eq!(path.state(&doc), PathState::Idle);
    }

    #[test]
    fn safety_dock_stays_off_the_path() {
        let mut doc = document();
        let mut path = PathBuilder::new();
        place(&mut path, &mut doc, spot(0), NodeKind::Safety, "D1");

        assert_eq!(doc.docks().len(), 1);
        assert!(doc.nodes().is_empty());
        assert_eq!(path.state(&doc), PathState::Idle);

        // A dock is not a double-click target.
        assert_eq!(
            path.double_click(&doc, spot(0), RADIUS, |_| true).unwrap(),
            DoubleClick::Pending(spot(0))
        );
    }

    #[test]
    fn mission_fields_captured_with_first_node_only() {
        let mut doc = document();
        let mut path = PathBuilder::new();

        path.double_click(&doc, spot(0), RADIUS, |_| true).unwrap();
        let mut first = request(NodeKind::Home, "HOME");
        first.mission_name = "survey".into();
        first.mission_type = "infinity".into();
        path.submit(&mut doc, &first).unwrap();

        path.double_click(&doc, spot(1), RADIUS, |_| true).unwrap();
        let mut second = request(NodeKind::Waypoint, "W1");
        second.mission_name = "renamed".into();
        second.mission_type = "linear".into();
        path.submit(&mut doc, &second).unwrap();

        assert_eq!(doc.metadata().mission_name, "survey");
        assert_eq!(doc.metadata().mission_type.kind, MissionKind::Infinity);
    }

    #[test]
    fn double_click_on_home_ends_mission() {
        let mut doc = document();
        let mut path = PathBuilder::new();
        place(&mut path, &mut doc, spot(0), NodeKind::Home, "HOME");
        place(&mut path, &mut doc, spot(1), NodeKind::Waypoint, "W1");
        place(&mut path, &mut doc, spot(2), NodeKind::Waypoint, "W2");

        let near_home = LatLng::new(0.000_05, 0.0);
        assert_eq!(
            path.double_click(&doc, near_home, RADIUS, |_| true).unwrap(),
            DoubleClick::Closed(Closure::Ended)
        );
        assert_eq!(
            path.polyline(&doc).unwrap(),
            vec![spot(0), spot(1), spot(2), spot(0)]
        );
    }

    #[test]
    fn home_wins_over_last_node() {
        let mut doc = document();
        let mut path = PathBuilder::new();
        place(&mut path, &mut doc, spot(0), NodeKind::Waypoint, "W1");
        place(&mut path, &mut doc, spot(1), NodeKind::Home, "HOME");

        assert_eq!(
            path.double_click(&doc, spot(1), RADIUS, |_| true).unwrap(),
            DoubleClick::Closed(Closure::Ended)
        );
        // Ended always returns to the first node, wherever home sits.
        assert_eq!(path.polyline(&doc).unwrap(), vec![spot(0), spot(1), spot(0)]);
    }

    #[test]
    fn double_click_on_last_node_closes_loop() {
        let mut doc = document();
        let mut path = PathBuilder::new();
        place(&mut path, &mut doc, spot(0), NodeKind::Waypoint, "W1");
        place(&mut path, &mut doc, spot(1), NodeKind::Waypoint, "W2");

        assert_eq!(
            path.double_click(&doc, spot(1), RADIUS, |_| true).unwrap(),
            DoubleClick::Closed(Closure::ClosedLoop { index: 1 })
        );
        assert_eq!(path.polyline(&doc).unwrap(), vec![spot(0), spot(1), spot(1)]);
    }

    #[test]
    fn double_click_on_earlier_node_detects_loop() {
        let mut doc = document();
        let mut path = PathBuilder::new();
        for i in 0..4 {
            place(&mut path, &mut doc, spot(i), NodeKind::Waypoint, &format!("W{i}"));
        }

        assert_eq!(
            path.double_click(&doc, spot(1), RADIUS, |_| true).unwrap(),
            DoubleClick::Closed(Closure::LoopDetected { index: 1 })
        );
        assert_eq!(path.polyline(&doc).unwrap().last(), Some(&spot(1)));
    }

    #[test]
    fn closed_path_is_frozen() {
        let mut doc = document();
        let mut path = PathBuilder::new();
        place(&mut path, &mut doc, spot(0), NodeKind::Home, "HOME");
        place(&mut path, &mut doc, spot(1), NodeKind::Waypoint, "W1");
        path.double_click(&doc, spot(1), RADIUS, |_| true).unwrap();
        let closure = path.closure();

        // Neither a new position nor a different closure is accepted.
        assert_eq!(
            path.double_click(&doc, spot(5), RADIUS, |_| true),
            Err(Rejection::PathClosed)
        );
        assert_eq!(
            path.double_click(&doc, spot(0), RADIUS, |_| true),
            Err(Rejection::PathClosed)
        );
        assert_eq!(
            path.submit(&mut doc, &request(NodeKind::Waypoint, "W2")),
            Err(Rejection::PathClosed)
        );
        assert_eq!(path.closure(), closure);
    }

    #[test]
    fn closing_discards_pending_position() {
        let mut doc = document();
        let mut path = PathBuilder::new();
        place(&mut path, &mut doc, spot(0), NodeKind::Waypoint, "W1");
        path.double_click(&doc, spot(3), RADIUS, |_| true).unwrap();

        path.double_click(&doc, spot(0), RADIUS, |_| true).unwrap();
        assert!(path.pending().is_none());
        assert_eq!(
            path.state(&doc),
            PathState::Closed(Closure::ClosedLoop { index: 0 })
        );
    }

    #[test]
    fn no_polyline_below_two_nodes() {
        let mut doc = document();
        let mut path = PathBuilder::new();
        assert!(path.polyline(&doc).is_none());
        place(&mut path, &mut doc, spot(0), NodeKind::Waypoint, "W1");
        assert!(path.polyline(&doc).is_none());
    }
}
