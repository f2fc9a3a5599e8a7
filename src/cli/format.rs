//! Output formatting for CLI display.

use crate::mission::{Closure, DrawerState, PathState, Rejection, ValidationError};
use crate::model::ExportDocument;
use crate::session::Session;

/// Format a rejection for the operator, with a hint where one helps.
pub(super) fn format_rejection(rejection: &Rejection) -> String {
    match rejection {
        Rejection::Validation(ValidationError::DuplicateId(id)) => {
            format!("ID must be unique: {id} is already placed")
        }
        Rejection::MissionModeDisabled => {
            "mission planner mode is disabled (add a toggleMission event)".to_string()
        }
        other => other.to_string(),
    }
}

pub(super) fn format_path_state(state: PathState) -> String {
    match state {
        PathState::Idle => "idle".to_string(),
        PathState::AwaitingNodeDetails { pending } => {
            format!("awaiting node details at {:.6}, {:.6}", pending.lat, pending.lng)
        }
        PathState::Active => "open".to_string(),
        PathState::Closed(Closure::Ended) => "ended at home".to_string(),
        PathState::Closed(Closure::ClosedLoop { index }) => format!("closed loop at #{index}"),
        PathState::Closed(Closure::LoopDetected { index }) => {
            format!("loop detected back to #{index}")
        }
    }
}

/// One-line summary of where a session stands.
pub(super) fn describe_session(session: &Session) -> String {
    let document = session.document();
    let zone = match session.drawer().state() {
        DrawerState::Closed => {
            let points = session.drawer().closed_zone().map_or(0, |z| z.points().len());
            format!("zone closed ({points} points)")
        }
        DrawerState::Drawing => {
            format!("zone drawing ({} points)", session.drawer().sketch().len())
        }
        DrawerState::Disabled => "no zone".to_string(),
    };
    let line = match session.polyline() {
        Some(vertices) => format!(" ({} vertices)", vertices.len()),
        None => String::new(),
    };
    format!(
        "{} node(s), {} dock(s), {zone}, path {}{line}",
        document.nodes().len(),
        document.docks().len(),
        format_path_state(session.path_state())
    )
}

/// One-line summary of an exported document.
pub(super) fn describe_export(document: &ExportDocument) -> String {
    let status = document.mission_status;
    let closure = if status.mission_ended {
        ", ended"
    } else if status.loop_detected {
        ", loop"
    } else {
        ""
    };
    format!(
        "{} node(s), {} dock(s){}{closure}",
        document.mission_path.len(),
        document.safety_docks.len(),
        if status.has_work_zone { ", zone" } else { "" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::geometry::LatLng;
    use crate::model::Event;

    #[test]
    fn format_path_states() {
        let cases = [
            (PathState::Idle, "idle"),
            (PathState::Active, "open"),
            (PathState::Closed(Closure::Ended), "ended at home"),
            (
                PathState::Closed(Closure::ClosedLoop { index: 3 }),
                "closed loop at #3",
            ),
            (
                PathState::Closed(Closure::LoopDetected { index: 1 }),
                "loop detected back to #1",
            ),
        ];
        for (state, expected) in cases {
            assert_eq!(format_path_state(state), expected);
        }
    }

    #[test]
    fn format_pending_state() {
        let state = PathState::AwaitingNodeDetails {
            pending: LatLng::new(1.5, -2.25),
        };
        assert_eq!(
            format_path_state(state),
            "awaiting node details at 1.500000, -2.250000"
        );
    }

    #[test]
    fn format_duplicate_rejection() {
        let rejection = Rejection::Validation(ValidationError::DuplicateId("W1".into()));
        assert_eq!(
            format_rejection(&rejection),
            "ID must be unique: W1 is already placed"
        );
        assert_eq!(
            format_rejection(&Rejection::OutsideWorkZone),
            "point outside work zone"
        );
    }

    #[test]
    fn describe_fresh_session() {
        let mut session = Session::default();
        assert_eq!(
            describe_session(&session),
            "0 node(s), 0 dock(s), no zone, path idle"
        );
        session.handle(&Event::ToggleWorkZone).unwrap();
        session
            .handle(&Event::Click {
                at: LatLng::new(0.0, 0.0),
            })
            .unwrap();
        assert_eq!(
            describe_session(&session),
            "0 node(s), 0 dock(s), zone drawing (1 points), path idle"
        );
    }
}
