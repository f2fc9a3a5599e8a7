//! Mission building: the document and the two state machines that edit it.

mod document;
mod path;
mod validate;
mod zone;

use thiserror::Error;

pub use document::{MissionDocument, Placed};
pub use path::{Closure, DoubleClick, PathBuilder, PathState};
pub use validate::{ValidationError, is_valid_identifier, parse_clock, validate};
pub use zone::{DrawOutcome, DrawerState, MIN_ZONE_POINTS, WorkZoneDrawer, ZoneError};

/// Why an event was refused. Nothing in the session changes on any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("point outside work zone")]
    OutsideWorkZone,

    #[error("no node position chosen; double-click the map first")]
    NoPendingPosition,

    #[error("mission path is closed; clear the mission to start over")]
    PathClosed,

    #[error("mission planner mode is disabled")]
    MissionModeDisabled,

    #[error(transparent)]
    Zone(#[from] ZoneError),
}
