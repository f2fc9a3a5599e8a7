//! Submission validation: turns a panel request into a node or dock.
//!
//! Pure functions. Nothing here touches the document; the caller inserts
//! the result only after every check has passed.

use thiserror::Error;

use crate::geometry::LatLng;
use crate::model::{MissionNode, NodeKind, NodeRequest, SafetyDock, TimeFields, split_clock};

use super::MissionDocument;

/// Why a submission was refused. The pending position is kept on all of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("all fields required")]
    MissingFields,

    #[error("ID and task may only use A-Z a-z 0-9 _ -")]
    InvalidIdentifier,

    #[error("ID must be unique: {0} is taken")]
    DuplicateId(String),

    #[error("only one home allowed")]
    SecondHome,

    #[error("invalid hold time (HH:MM:SS)")]
    InvalidHoldTime,

    #[error("invalid task duration (HH:MM:SS)")]
    InvalidTaskDuration,
}

/// A validated entity, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub enum NewEntity {
    Node(MissionNode),
    Dock(SafetyDock),
}

impl NewEntity {
    #[allow(dead_code)]
    pub fn id(&self) -> &str {
        match self {
            Self::Node(n) => &n.id,
            Self::Dock(d) => &d.id,
        }
    }
}

/// `^[A-Za-z0-9_-]+$`
pub fn is_valid_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Total seconds for three `HH`, `MM`, `SS` fields.
///
/// Empty fields count as zero. Minutes and seconds must be at most 59.
/// Any non-numeric component, or a total past `u32::MAX`, gives `None`.
pub fn parse_time(fields: &TimeFields) -> Option<u32> {
    let hours = parse_component(&fields.hours)?;
    let minutes = parse_component(&fields.minutes)?;
    let seconds = parse_component(&fields.seconds)?;
    if minutes > 59 || seconds > 59 {
        return None;
    }
    hours
        .checked_mul(3600)?
        .checked_add(minutes * 60)?
        .checked_add(seconds)
}

/// Total seconds for an `"H:M:S"` string.
pub fn parse_clock(text: &str) -> Option<u32> {
    parse_time(&split_clock(text)?)
}

fn parse_component(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Check a submission against the document and build the entity it describes.
///
/// Checks run in panel order: presence, identifier pattern, uniqueness,
/// single home, hold time, task duration.
pub fn validate(
    request: &NodeRequest,
    position: LatLng,
    document: &MissionDocument,
) -> Result<NewEntity, ValidationError> {
    let id = request.id.trim();
    let name = request.name.trim();
    let task = request.task.trim();

    let Some(kind) = request.kind else {
        return Err(ValidationError::MissingFields);
    };
    if id.is_empty() || name.is_empty() || task.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !is_valid_identifier(id) || !is_valid_identifier(task) {
        return Err(ValidationError::InvalidIdentifier);
    }
    if document.contains_id(id) {
        return Err(ValidationError::DuplicateId(id.to_string()));
    }
    if kind == NodeKind::Home && document.home().is_some() {
        return Err(ValidationError::SecondHome);
    }

    let hold_time_seconds = if kind == NodeKind::Hold {
        parse_time(&request.hold_time).ok_or(ValidationError::InvalidHoldTime)?
    } else {
        0
    };

    let task_duration_seconds = if kind.takes_task_duration() {
        Some(parse_time(&request.task_duration).ok_or(ValidationError::InvalidTaskDuration)?)
    } else {
        None
    };

    if kind == NodeKind::Safety {
        return Ok(NewEntity::Dock(SafetyDock {
            id: id.to_string(),
            name: name.to_string(),
            task: task.to_string(),
            position,
            hold_time_seconds,
        }));
    }

    Ok(NewEntity::Node(MissionNode {
        id: id.to_string(),
        name: name.to_string(),
        task: task.to_string(),
        kind,
        position,
        hold_time_seconds,
        task_duration_seconds,
    }))
}
