//! Mission export: building the exchange document and saving it.
//!
//! Building is pure. Saving writes one pretty-printed JSON file named after
//! the mission.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::{fs, io};

use crate::mission::{Closure, MIN_ZONE_POINTS, is_valid_identifier};
use crate::model::{
    ExportDocument, ExportedDock, ExportedNode, ExportedWorkZone, HoldTime, MissionKind,
    MissionStatus, NodeKind, TaskDuration, TimeUnit,
};
use crate::session::Session;

/// Errors that can occur while saving or loading an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, ExportError>;

/// Build the exchange document for the session's current state.
///
/// Infinity missions are serviced at the first path node; that location is
/// filled in here rather than when the node is placed.
pub fn export(session: &Session) -> ExportDocument {
    let document = session.document();
    let closure = session.path().closure();

    let mut metadata = document.metadata().clone();
    if metadata.mission_type.kind == MissionKind::Infinity
        && let Some(first) = document.nodes().first()
    {
        metadata.mission_type.service_location = Some(first.position);
    }

    let zone = session.drawer().closed_zone();

    ExportDocument {
        metadata,
        mission_status: MissionStatus {
            mission_ended: matches!(closure, Some(Closure::Ended)),
            loop_detected: matches!(closure, Some(Closure::LoopDetected { .. })),
            has_work_zone: zone.is_some(),
        },
        work_zone: ExportedWorkZone {
            enabled: zone.is_some(),
            points: zone.map(|z| z.points().to_vec()).unwrap_or_default(),
        },
        mission_path: document
            .nodes()
            .iter()
            .map(|n| ExportedNode {
                id: n.id.clone(),
                name: n.name.clone(),
                kind: n.kind,
                coordinates: n.position,
                task: n.task.clone(),
                hold_time: seconds(n.hold_time_seconds),
                // A zero expected time means "not given" to the consumer.
                task_duration: n
                    .task_duration_seconds
                    .filter(|&s| s > 0)
                    .map(|expected_time| TaskDuration {
                        expected_time,
                        unit: TimeUnit::Seconds,
                    }),
            })
            .collect(),
        safety_docks: document
            .docks()
            .iter()
            .map(|d| ExportedDock {
                id: d.id.clone(),
                name: d.name.clone(),
                coordinates: d.position,
                hold_time: seconds(d.hold_time_seconds),
            })
            .collect(),
    }
}

fn seconds(duration: u32) -> HoldTime {
    HoldTime {
        duration,
        unit: TimeUnit::Seconds,
    }
}

/// Pretty-printed JSON, two-space indent.
pub fn to_json(document: &ExportDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// `mission-plan-<name>.json`, with `unnamed` for an empty name.
///
/// Characters that can't appear in a file name are replaced with `_`.
pub fn file_name(document: &ExportDocument) -> String {
    let name = document.metadata.mission_name.trim();
    let name = if name.is_empty() {
        "unnamed".to_string()
    } else {
        name.chars()
            .map(|c| {
                let reserved = matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|');
                if c.is_control() || reserved {
                    '_'
                } else {
                    c
                }
            })
            .collect()
    };
    format!("mission-plan-{name}.json")
}

/// Write the document into `dir`, returning the file's path.
///
/// The directory is created if it doesn't exist. An existing file of the
/// same name is overwritten.
pub fn save(document: &ExportDocument, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(document));
    let mut json = to_json(document)?;
    json.push('\n');
    fs::write(&path, json)?;
    Ok(path)
}

/// Read an exported document back.
pub fn load(path: &Path) -> Result<ExportDocument> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// A rule an exported document breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    DuplicateId(String),
    InvalidIdentifier { id: String },
    InvalidTask { id: String },
    MultipleHomes(usize),
    ConflictingStatus,
    ZoneTooSmall(usize),
    ZoneFlagMismatch,
    HoldTimeOnNonHold { id: String },
    SafetyNodeInPath { id: String },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "id {id} is used more than once"),
            Self::InvalidIdentifier { id } => write!(f, "id {id:?} breaks the identifier pattern"),
            Self::InvalidTask { id } => write!(f, "task of {id} breaks the identifier pattern"),
            Self::MultipleHomes(n) => write!(f, "{n} home nodes, at most one allowed"),
            Self::ConflictingStatus => f.write_str("missionEnded and loopDetected are both set"),
            Self::ZoneTooSmall(n) => {
                write!(f, "work zone has {n} points, needs at least {MIN_ZONE_POINTS}")
            }
            Self::ZoneFlagMismatch => {
                f.write_str("missionStatus.hasWorkZone disagrees with workZone.enabled")
            }
            Self::HoldTimeOnNonHold { id } => {
                write!(f, "{id} has a hold time but is not a hold node")
            }
            Self::SafetyNodeInPath { id } => write!(f, "safety node {id} is in the mission path"),
        }
    }
}

/// Check an exported document against the rules a session enforces.
///
/// Useful on hand-edited files; a freshly exported document has no findings.
pub fn inspect(document: &ExportDocument) -> Vec<Finding> {
    let mut findings = Vec::new();

    let mut seen = HashSet::new();
    let ids = document
        .mission_path
        .iter()
        .map(|n| n.id.as_str())
        .chain(document.safety_docks.iter().map(|d| d.id.as_str()));
    for id in ids {
        if !is_valid_identifier(id) {
            findings.push(Finding::InvalidIdentifier { id: id.to_string() });
        }
        if !seen.insert(id) {
            findings.push(Finding::DuplicateId(id.to_string()));
        }
    }

    for node in &document.mission_path {
        if !is_valid_identifier(&node.task) {
            findings.push(Finding::InvalidTask {
                id: node.id.clone(),
            });
        }
        if node.kind != NodeKind::Hold && node.hold_time.duration > 0 {
            findings.push(Finding::HoldTimeOnNonHold {
                id: node.id.clone(),
            });
        }
        if node.kind == NodeKind::Safety {
            findings.push(Finding::SafetyNodeInPath {
                id: node.id.clone(),
            });
        }
    }

    let homes = document
        .mission_path
        .iter()
        .filter(|n| n.kind == NodeKind::Home)
        .count();
    if homes > 1 {
        findings.push(Finding::MultipleHomes(homes));
    }

    let status = document.mission_status;
    if status.mission_ended && status.loop_detected {
        findings.push(Finding::ConflictingStatus);
    }
    if status.has_work_zone != document.work_zone.enabled {
        findings.push(Finding::ZoneFlagMismatch);
    }
    let zone_points = document.work_zone.points.len();
    if document.work_zone.enabled && zone_points < MIN_ZONE_POINTS {
        findings.push(Finding::ZoneTooSmall(zone_points));
    }

    findings
}
