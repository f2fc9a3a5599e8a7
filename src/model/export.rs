//! Exchange format: the document handed to the downstream executor.
//!
//! Field names and nesting are fixed by the consumer; do not rename.

use serde::{Deserialize, Serialize};

use super::{MissionMetadata, NodeKind};
use crate::geometry::LatLng;

/// The exported mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub metadata: MissionMetadata,
    pub mission_status: MissionStatus,
    pub work_zone: ExportedWorkZone,
    pub mission_path: Vec<ExportedNode>,
    pub safety_docks: Vec<ExportedDock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionStatus {
    pub mission_ended: bool,
    pub loop_detected: bool,
    pub has_work_zone: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedWorkZone {
    pub enabled: bool,
    pub points: Vec<LatLng>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub coordinates: LatLng,
    pub task: String,
    pub hold_time: HoldTime,
    pub task_duration: Option<TaskDuration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedDock {
    pub id: String,
    pub name: String,
    pub coordinates: LatLng,
    pub hold_time: HoldTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldTime {
    pub duration: u32,
    pub unit: TimeUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDuration {
    pub expected_time: u32,
    pub unit: TimeUnit,
}

/// Every duration in the exchange format is in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Seconds,
}
