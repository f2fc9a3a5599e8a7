//! Mission metadata: naming, versioning, and mission type.

use std::fmt;

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use serde::{Deserialize, Serialize};

use crate::geometry::LatLng;

/// Descriptive metadata carried into the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionMetadata {
    /// UTC calendar date the session (or its last clear) started.
    pub date: Date,
    pub mission_name: String,
    pub version: String,
    pub author: String,
    pub mission_type: MissionType,
}

impl MissionMetadata {
    /// Fresh metadata dated today (UTC).
    pub fn new(version: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            date: today_utc(),
            mission_name: String::new(),
            version: version.into(),
            author: author.into(),
            mission_type: MissionType::default(),
        }
    }
}

/// The mission's shape and, for infinity missions, where it is serviced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionType {
    #[serde(rename = "type")]
    pub kind: MissionKind,

    /// Filled at export time for infinity missions with at least one node.
    pub service_location: Option<LatLng>,
}

/// The mission type selected on the form.
///
/// Serialized as a bare string; unknown values round-trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MissionKind {
    /// Nothing selected (`""`).
    #[default]
    Unspecified,

    /// Runs the path once.
    Linear,

    /// Repeats the path; serviced at the first node.
    Infinity,

    /// Any other form value.
    Other(String),
}

impl MissionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unspecified => "",
            Self::Linear => "linear",
            Self::Infinity => "infinity",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for MissionKind {
    fn from(value: String) -> Self {
        match value.trim() {
            "" => Self::Unspecified,
            "linear" => Self::Linear,
            "infinity" => Self::Infinity,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<&str> for MissionKind {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<MissionKind> for String {
    fn from(kind: MissionKind) -> Self {
        match kind {
            MissionKind::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for MissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn today_utc() -> Date {
    Timestamp::now().to_zoned(TimeZone::UTC).date()
}
