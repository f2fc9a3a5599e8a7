//! Node requests: what the side panel hands over on submit.

use serde::{Deserialize, Serialize};

use super::NodeKind;

/// The side-panel fields at the moment "create node" is pressed.
///
/// Strings are taken as typed; trimming and checking happen in validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeRequest {
    /// `None` when no category is selected.
    pub kind: Option<NodeKind>,
    pub id: String,
    pub name: String,
    pub task: String,

    /// Read only for `hold` nodes.
    pub hold_time: TimeFields,

    /// Read for every kind except `home` and `safety`.
    pub task_duration: TimeFields,

    /// Mission-level fields, captured when the first node is placed.
    pub mission_name: String,
    pub mission_type: String,
}

/// Three raw `HH`, `MM`, `SS` inputs.
///
/// Deserializes from either `{"hours", "minutes", "seconds"}` or a single
/// `"H:M:S"` string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimeFieldsRepr")]
pub struct TimeFields {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl TimeFields {
    pub fn new(hours: &str, minutes: &str, seconds: &str) -> Self {
        Self {
            hours: hours.to_string(),
            minutes: minutes.to_string(),
            seconds: seconds.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimeFieldsRepr {
    Clock(String),
    Fields {
        #[serde(default)]
        hours: String,
        #[serde(default)]
        minutes: String,
        #[serde(default)]
        seconds: String,
    },
}

impl TryFrom<TimeFieldsRepr> for TimeFields {
    type Error = String;

    fn try_from(repr: TimeFieldsRepr) -> Result<Self, Self::Error> {
        match repr {
            TimeFieldsRepr::Clock(text) => split_clock(&text)
                .ok_or_else(|| format!("expected H:M:S, got {text:?}")),
            TimeFieldsRepr::Fields {
                hours,
                minutes,
                seconds,
            } => Ok(Self {
                hours,
                minutes,
                seconds,
            }),
        }
    }
}

/// Split `"H:M:S"` into its three fields. The empty string is all-empty.
pub fn split_clock(text: &str) -> Option<TimeFields> {
    if text.trim().is_empty() {
        return Some(TimeFields::default());
    }
    match text.split(':').collect::<Vec<_>>().as_slice() {
        [h, m, s] => Some(TimeFields::new(h, m, s)),
        _ => None,
    }
}
