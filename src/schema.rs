use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").unwrap());

/// Invariant violations detected when a draft is promoted to a validated shape.
/// Validation is fail-closed: one bad field rejects the whole containing object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("time {0:?} does not match mm:ss")]
    TimeFormat(String),
    #[error("time {0:?} out of range: minutes and seconds must be 0-59")]
    TimeRange(String),
    #[error("distance {0:?} is not a non-negative integer")]
    Distance(String),
    #[error("repeat {0:?} is not a non-negative integer")]
    Repeat(String),
    #[error("unrecognized group title {0:?}")]
    GroupTitle(String),
}

// ── Draft shapes (unvalidated, produced by the parse pass) ──

/// Loose set item as split from a raw line. `distance` is a composite string
/// (e.g. "© 1X200") and `time` is unchecked; both are only validated when the
/// whole workout is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSetItem {
    pub distance: String,
    pub stroke: String,
    pub effort: String,
    pub time: String,
}

#[derive(Debug, Clone)]
pub struct DraftGroup {
    pub title: String,
    pub items: Vec<RawSetItem>,
    pub repeat: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct DraftWorkout {
    pub total_distance: String,
    pub total_time: String,
    pub set_groups: Vec<DraftGroup>,
}

// ── Validated shapes ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetItem {
    pub distance: u32,
    /// None means "no explicit repeat", serialized as null.
    pub repeat: Option<u32>,
    pub stroke: String,
    pub effort: String,
    /// Canonical minutes:seconds form, see [`canonical_time`].
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Closed set of group titles. Anything else fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupTitle {
    #[serde(rename = "WARMUP")]
    Warmup,
    #[serde(rename = "PRE SET")]
    PreSet,
    #[serde(rename = "MAIN SET")]
    MainSet,
    #[serde(rename = "COOL DOWN")]
    CoolDown,
}

impl GroupTitle {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "WARMUP" => Some(Self::Warmup),
            "PRE SET" => Some(Self::PreSet),
            "MAIN SET" => Some(Self::MainSet),
            "COOL DOWN" => Some(Self::CoolDown),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warmup => "WARMUP",
            Self::PreSet => "PRE SET",
            Self::MainSet => "MAIN SET",
            Self::CoolDown => "COOL DOWN",
        }
    }
}

impl fmt::Display for GroupTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetGroup {
    pub title: GroupTitle,
    pub items: Vec<SetItem>,
    pub repeat: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Verbatim line, e.g. "2200 metres". Never recomputed from items.
    pub total_distance: String,
    /// Verbatim line, e.g. "38 min".
    pub total_time: String,
    pub set_groups: Vec<SetGroup>,
}

/// Validate a time string and rewrite it in canonical form.
///
/// The input must match `^\d{1,2}:\d{2}$` with minutes and seconds both in
/// 0-59. The canonical form is `minutes:seconds` with both halves rendered as
/// plain integers, so `"09:05"` becomes `"9:5"`. The asymmetric padding is the
/// reference contract and is kept as-is.
pub fn canonical_time(raw: &str) -> Result<String, ValidationError> {
    let caps = TIME_RE
        .captures(raw)
        .ok_or_else(|| ValidationError::TimeFormat(raw.to_string()))?;
    // Two regex-guaranteed digit groups, cannot overflow u32.
    let minutes: u32 = caps[1].parse().unwrap();
    let seconds: u32 = caps[2].parse().unwrap();
    if minutes > 59 || seconds > 59 {
        return Err(ValidationError::TimeRange(raw.to_string()));
    }
    Ok(format!("{minutes}:{seconds}"))
}

/// Promote a loose item to a validated [`SetItem`]. The composite `distance`
/// must parse as a plain non-negative integer, which it never does when the
/// loose split glued two tokens together; the whole workout is then rejected.
pub fn validate_item(raw: &RawSetItem) -> Result<SetItem, ValidationError> {
    let distance = raw
        .distance
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::Distance(raw.distance.clone()))?;
    let time = canonical_time(&raw.time)?;
    Ok(SetItem {
        distance,
        repeat: None,
        stroke: raw.stroke.clone(),
        effort: raw.effort.clone(),
        time,
        note: None,
    })
}

/// Validate a fully assembled draft. Fail-closed: the first invalid title or
/// item rejects the entire workout.
pub fn validate_workout(draft: DraftWorkout) -> Result<Workout, ValidationError> {
    let mut set_groups = Vec::with_capacity(draft.set_groups.len());
    for group in &draft.set_groups {
        let title = GroupTitle::parse(&group.title)
            .ok_or_else(|| ValidationError::GroupTitle(group.title.clone()))?;
        let items = group
            .items
            .iter()
            .map(validate_item)
            .collect::<Result<Vec<_>, _>>()?;
        set_groups.push(SetGroup {
            title,
            items,
            repeat: group.repeat,
        });
    }
    Ok(Workout {
        total_distance: draft.total_distance,
        total_time: draft.total_time,
        set_groups,
    })
}
