use serde::{Deserialize, Serialize};

/// Valid task id range. Ids are unique within their owning project only,
/// never across projects.
pub const TASK_ID_RANGE: std::ops::RangeInclusive<u8> = 1..=99;

/// Valid task duration range, in hours.
pub const DURATION_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// One unit of work belonging to exactly one project.
///
/// Tasks are created incomplete and flip to complete exactly once; the id and
/// kind never change after creation (rename/retype are not supported
/// operations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u8,
    pub description: String,
    pub kind: TaskKind,
    pub duration_hours: u32,
    pub completed: bool,
}

impl Task {
    /// Create an incomplete task.
    pub fn new(id: u8, description: impl Into<String>, kind: TaskKind, duration_hours: u32) -> Self {
        Self {
            id,
            description: description.into(),
            kind,
            duration_hours,
            completed: false,
        }
    }
}

/// The category of work a task represents.
///
/// Encoded as a single letter (`A`/`S`/`L`) in the persisted text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Admin,
    Support,
    Logistics,
}

impl TaskKind {
    /// Every kind, in reporting order.
    pub const ALL: [TaskKind; 3] = [Self::Admin, Self::Support, Self::Logistics];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Support => "support",
            Self::Logistics => "logistics",
        }
    }

    /// The single-letter wire encoding.
    pub fn letter(&self) -> char {
        match self {
            Self::Admin => 'A',
            Self::Support => 'S',
            Self::Logistics => 'L',
        }
    }

    /// Parse the wire letter, accepting either case.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(Self::Admin),
            'S' => Some(Self::Support),
            'L' => Some(Self::Logistics),
            _ => None,
        }
    }
}

/// Result of marking a task completed.
///
/// Marking is idempotent, but the two paths are reported distinctly so the
/// shell can tell the operator which one happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The task was incomplete and is now complete.
    NowCompleted,
    /// The task was already complete; nothing changed.
    AlreadyCompleted,
}
