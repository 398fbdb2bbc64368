use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ball numbers run from 1 to the configured ball count
pub type BallNumber = u32;

pub const MIN_BALLS: u32 = 1;
pub const MAX_BALLS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub id: Uuid,
    pub text: String,
    pub count: u32,
}

impl Outcome {
    pub fn new(text: impl Into<String>, count: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            count,
        }
    }

    pub fn blank() -> Self {
        Self::new(String::new(), 0)
    }
}

/// One entry of the per-ball outcome picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOption {
    pub text: String,
    pub assigned: usize,
    pub capacity: u32,
    pub selected: bool,
    pub selectable: bool,
}

/// Result of a completed draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub ball: BallNumber,
    pub outcome: String,
}

/// Inconsistencies the editor tolerates but the operator should see
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigIssue {
    /// More balls allotted to outcomes than exist
    Overallotted { excess: u32 },
    /// Assignment whose label no longer matches any outcome
    OrphanedAssignment { ball: BallNumber, text: String },
    DuplicateLabel { text: String },
    BlankLabel { index: usize },
    BallOutOfRange { ball: BallNumber },
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overallotted { excess } => {
                write!(f, "outcomes claim {} more balls than exist", excess)
            }
            Self::OrphanedAssignment { ball, text } => {
                write!(f, "ball {} points at unknown outcome '{}'", ball, text)
            }
            Self::DuplicateLabel { text } => write!(f, "label '{}' is used twice", text),
            Self::BlankLabel { index } => write!(f, "outcome #{} has no label", index + 1),
            Self::BallOutOfRange { ball } => {
                write!(f, "ball {} is assigned but no longer exists", ball)
            }
        }
    }
}
