use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Five-level priority scale, ordered from `VeryLow` to `VeryHigh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::VeryLow,
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::VeryHigh,
    ];

    /// Next level up; `VeryHigh` saturates.
    pub fn escalate(self) -> Self {
        match self {
            Priority::VeryLow => Priority::Low,
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High | Priority::VeryHigh => Priority::VeryHigh,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::VeryLow => "VERY_LOW",
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::VeryHigh => "VERY_HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = PriorityParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|level| level.label() == value)
            .ok_or_else(|| PriorityParseError(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a priority level (expected VERY_LOW, LOW, MEDIUM, HIGH or VERY_HIGH)")]
pub struct PriorityParseError(pub String);
