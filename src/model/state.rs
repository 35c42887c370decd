//! Visual state of a single element

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SortError;

/// Mutually exclusive visual state the renderer projects into a treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ElementState {
    /// Not involved in the current step
    #[default]
    Inactive,
    /// Being looked at (scan pointer, pivot, heap root)
    Active,
    /// Mid-swap or mid-write
    Swapping,
    /// Final sorted position confirmed
    Done,
}

impl ElementState {
    /// Get all states
    pub fn all() -> &'static [ElementState] {
        &[
            ElementState::Inactive,
            ElementState::Active,
            ElementState::Swapping,
            ElementState::Done,
        ]
    }

    /// Tag used by renderers and in settings files
    pub fn tag(&self) -> &'static str {
        match self {
            ElementState::Inactive => "inactive",
            ElementState::Active => "active",
            ElementState::Swapping => "swapping",
            ElementState::Done => "done",
        }
    }
}

impl std::fmt::Display for ElementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ElementState {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementState::all()
            .iter()
            .copied()
            .find(|state| state.tag() == s)
            .ok_or_else(|| SortError::InvalidState(s.to_string()))
    }
}
