//! Participation state of a tracked folder

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a tracked folder
///
/// A folder that is not tracked has no state at all; it is simply absent
/// from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderState {
    /// Participating in test runs
    #[default]
    Active,
    /// Excluded by the user but still remembered
    Ignored,
}

impl FolderState {
    pub fn is_active(&self) -> bool {
        *self == Self::Active
    }

    pub fn is_ignored(&self) -> bool {
        *self == Self::Ignored
    }

    /// Get short display name
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Ignored => "ignored",
        }
    }
}

impl From<bool> for FolderState {
    fn from(active: bool) -> Self {
        if active {
            Self::Active
        } else {
            Self::Ignored
        }
    }
}

impl fmt::Display for FolderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_state() {
        for state in [FolderState::Active, FolderState::Ignored] {
            assert_ne!(state.is_active(), state.is_ignored());
        }
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(FolderState::from(true), FolderState::Active);
        assert_eq!(FolderState::from(false), FolderState::Ignored);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&FolderState::Ignored).unwrap();
        assert_eq!(json, "\"ignored\"");
        assert_eq!(FolderState::Active.to_string(), "active");
    }
}
