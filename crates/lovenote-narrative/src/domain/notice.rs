//! Passive user notifications.

use serde::{Deserialize, Serialize};

/// How a notice should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// The proposal was accepted.
    Celebration,
    /// Background confirmation.
    Info,
    /// Something went wrong but nothing is blocked.
    Warning,
}

/// A toast-style message. Notices never block or alter the narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Styling hint.
    pub level: NoticeLevel,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub description: String,
}

/// Notice text as written in a script; the level is implied by its slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoticeText {
    /// Short headline.
    pub title: String,
    /// Body text.
    pub description: String,
}

impl NoticeText {
    /// Attaches a level.
    #[must_use]
    pub fn at(&self, level: NoticeLevel) -> Notice {
        Notice {
            level,
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}
