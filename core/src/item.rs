//! The feedback item data model.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// The kind of a collected feedback item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Text,
    Image,
}

/// One unit of human input: a text string or a reference to a saved image
/// file, with the timestamp at which it was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub kind: ItemKind,
    /// Literal text for [`ItemKind::Text`]; absolute filesystem path of the
    /// saved file for [`ItemKind::Image`].
    pub content: String,
    /// Recorded at the moment the item is accepted, not at session end.
    pub timestamp: DateTime<Local>,
}

impl FeedbackItem {
    /// Creates a text item stamped with the current time.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Text,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    /// Creates an image item referencing `path`, stamped with the current
    /// time. Callers persist the file before constructing the item.
    pub fn image(path: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Image,
            content: path.into(),
            timestamp: Local::now(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind == ItemKind::Image
    }
}
