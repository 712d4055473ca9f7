//! Journal note model.
//!
//! A [`NoteStub`] is a partially-filled note record: proposed by the
//! milestone engine on prompt acceptance, or created directly by the note
//! and photo surfaces, then editable before final save. Once delivered to
//! the editor, ownership transfers to the persistence layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Card color for notes created from a milestone prompt.
pub const MILESTONE_COLOR: &str = "#BAFFC9";

/// Card color for notes created from a photo capture.
pub const PHOTO_COLOR: &str = "#BAE1FF";

/// Fixed pastel palette for manually created notes.
pub const PALETTE: [&str; 5] = ["#FFB3BA", "#FFDFBA", "#FFFFBA", "#BAFFC9", "#BAE1FF"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteStub {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
    /// One of the fixed palette colors.
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

impl NoteStub {
    /// A manually created note.
    pub fn new(title: impl Into<String>, content: impl Into<String>, color: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            timestamp: Utc::now().timestamp_millis(),
            color: color.to_string(),
            image_uri: None,
        }
    }

    /// The stub proposed when a milestone prompt is accepted: titled after
    /// the crossed threshold, empty content, fixed color, no image.
    pub fn milestone(steps: u32, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: format!("{steps} Steps Milestone"),
            content: String::new(),
            timestamp: at.timestamp_millis(),
            color: MILESTONE_COLOR.to_string(),
            image_uri: None,
        }
    }

    /// A note wrapping a captured photo.
    pub fn photo(image_uri: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            content: String::new(),
            timestamp: at.timestamp_millis(),
            color: PHOTO_COLOR.to_string(),
            image_uri: Some(image_uri.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestone_stub_shape() {
        let at = Utc::now();
        let stub = NoteStub::milestone(5000, at);
        assert_eq!(stub.title, "5000 Steps Milestone");
        assert!(stub.content.is_empty());
        assert_eq!(stub.color, MILESTONE_COLOR);
        assert!(stub.image_uri.is_none());
        assert_eq!(stub.timestamp, at.timestamp_millis());
    }

    #[test]
    fn stubs_get_unique_ids() {
        let at = Utc::now();
        let a = NoteStub::milestone(10, at);
        let b = NoteStub::milestone(10, at);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn photo_stub_carries_image() {
        let stub = NoteStub::photo("photos/walk.jpg", Utc::now());
        assert_eq!(stub.color, PHOTO_COLOR);
        assert_eq!(stub.image_uri.as_deref(), Some("photos/walk.jpg"));
    }

    #[test]
    fn serialization_omits_missing_image() {
        let stub = NoteStub::new("Title", "Body", PALETTE[0]);
        let json = serde_json::to_string(&stub).unwrap();
        assert!(!json.contains("image_uri"));
    }
}
