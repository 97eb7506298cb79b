use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A public announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /announcements` and `PUT /announcements/:id`; updates
/// replace both fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementDraft {
    pub title: String,
    pub body: String,
}

impl AnnouncementDraft {
    /// Creates a draft with a title and body.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}
