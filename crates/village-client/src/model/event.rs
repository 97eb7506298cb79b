use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A village event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub event_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub is_cancelled: bool,
    #[serde(default)]
    pub requires_registration: Option<bool>,
    /// Free-form recurrence hint such as `weekly`.
    #[serde(default)]
    pub recurrence_pattern: Option<String>,
}

impl Event {
    /// Returns true if attendees have to register before the event.
    pub fn needs_registration(&self) -> bool {
        self.requires_registration.unwrap_or(false)
    }
}

/// Body of `POST /events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub event_date: Timestamp,
    #[serde(default)]
    pub requires_registration: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_pattern: Option<String>,
}

impl NewEvent {
    /// Creates an event with only the required fields set.
    pub fn new(title: impl Into<String>, event_date: Timestamp) -> Self {
        Self {
            title: title.into(),
            description: None,
            location: None,
            event_date,
            requires_registration: false,
            recurrence_pattern: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets whether participants must register.
    pub fn with_registration(mut self, required: bool) -> Self {
        self.requires_registration = required;
        self
    }
}

/// Body of `PUT /events/:id`; only set fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_cancelled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_registration: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_pattern: Option<String>,
}

impl EventUpdate {
    /// Update that only flips the cancellation flag.
    pub fn cancel() -> Self {
        Self {
            is_cancelled: Some(true),
            ..Self::default()
        }
    }
}

/// Query parameters for `GET /events`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventQuery {
    /// Free-text search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Only events that have not happened yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upcoming: Option<bool>,
}

impl EventQuery {
    /// All events.
    pub fn all() -> Self {
        Self::default()
    }

    /// Upcoming events only.
    pub fn upcoming() -> Self {
        Self {
            upcoming: Some(true),
            ..Self::default()
        }
    }

    /// Adds a free-text search term.
    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_event() {
        let json = r#"{
            "id": "7d0e3c4a-8a66-4b71-a0b5-2b0f0c8f4d11",
            "title": "Gotong Royong",
            "description": "Bersih-bersih lingkungan desa",
            "location": "Balai Desa",
            "event_date": "2025-11-12T08:00:00+07:00",
            "created_at": "2025-11-01T02:00:00+00:00",
            "updated_at": "2025-11-01T02:00:00+00:00",
            "is_cancelled": false,
            "requires_registration": null
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.title, "Gotong Royong");
        assert!(!event.needs_registration());
        assert!(event.recurrence_pattern.is_none());
        assert_eq!(
            event.event_date,
            "2025-11-12T01:00:00Z".parse::<Timestamp>().unwrap()
        );
    }

    #[test]
    fn test_cancel_update_body() {
        let json = serde_json::to_value(EventUpdate::cancel()).unwrap();
        assert_eq!(json, serde_json::json!({"is_cancelled": true}));
    }

    #[test]
    fn test_new_event_body() {
        let date: Timestamp = "2025-11-12T01:00:00Z".parse().unwrap();
        let event = NewEvent::new("Posyandu", date)
            .with_location("Balai Desa")
            .with_registration(true);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["title"], "Posyandu");
        assert_eq!(json["location"], "Balai Desa");
        assert_eq!(json["requires_registration"], true);
        assert!(json.get("description").is_none());
    }
}
