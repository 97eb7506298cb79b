use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// How often a recurring event repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Frequency {
    /// Does not repeat.
    #[default]
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    Never,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Recurrence schedule attached to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurrence {
    pub id: Uuid,
    pub event_id: Uuid,
    pub start_date: Timestamp,
    pub frequency: Frequency,
    /// Repeat every `interval` units of `frequency`.
    pub interval: u32,
    #[serde(default)]
    pub day_of_month: Option<u8>,
    #[serde(default)]
    pub repeat_until: Option<Timestamp>,
    pub active: bool,
}

/// Body of `POST /recurrences`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecurrence {
    pub event_id: Uuid,
    pub start_date: Timestamp,
    pub frequency: Frequency,
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_until: Option<Timestamp>,
    pub active: bool,
}

impl NewRecurrence {
    /// An active schedule repeating every single `frequency` unit.
    pub fn new(event_id: Uuid, start_date: Timestamp, frequency: Frequency) -> Self {
        Self {
            event_id,
            start_date,
            frequency,
            interval: 1,
            day_of_month: None,
            repeat_until: None,
            active: true,
        }
    }

    /// Sets the last date the event repeats.
    pub fn until(mut self, repeat_until: Timestamp) -> Self {
        self.repeat_until = Some(repeat_until);
        self
    }
}

/// Body of `PUT /recurrences/:id`; only set fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_until: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
