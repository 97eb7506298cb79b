use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl User {
    /// Best available label for the account: name, then email, then phone.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.email.as_deref())
            .or(self.phone.as_deref())
            .unwrap_or("")
    }
}

/// Partial account update; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_user() {
        let json = r#"{
            "id": "0b7b1c1e-3f7e-4c8e-9c62-6f1c8f7c2a10",
            "email": "user@example.com",
            "phone": null,
            "full_name": null,
            "is_admin": false,
            "is_active": true,
            "created_at": "2025-11-01T08:30:00.123456+00:00"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.email.as_deref(), Some("user@example.com"));
        assert_eq!(user.display_name(), "user@example.com");
        assert!(!user.is_admin);
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = UserUpdate {
            full_name: Some("Siti".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"full_name": "Siti"}));
    }
}
