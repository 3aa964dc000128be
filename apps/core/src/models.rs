use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// Timestamps are stored and returned as RFC 3339 UTC strings with microseconds,
/// which keeps lexical and chronological order identical.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Represents a registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// The unique identifier for the user (UUID).
    pub id: String,
    /// Unique login name.
    pub username: String,
    /// Argon2id PHC string. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// RFC 3339 timestamp of registration.
    pub created_at: String,
}

/// User as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            created_at: Some(user.created_at.clone()),
        }
    }
}

/// Represents a single journal entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub content: String,
    /// Free-form mood label, "neutral" when none was given.
    pub mood: String,
    pub timestamp: String,
}

/// Represents one mood check-in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoodEntry {
    pub id: String,
    pub user_id: String,
    pub mood: String,
    pub note: String,
    pub timestamp: String,
}

/// A stored language model reply to a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TherapeuticResponse {
    pub id: String,
    pub journal_entry: String,
    pub therapeutic_response: String,
    pub timestamp: String,
}

/// A stored crisis interaction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CrisisInteractionRecord {
    pub id: String,
    pub user_id: String,
    /// Matched keywords in lexicon order.
    pub keywords_detected: Json<Vec<String>>,
    /// Recommended exercise names; order carries no meaning.
    pub exercises_recommended: Json<Vec<String>>,
    pub timestamp: String,
}

// --- Request payloads ---

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Credentials {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewJournalEntry {
    #[serde(default)]
    pub content: String,
    pub mood: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMoodEntry {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub mood: String,
    #[serde(default)]
    pub note: String,
}

/// Body shared by the crisis check and the therapeutic response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JournalContent {
    #[serde(default)]
    pub content: Option<String>,
}

impl JournalContent {
    /// The entry text, or `None` when it is missing, null or empty.
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: "u1".to_string(),
            username: "alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_credentials_validation() {
        let missing: Credentials = serde_json::from_str(r#"{"username": "bob"}"#).unwrap();
        assert!(missing.validate().is_err());

        let complete: Credentials =
            serde_json::from_str(r#"{"username": "bob", "password": "pw"}"#).unwrap();
        assert!(complete.validate().is_ok());
    }

    #[test]
    fn test_content_missing_null_or_empty_has_no_text() {
        for raw in [r#"{}"#, r#"{"content": null}"#, r#"{"content": ""}"#] {
            let body: JournalContent = serde_json::from_str(raw).unwrap();
            assert_eq!(body.text(), None, "body: {}", raw);
        }

        let body: JournalContent = serde_json::from_str(r#"{"content": "panic"}"#).unwrap();
        assert_eq!(body.text(), Some("panic"));
    }
}
