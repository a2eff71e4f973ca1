use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockMethod {
    Payment,
    Passcode,
}

impl UnlockMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnlockMethod::Payment => "payment",
            UnlockMethod::Passcode => "passcode",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_method: Option<UnlockMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Emails are stored lower-cased so lookups are case-insensitive.
    pub fn new(email: &str) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            email: email.trim().to_lowercase(),
            unlocked: false,
            unlock_method: None,
            unlocked_at: None,
            created_at: Some(Utc::now()),
        }
    }
}
