//! User profile model and partial updates

use chrono::{DateTime, Utc};
use common::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How the account was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Email,
    Google,
    Github,
}

impl AccountType {
    /// Get the account type as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Email => "email",
            AccountType::Google => "google",
            AccountType::Github => "github",
        }
    }
}

/// Profile document stored in the `userProfiles` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub collaboration_preferences: Vec<String>,
    #[serde(default)]
    pub completed_profile: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
}

impl UserProfile {
    /// A fresh profile with every default populated
    pub fn new(user_id: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            display_name: String::new(),
            bio: String::new(),
            interests: Vec::new(),
            hobbies: Vec::new(),
            skills: Vec::new(),
            collaboration_preferences: Vec::new(),
            completed_profile: false,
            email: None,
            created_at: Some(created_at),
            updated_at: None,
            photo_url: None,
            account_type: None,
        }
    }

    /// Encode as a store document
    pub fn to_document(&self) -> Result<Document, serde_json::Error> {
        to_document(self)
    }

    /// Decode a store document
    pub fn from_document(doc: Document) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(doc))
    }
}

/// Partial profile update; only `Some` fields are written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaboration_preferences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_profile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        rename = "photoURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
}

impl ProfilePatch {
    /// Set `updatedAt`
    pub fn touched(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Drop the fields only account bootstrap may write
    pub fn without_immutable_fields(self) -> Self {
        Self {
            created_at: None,
            account_type: None,
            ..self
        }
    }

    /// Encode the set fields as a document
    pub fn to_document(&self) -> Result<Document, serde_json::Error> {
        to_document(self)
    }
}

fn to_document<T: Serialize>(value: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(serde::ser::Error::custom("expected a JSON object")),
    }
}
