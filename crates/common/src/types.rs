// Core domain types shared across all Quire crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document record as the remote store returns it.
///
/// The store's identifier lives in its own namespace; it is never mixed
/// with the session-local numeric document ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteFile {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// The authenticated account, as returned by `GET /me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_file_decodes_store_field_names() {
        let raw = r#"{
            "_id": "66f0a1",
            "title": "X",
            "content": "hi",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;

        let file: RemoteFile = serde_json::from_str(raw).unwrap();
        assert_eq!(file.id, "66f0a1");
        assert_eq!(file.title, "X");
        assert_eq!(file.content, "hi");
        assert_eq!(file.updated_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn user_decodes_store_field_names() {
        let raw = r#"{
            "_id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-06-01T00:00:00Z"
        }"#;

        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.name, "Ada");
    }
}
