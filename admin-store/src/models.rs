use serde::{Deserialize, Serialize};

// ==================== Модели постов ====================

/// A row of the remote posts table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub cover_image: Option<String>,
    pub content: String,
    pub slug: String,
    /// Stamped by the store on insert; never written from here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Payload for inserting a new row. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub cover_image: Option<String>,
    pub content: String,
    pub slug: String,
}

/// Payload for updating a row in place. All written fields are replaced,
/// including the slug re-derived from the current title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: String,
    pub author: String,
    pub cover_image: Option<String>,
    pub content: String,
    pub slug: String,
}
