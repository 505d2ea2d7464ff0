//! Post record as the host hands it to the adapter layer.

use serde::{Deserialize, Serialize};

use super::ids::PostId;

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Publish,
    Private,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,

    /// Entity type the host files this record under (e.g. "post", "page").
    #[serde(rename = "type")]
    pub post_type: String,

    pub title: String,

    pub status: PostStatus,
}

impl Post {
    /// Convenience constructor for a published "post".
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: PostId::new(id),
            post_type: "post".to_string(),
            title: title.into(),
            status: PostStatus::Publish,
        }
    }

    pub fn with_type(mut self, post_type: impl Into<String>) -> Self {
        self.post_type = post_type.into();
        self
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }
}
