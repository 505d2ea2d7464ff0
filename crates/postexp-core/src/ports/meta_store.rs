//! MetaStore port - 投稿メタデータの保存先
//!
//! The host owns persistence; the adapter only needs single-valued string
//! meta per post. Deleting a post is the host's business.

use crate::domain::PostId;

/// Single-valued string meta attached to posts.
pub trait MetaStore: Send + Sync {
    /// Stored value, or `None` when the key was never written.
    fn get(&self, post: PostId, key: &str) -> Option<String>;

    fn set(&self, post: PostId, key: &str, value: String);

    /// Returns whether a value was present.
    fn delete(&self, post: PostId, key: &str) -> bool;
}
