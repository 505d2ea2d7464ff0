//! InMemoryMetaStore - 開発用・テスト用のメタデータ保存先
//!
//! ホストの post meta テーブルの代わりに HashMap を使います。

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::PostId;
use crate::ports::MetaStore;

/// InMemoryMetaStore は (post, key) → value の単純なマップ
///
/// # 実装詳細
/// - RwLock で排他制御（読み取りは並行可能）
/// - 値は常に単一の String（single = true のメタのみ扱う）
#[derive(Debug, Default)]
pub struct InMemoryMetaStore {
    values: RwLock<HashMap<(PostId, String), String>>,
}

impl InMemoryMetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, mostly for tests.
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl MetaStore for InMemoryMetaStore {
    fn get(&self, post: PostId, key: &str) -> Option<String> {
        self.values.read().get(&(post, key.to_string())).cloned()
    }

    fn set(&self, post: PostId, key: &str, value: String) {
        self.values.write().insert((post, key.to_string()), value);
    }

    fn delete(&self, post: PostId, key: &str) -> bool {
        self.values.write().remove(&(post, key.to_string())).is_some()
    }
}
