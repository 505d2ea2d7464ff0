//! App - ホスト連携層
//!
//! ports を組み合わせて、ポリシーをホストの拡張ポイントに接続します。
//!
//! # 主要コンポーネント
//! - **PluginBuilder / Plugin**: フィールドとフィルタの登録（init フック相当）
//! - **MetaRegistry**: 登録済みフィールドの管理
//! - **MetaService**: 書き込み時の権限チェックとサニタイズ
//! - **PostSerializer / ExpiryResponseFilter**: REST レスポンスの整形

pub mod builder;
pub mod meta_field;
pub mod meta_service;
pub mod registry;
pub mod rest;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, Plugin, PluginBuilder};
pub use self::meta_field::{ExpirationField, FieldKey, MetaField, MetaFieldSpec, MetaValueType};
pub use self::meta_service::{MetaService, WriteError, WriteReport};
pub use self::registry::{MetaRegistry, RegistryError};
pub use self::rest::{ExpiryResponseFilter, IS_EXPIRED_KEY, PostSerializer, ResponseFilter};
