//! postexp-core
//!
//! Expiration-date policy for posts, plus the adapter layer that wires it
//! into a host CMS.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（timestamp, expiry, sanitized, errors, ids, post, zone）
//! - **policy**: ExpirationPolicy（書き込み時の検証・読み取り時の期限判定）
//! - **ports**: 抽象化レイヤー（Clock, MetaStore, Authorizer）
//! - **impls**: 実装（InMemoryMetaStore, RoleAuthorizer）
//! - **app**: ホスト連携（フィールド登録, 書き込み, REST 整形）
//! - **config**: TOML 設定

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod policy;
pub mod ports;

pub use self::config::{Config, ConfigError};
pub use self::policy::ExpirationPolicy;
