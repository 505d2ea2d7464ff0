//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryMetaStore**: HashMap ベースのメタ保存先
//! - **RoleAuthorizer**: ロールごとの固定権限表
//!
//! Clock の実装は ports::clock にあります。

pub mod inmem_meta;
pub mod role_authorizer;

pub use self::inmem_meta::InMemoryMetaStore;
pub use self::role_authorizer::RoleAuthorizer;
