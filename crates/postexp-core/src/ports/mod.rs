//! Ports - 抽象化レイヤー
//!
//! ホスト（CMS）側の機能を trait として定義します。
//! コアはホストのフック機構にもストレージにも依存しません。

pub mod authorizer;
pub mod clock;
pub mod meta_store;

pub use self::authorizer::{Actor, Authorizer, Capability};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::meta_store::MetaStore;
