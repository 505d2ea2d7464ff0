//! REST response shaping.
//!
//! `PostSerializer` builds the outgoing JSON for a post (core fields plus
//! REST-visible meta) and then hands it to each registered `ResponseFilter`.
//! `ExpiryResponseFilter` adds the derived `is_expired` flag.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use super::meta_service::MetaService;
use crate::domain::Post;
use crate::policy::ExpirationPolicy;
use crate::ports::{Clock, MetaStore};

/// Key added to the outgoing payload.
pub const IS_EXPIRED_KEY: &str = "is_expired";

/// Hook run on every serialized post before it leaves the API.
pub trait ResponseFilter: Send + Sync {
    fn filter(&self, post: &Post, response: &mut Map<String, Value>, now: DateTime<Utc>);
}

/// Adds `is_expired` when the stored expiration value can be read.
///
/// - empty / missing value: key omitted, nothing logged
/// - unparsable value: key omitted, warning with the post id
pub struct ExpiryResponseFilter {
    post_type: String,
    key: String,
    policy: ExpirationPolicy,
    store: Arc<dyn MetaStore>,
}

impl ExpiryResponseFilter {
    pub fn new(
        post_type: impl Into<String>,
        key: impl Into<String>,
        policy: ExpirationPolicy,
        store: Arc<dyn MetaStore>,
    ) -> Self {
        Self {
            post_type: post_type.into(),
            key: key.into(),
            policy,
            store,
        }
    }
}

impl ResponseFilter for ExpiryResponseFilter {
    fn filter(&self, post: &Post, response: &mut Map<String, Value>, now: DateTime<Utc>) {
        if post.post_type != self.post_type {
            return;
        }
        let stored = self.store.get(post.id, &self.key).unwrap_or_default();
        if stored.is_empty() {
            return;
        }

        // Non-empty and no flag means the stored value could not be parsed.
        match self.policy.is_expired(&stored, now).as_flag() {
            Some(flag) => {
                response.insert(IS_EXPIRED_KEY.to_string(), Value::Bool(flag));
            }
            None => warn!(
                post_id = %post.id,
                key = %self.key,
                value = %stored,
                "unparsable expiration value; is_expired omitted"
            ),
        }
    }
}

/// Serializes posts for the external API.
pub struct PostSerializer {
    meta: Arc<MetaService>,
    filters: Vec<Arc<dyn ResponseFilter>>,
    clock: Arc<dyn Clock>,
}

impl PostSerializer {
    pub fn new(
        meta: Arc<MetaService>,
        filters: Vec<Arc<dyn ResponseFilter>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            meta,
            filters,
            clock,
        }
    }

    /// `{"id", "type", "title", "status", "meta": {...}}` plus whatever the
    /// filters add. `now` is read once so every filter sees the same instant.
    pub fn serialize(&self, post: &Post) -> Value {
        let mut response = match serde_json::to_value(post) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        let meta: Map<String, Value> = self
            .meta
            .registry()
            .rest_fields(&post.post_type)
            .iter()
            .map(|field| {
                let key = field.spec().key.clone();
                let value = self.meta.read_meta(post, &key);
                (key, Value::String(value))
            })
            .collect();
        response.insert("meta".to_string(), Value::Object(meta));

        let now = self.clock.now();
        for filter in &self.filters {
            filter.filter(post, &mut response, now);
        }
        Value::Object(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryMetaStore;
    use crate::domain::PostId;
    use serde_json::json;

    const KEY: &str = "expiration_date";

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_704_067_200, 0).unwrap()
    }

    fn shape(stored: Option<&str>, post: &Post) -> Map<String, Value> {
        let store = Arc::new(InMemoryMetaStore::new());
        if let Some(v) = stored {
            store.set(post.id, KEY, v.to_string());
        }
        let filter = ExpiryResponseFilter::new("post", KEY, ExpirationPolicy::default(), store);
        let mut response = Map::new();
        response.insert("id".to_string(), json!(post.id));
        filter.filter(post, &mut response, now());
        response
    }

    #[test]
    fn past_value_sets_true() {
        let r = shape(Some("2020-01-01 00:00:00"), &Post::new(1, "a"));
        assert_eq!(r.get(IS_EXPIRED_KEY), Some(&json!(true)));
    }

    #[test]
    fn future_value_sets_false() {
        let r = shape(Some("2099-01-01 00:00:00"), &Post::new(1, "a"));
        assert_eq!(r.get(IS_EXPIRED_KEY), Some(&json!(false)));
    }

    #[test]
    fn empty_or_missing_value_omits_key() {
        assert!(!shape(Some(""), &Post::new(1, "a")).contains_key(IS_EXPIRED_KEY));
        assert!(!shape(None, &Post::new(1, "a")).contains_key(IS_EXPIRED_KEY));
    }

    #[test]
    fn unparsable_value_omits_key() {
        let r = shape(Some("someday"), &Post::new(1, "a"));
        assert!(!r.contains_key(IS_EXPIRED_KEY));
        assert_eq!(r.get("id"), Some(&json!(PostId::new(1))));
    }

    #[test]
    fn other_post_types_are_left_alone() {
        let page = Post::new(1, "a").with_type("page");
        assert!(!shape(Some("2020-01-01 00:00:00"), &page).contains_key(IS_EXPIRED_KEY));
    }

    /// Events recorded while shaping, as (level, field name → rendered value).
    mod captured {
        use std::collections::HashMap;
        use std::fmt;
        use std::sync::Arc;

        use parking_lot::Mutex;
        use tracing::field::{Field, Visit};
        use tracing::{Event, Level, Subscriber};
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

        pub type Record = (Level, HashMap<String, String>);

        #[derive(Clone, Default)]
        pub struct Collector {
            events: Arc<Mutex<Vec<Record>>>,
        }

        struct Fields<'a>(&'a mut HashMap<String, String>);

        impl Visit for Fields<'_> {
            fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
                self.0.insert(field.name().to_string(), format!("{value:?}"));
            }

            fn record_str(&mut self, field: &Field, value: &str) {
                self.0.insert(field.name().to_string(), value.to_string());
            }
        }

        impl<S: Subscriber> Layer<S> for Collector {
            fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
                let mut fields = HashMap::new();
                event.record(&mut Fields(&mut fields));
                self.events.lock().push((*event.metadata().level(), fields));
            }
        }

        /// Run `f` with a scoped subscriber and return what it logged.
        pub fn events_during(f: impl FnOnce()) -> Vec<Record> {
            let collector = Collector::default();
            let subscriber = tracing_subscriber::registry().with(collector.clone());
            tracing::subscriber::with_default(subscriber, f);
            collector.events.lock().clone()
        }
    }

    #[test]
    fn unparsable_value_warns_with_post_id() {
        let events = captured::events_during(|| {
            shape(Some("someday"), &Post::new(1, "a"));
        });
        let warnings: Vec<_> = events
            .iter()
            .filter(|(level, _)| *level == tracing::Level::WARN)
            .collect();

        assert_eq!(warnings.len(), 1);
        let fields = &warnings[0].1;
        assert_eq!(fields.get("post_id").map(String::as_str), Some("post-1"));
        assert_eq!(fields.get("value").map(String::as_str), Some("someday"));
    }

    #[test]
    fn empty_or_missing_value_logs_nothing() {
        let events = captured::events_during(|| {
            shape(Some(""), &Post::new(1, "a"));
            shape(None, &Post::new(2, "b"));
        });
        assert!(events.is_empty(), "unexpected events: {events:?}");
    }

    #[test]
    fn readable_value_logs_no_warning() {
        let events = captured::events_during(|| {
            shape(Some("2020-01-01 00:00:00"), &Post::new(1, "a"));
        });
        assert!(events.iter().all(|(level, _)| *level != tracing::Level::WARN));
    }
}
