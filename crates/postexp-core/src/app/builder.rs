//! PluginBuilder - フィールドとフィルタの登録とワイヤリング
//!
//! The host's `init` hook equivalent: register fields, add response filters,
//! then build. `expect_fields()` makes a missing registration fail at build
//! time instead of at the first write.

use std::sync::Arc;

use super::meta_field::{ExpirationField, MetaField, MetaFieldSpec};
use super::meta_service::MetaService;
use super::registry::{MetaRegistry, RegistryError};
use super::rest::{ExpiryResponseFilter, PostSerializer, ResponseFilter};
use crate::config::Config;
use crate::policy::ExpirationPolicy;
use crate::ports::{Authorizer, Clock, MetaStore};

/// BuildError はプラグイン構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Missing meta fields: {0:?}. These fields were expected but not registered.")]
    MissingFields(Vec<String>),
}

pub struct PluginBuilder {
    registry: MetaRegistry,
    filters: Vec<Arc<dyn ResponseFilter>>,
    expected_fields: Option<Vec<String>>,
}

impl PluginBuilder {
    pub fn new() -> Self {
        Self {
            registry: MetaRegistry::new(),
            filters: Vec::new(),
            expected_fields: None,
        }
    }

    pub fn register_field<F: MetaField + 'static>(mut self, field: F) -> Result<Self, RegistryError> {
        self.registry.register(field)?;
        Ok(self)
    }

    pub fn add_filter<R: ResponseFilter + 'static>(mut self, filter: R) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Fields (as `post_type.key`) that must be registered before `build()`.
    pub fn expect_fields(mut self, fields: &[&str]) -> Self {
        self.expected_fields = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn build(
        self,
        store: Arc<dyn MetaStore>,
        authorizer: Arc<dyn Authorizer>,
        clock: Arc<dyn Clock>,
    ) -> Result<Plugin, BuildError> {
        if let Some(expected) = &self.expected_fields {
            let registered = self.registry.registered_fields();
            let missing: Vec<String> = expected
                .iter()
                .filter(|f| !registered.contains(f))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingFields(missing));
            }
        }

        let meta = Arc::new(MetaService::new(
            Arc::new(self.registry),
            store,
            authorizer,
            clock.clone(),
        ));
        let rest = PostSerializer::new(meta.clone(), self.filters, clock);
        Ok(Plugin { meta, rest })
    }
}

impl Default for PluginBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Installed plugin: the write path and the REST read path.
pub struct Plugin {
    pub meta: Arc<MetaService>,
    pub rest: PostSerializer,
}

impl Plugin {
    /// Register the expiration field and its response filter per `config`.
    pub fn install(
        config: &Config,
        store: Arc<dyn MetaStore>,
        authorizer: Arc<dyn Authorizer>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, BuildError> {
        let policy = ExpirationPolicy::new(config.timezone);
        let spec = MetaFieldSpec::rest_string(&config.post_type, &config.meta_key);
        let expected = spec.field_key().to_string();

        PluginBuilder::new()
            .register_field(ExpirationField::new(spec, policy))?
            .add_filter(ExpiryResponseFilter::new(
                &config.post_type,
                &config.meta_key,
                policy,
                store.clone(),
            ))
            .expect_fields(&[expected.as_str()])
            .build(store, authorizer, clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{InMemoryMetaStore, RoleAuthorizer};
    use crate::ports::SystemClock;

    fn deps() -> (Arc<dyn MetaStore>, Arc<dyn Authorizer>, Arc<dyn Clock>) {
        (
            Arc::new(InMemoryMetaStore::new()),
            Arc::new(RoleAuthorizer::default()),
            Arc::new(SystemClock),
        )
    }

    fn field(key: &str) -> ExpirationField {
        ExpirationField::new(
            MetaFieldSpec::rest_string("post", key),
            ExpirationPolicy::default(),
        )
    }

    #[test]
    fn test_build_success() {
        let (store, auth, clock) = deps();
        let plugin = PluginBuilder::new()
            .register_field(field("expiration_date"))
            .unwrap()
            .expect_fields(&["post.expiration_date"])
            .build(store, auth, clock);
        assert!(plugin.is_ok());
    }

    #[test]
    fn test_build_missing_fields() {
        let (store, auth, clock) = deps();
        let plugin = PluginBuilder::new()
            .register_field(field("expiration_date"))
            .unwrap()
            .expect_fields(&["post.expiration_date", "page.expiration_date"])
            .build(store, auth, clock);
        assert!(matches!(
            plugin,
            Err(BuildError::MissingFields(missing)) if missing == vec!["page.expiration_date".to_string()]
        ));
    }

    #[test]
    fn test_duplicate_field_is_rejected() {
        let result = PluginBuilder::new()
            .register_field(field("expiration_date"))
            .unwrap()
            .register_field(field("expiration_date"));
        assert!(matches!(result, Err(RegistryError::AlreadyRegistered(_))));
    }

    #[test]
    fn test_install_registers_configured_key() {
        let (store, auth, clock) = deps();
        let config = Config {
            meta_key: "expires_at".to_string(),
            ..Config::default()
        };
        let plugin = Plugin::install(&config, store, auth, clock).unwrap();
        assert_eq!(
            plugin.meta.registry().registered_fields(),
            vec!["post.expires_at"]
        );
    }
}
