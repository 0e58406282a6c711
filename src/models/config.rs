//! Configuration model loaded from external sources.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::notice::Notifier;
use crate::pagination::PageSize;
use crate::repository::ListQuery;
use crate::view::{ListViewModel, TagPicker};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
/// Settings of the API client.
pub struct ClientConfig {
    /// Base URL of the remote REST API, without a trailing slash.
    pub api_base_url: String,
    pub timeout_secs: u64,
    /// Where the session survives restarts. Kept in memory when unset.
    pub session_file: Option<PathBuf>,
    pub search_debounce_ms: u64,
    pub tag_debounce_ms: u64,
    pub default_page_size: PageSize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://localhost:7044/api".to_string(),
            timeout_secs: 10,
            session_file: None,
            search_debounce_ms: 500,
            tag_debounce_ms: 300,
            default_page_size: PageSize::Ten,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn tag_debounce(&self) -> Duration {
        Duration::from_millis(self.tag_debounce_ms)
    }

    /// List screen with the configured search delay and page size.
    pub fn list_view<Q: ListQuery, T>(
        &self,
        label: impl Into<String>,
        query: Q,
        notifier: Arc<dyn Notifier>,
    ) -> ListViewModel<Q, T> {
        ListViewModel::new(label, query, notifier)
            .with_debounce(self.search_debounce())
            .with_page_size(self.default_page_size)
    }

    pub fn tag_picker(&self) -> TagPicker {
        TagPicker::new().with_debounce(self.tag_debounce())
    }

    /// Layers `config/default.yaml`, `config/<APP_ENV>.yaml` (profile
    /// `local` by default) and `APP_*` environment variables. Call after
    /// loading `.env`.
    #[cfg(feature = "client")]
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        ::config::Config::builder()
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(::config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(::config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
