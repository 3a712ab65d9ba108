use serde::{Deserialize, Serialize};

use crate::api::rest::headers::Alerts;

/// Settings of the user-settings module itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserSettingsConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Lowest accepted weekly goal.
    #[serde(default = "default_min_weekly_goal")]
    pub min_weekly_goal: i32,
    /// Application name used in `X-<app>-alert` response headers.
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl Default for UserSettingsConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            min_weekly_goal: default_min_weekly_goal(),
            app_name: default_app_name(),
        }
    }
}

impl UserSettingsConfig {
    /// # Errors
    /// Fails on page sizes that cannot serve a request or an app name that is
    /// not usable inside a header name.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.default_page_size == 0 {
            anyhow::bail!("default_page_size must be positive");
        }
        if self.max_page_size < self.default_page_size {
            anyhow::bail!(
                "max_page_size ({}) is smaller than default_page_size ({})",
                self.max_page_size,
                self.default_page_size
            );
        }
        Alerts::new(&self.app_name)
            .map_err(|e| anyhow::anyhow!("invalid app_name '{}': {e}", self.app_name))?;
        Ok(())
    }
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    2000
}

fn default_min_weekly_goal() -> i32 {
    10
}

fn default_app_name() -> String {
    "21PointsApp".to_owned()
}

#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchBackend {
    #[default]
    Memory,
    Meilisearch,
}

/// Where the search index mirror lives.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default)]
    pub backend: SearchBackend,
    /// Meilisearch base URL, e.g. `http://localhost:7700`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_index")]
    pub index: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend: SearchBackend::default(),
            url: None,
            api_key: None,
            index: default_index(),
        }
    }
}

fn default_index() -> String {
    "usersettings".to_owned()
}
