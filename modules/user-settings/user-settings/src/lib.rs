//! User Settings Module Implementation
//!
//! Stores per-user preferences in a relational database, mirrors every write
//! into a search index and exposes both over REST. The entity model lives in
//! `user-settings-sdk` and is re-exported here.

pub use user_settings_sdk::{Page, PageRequest, UserRef, UserSettings, WeightUnit};

pub mod config;
pub mod module;
pub use config::{SearchBackend, SearchConfig, UserSettingsConfig};
pub use module::UserSettingsModule;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
