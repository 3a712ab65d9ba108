#[cfg(feature = "meilisearch")]
pub mod meili;
pub mod memory;
pub mod query;

#[cfg(feature = "meilisearch")]
pub use meili::MeiliSearchIndex;
pub use memory::InMemorySearchIndex;
