//! User Settings SDK
//!
//! Transport-agnostic contract of the user-settings module:
//! - `UserSettings`, `WeightUnit`, `UserRef` - the entity model
//! - `PageRequest`, `SortOrder`, `Page` - offset paging shared by the
//!   primary store and the search index

pub mod models;
pub mod page;

pub use models::{ParseWeightUnitError, UserRef, UserSettings, WeightUnit};
pub use page::{Direction, Page, PageRequest, PageRequestError, SortOrder, SortProperty};
