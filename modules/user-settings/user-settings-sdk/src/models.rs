//! Public models for the user-settings module.
//!
//! These are transport-agnostic data structures shared by the domain layer,
//! the storage and search adapters, and the REST layer. They carry no serde
//! or ORM derives; every adapter maps them into its own representation.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Unit the user records body weight in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeightUnit {
    Kg,
    Lb,
}

impl WeightUnit {
    /// Tag name used on the wire and in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weight unit '{0}', expected 'kg' or 'lb'")]
pub struct ParseWeightUnitError(pub String);

impl FromStr for WeightUnit {
    type Err = ParseWeightUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("kg") {
            Ok(WeightUnit::Kg)
        } else if s.eq_ignore_ascii_case("lb") {
            Ok(WeightUnit::Lb)
        } else {
            Err(ParseWeightUnitError(s.to_owned()))
        }
    }
}

/// Reference to the owning user. The user aggregate lives elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserRef {
    pub id: i64,
}

/// Settings of a single user.
///
/// Identity is the store-assigned `id`: two records are equal only when both
/// carry an id and the ids match. A record without an id is not equal to
/// anything, itself included.
#[derive(Debug, Clone, Default)]
pub struct UserSettings {
    pub id: Option<i64>,
    pub weekly_goal: Option<i32>,
    pub weight_unit: Option<WeightUnit>,
    pub user: Option<UserRef>,
}

impl UserSettings {
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_weekly_goal(mut self, weekly_goal: i32) -> Self {
        self.weekly_goal = Some(weekly_goal);
        self
    }

    #[must_use]
    pub fn with_weight_unit(mut self, weight_unit: WeightUnit) -> Self {
        self.weight_unit = Some(weight_unit);
        self
    }

    #[must_use]
    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user = Some(UserRef { id: user_id });
        self
    }
}

impl PartialEq for UserSettings {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for UserSettings {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

struct Quoted<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for Quoted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => write!(f, "'{v}'"),
            None => f.write_str("'null'"),
        }
    }
}

impl fmt::Display for UserSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "UserSettings{{id={id}")?,
            None => f.write_str("UserSettings{id=null")?,
        }
        write!(
            f,
            ", weeklyGoal={}, weightUnit={}}}",
            Quoted(self.weekly_goal),
            Quoted(self.weight_unit)
        )
    }
}
