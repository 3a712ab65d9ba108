//! Lucene-style query subset evaluated by the in-memory index.
//!
//! Clauses are whitespace separated and OR-ed together, unless an `AND`
//! keyword appears anywhere in the query, in which case every clause must
//! match. A clause is either `field:value` or a bare value matched against
//! all fields. Values compare case-insensitively; `*` matches any present
//! value and a trailing `*` turns the value into a prefix.

use user_settings_sdk::UserSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    WeeklyGoal,
    WeightUnit,
    UserId,
    Any,
    Unknown,
}

impl Field {
    fn parse(name: &str) -> Self {
        match name {
            "id" => Field::Id,
            "weeklyGoal" => Field::WeeklyGoal,
            "weightUnit" => Field::WeightUnit,
            "user.id" | "userId" => Field::UserId,
            "*" => Field::Any,
            _ => Field::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    Present,
    Exact(String),
    Prefix(String),
}

impl Pattern {
    fn parse(raw: &str) -> Self {
        let value = raw.trim_matches('"').to_lowercase();
        if value == "*" {
            Pattern::Present
        } else if let Some(prefix) = value.strip_suffix('*') {
            Pattern::Prefix(prefix.to_owned())
        } else {
            Pattern::Exact(value)
        }
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Pattern::Present => true,
            Pattern::Exact(expected) => value.eq_ignore_ascii_case(expected),
            Pattern::Prefix(prefix) => value.to_lowercase().starts_with(prefix.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
struct Clause {
    field: Field,
    pattern: Pattern,
}

impl Clause {
    fn matches(&self, settings: &UserSettings) -> bool {
        let values = field_values(settings);
        match self.field {
            Field::Unknown => false,
            Field::Any => values
                .iter()
                .any(|(_, v)| v.as_deref().is_some_and(|v| self.pattern.matches(v))),
            field => values
                .iter()
                .filter(|(f, _)| *f == field)
                .any(|(_, v)| v.as_deref().is_some_and(|v| self.pattern.matches(v))),
        }
    }
}

fn field_values(settings: &UserSettings) -> [(Field, Option<String>); 4] {
    [
        (Field::Id, settings.id.map(|v| v.to_string())),
        (Field::WeeklyGoal, settings.weekly_goal.map(|v| v.to_string())),
        (
            Field::WeightUnit,
            settings.weight_unit.map(|v| v.as_str().to_owned()),
        ),
        (Field::UserId, settings.user.map(|u| u.id.to_string())),
    ]
}

/// A parsed query. An empty query matches nothing.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    clauses: Vec<Clause>,
    require_all: bool,
}

impl SearchQuery {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut clauses = Vec::new();
        let mut require_all = false;

        for token in raw.split_whitespace() {
            match token {
                "AND" | "&&" => require_all = true,
                "OR" | "||" => {}
                "*" | "*:*" => clauses.push(Clause {
                    field: Field::Any,
                    pattern: Pattern::Present,
                }),
                _ => {
                    let clause = match token.split_once(':') {
                        Some((field, value)) => Clause {
                            field: Field::parse(field),
                            pattern: Pattern::parse(value),
                        },
                        None => Clause {
                            field: Field::Any,
                            pattern: Pattern::parse(token),
                        },
                    };
                    clauses.push(clause);
                }
            }
        }

        Self {
            clauses,
            require_all,
        }
    }

    #[must_use]
    pub fn matches(&self, settings: &UserSettings) -> bool {
        if self.clauses.is_empty() {
            return false;
        }
        if self.require_all {
            self.clauses.iter().all(|c| c.matches(settings))
        } else {
            self.clauses.iter().any(|c| c.matches(settings))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use user_settings_sdk::WeightUnit;

    fn record() -> UserSettings {
        UserSettings::default()
            .with_id(42)
            .with_weekly_goal(10)
            .with_weight_unit(WeightUnit::Kg)
            .with_user(7)
    }

    #[test]
    fn field_clause_matches_exact_value() {
        assert!(SearchQuery::parse("id:42").matches(&record()));
        assert!(!SearchQuery::parse("id:4").matches(&record()));
        assert!(SearchQuery::parse("user.id:7").matches(&record()));
    }

    #[test]
    fn comparison_ignores_case() {
        assert!(SearchQuery::parse("weightUnit:KG").matches(&record()));
    }

    #[test]
    fn bare_term_matches_any_field() {
        assert!(SearchQuery::parse("kg").matches(&record()));
        assert!(SearchQuery::parse("10").matches(&record()));
        assert!(!SearchQuery::parse("lb").matches(&record()));
    }

    #[test]
    fn wildcard_and_prefix() {
        assert!(SearchQuery::parse("*").matches(&record()));
        assert!(SearchQuery::parse("id:4*").matches(&record()));
        assert!(!SearchQuery::parse("id:5*").matches(&record()));
    }

    #[test]
    fn presence_requires_a_value() {
        let bare = UserSettings::default().with_id(1);
        assert!(!SearchQuery::parse("weeklyGoal:*").matches(&bare));
        assert!(SearchQuery::parse("weeklyGoal:*").matches(&record()));
    }

    #[test]
    fn clauses_are_or_ed_unless_and_present() {
        assert!(SearchQuery::parse("id:1 weightUnit:kg").matches(&record()));
        assert!(!SearchQuery::parse("id:1 AND weightUnit:kg").matches(&record()));
        assert!(SearchQuery::parse("id:42 AND weightUnit:kg").matches(&record()));
    }

    #[test]
    fn unknown_field_and_empty_query_match_nothing() {
        assert!(!SearchQuery::parse("password:42").matches(&record()));
        assert!(!SearchQuery::parse("   ").matches(&record()));
    }
}
