//! Offset paging types shared by the primary store, the search index and the
//! REST layer.

use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    #[error("unknown sort property '{0}'")]
    UnknownSortProperty(String),

    #[error("invalid value '{value}' for '{param}'")]
    InvalidNumber { param: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Properties a page of user settings can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
    Id,
    WeeklyGoal,
    WeightUnit,
    UserId,
}

impl SortProperty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SortProperty::Id => "id",
            SortProperty::WeeklyGoal => "weeklyGoal",
            SortProperty::WeightUnit => "weightUnit",
            SortProperty::UserId => "user.id",
        }
    }
}

impl FromStr for SortProperty {
    type Err = PageRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortProperty::Id),
            "weeklyGoal" => Ok(SortProperty::WeeklyGoal),
            "weightUnit" => Ok(SortProperty::WeightUnit),
            "user.id" | "user" => Ok(SortProperty::UserId),
            other => Err(PageRequestError::UnknownSortProperty(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub property: SortProperty,
    pub direction: Direction,
}

impl SortOrder {
    #[must_use]
    pub const fn asc(property: SortProperty) -> Self {
        Self {
            property,
            direction: Direction::Asc,
        }
    }

    #[must_use]
    pub const fn desc(property: SortProperty) -> Self {
        Self {
            property,
            direction: Direction::Desc,
        }
    }

    /// Parse one `sort` parameter, e.g. `id,desc` or `weeklyGoal,id,asc`.
    ///
    /// A trailing `asc`/`desc` applies to every property listed before it.
    ///
    /// # Errors
    /// Returns [`PageRequestError::UnknownSortProperty`] for properties that
    /// cannot be sorted on.
    pub fn parse_param(raw: &str) -> Result<Vec<Self>, PageRequestError> {
        let mut parts: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let direction = match parts.last() {
            Some(last) if last.eq_ignore_ascii_case("desc") => {
                parts.pop();
                Direction::Desc
            }
            Some(last) if last.eq_ignore_ascii_case("asc") => {
                parts.pop();
                Direction::Asc
            }
            _ => Direction::Asc,
        };

        parts
            .into_iter()
            .map(|p| {
                Ok(Self {
                    property: p.parse()?,
                    direction,
                })
            })
            .collect()
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u64 = 20;

    #[must_use]
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_sort(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}

/// A slice of a larger result set plus the totals needed for paging links.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            1
        } else {
            self.total_elements.div_ceil(self.size)
        }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages().saturating_sub(1)
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_param_with_direction() {
        let orders = SortOrder::parse_param("id,desc").unwrap();
        assert_eq!(orders, vec![SortOrder::desc(SortProperty::Id)]);
    }

    #[test]
    fn sort_param_direction_applies_to_all_properties() {
        let orders = SortOrder::parse_param("weeklyGoal,id,ASC").unwrap();
        assert_eq!(
            orders,
            vec![
                SortOrder::asc(SortProperty::WeeklyGoal),
                SortOrder::asc(SortProperty::Id)
            ]
        );
    }

    #[test]
    fn sort_param_without_direction_defaults_to_asc() {
        let orders = SortOrder::parse_param("weightUnit").unwrap();
        assert_eq!(orders, vec![SortOrder::asc(SortProperty::WeightUnit)]);
    }

    #[test]
    fn sort_param_rejects_unknown_property() {
        let err = SortOrder::parse_param("password,asc").unwrap_err();
        assert_eq!(
            err,
            PageRequestError::UnknownSortProperty("password".to_owned())
        );
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Page<u8> = Page::new(vec![], &PageRequest::new(0, 20), 41);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(!page.has_previous());

        let last: Page<u8> = Page::new(vec![], &PageRequest::new(2, 20), 41);
        assert!(!last.has_next());
        assert!(last.has_previous());
    }

    #[test]
    fn empty_result_has_no_pages() {
        let page: Page<u8> = Page::new(vec![], &PageRequest::default(), 0);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
    }

    #[test]
    fn far_page_has_no_next() {
        let page: Page<u8> = Page::new(vec![], &PageRequest::new(u64::MAX, 20), 41);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn offset_is_page_times_size() {
        assert_eq!(PageRequest::new(3, 25).offset(), 75);
    }
}
