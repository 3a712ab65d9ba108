//! `page` / `size` / `sort` query parameters.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use user_settings_sdk::{PageRequest, PageRequestError, SortOrder};

use super::error::ApiError;

/// Defaults and caps applied to incoming page requests.
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub default_size: u64,
    pub max_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: PageRequest::DEFAULT_SIZE,
            max_size: 2000,
        }
    }
}

/// Largest row offset the storage backends accept.
const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

fn parse_number(param: &'static str, value: &str) -> Result<u64, PageRequestError> {
    value
        .trim()
        .parse()
        .map_err(|_| PageRequestError::InvalidNumber {
            param,
            value: value.to_owned(),
        })
}

/// Parse a raw query string. `sort` may repeat; a `size` of zero falls back to
/// the default and sizes above the cap are clamped.
///
/// # Errors
/// Returns [`PageRequestError`] for non-numeric `page`/`size`, a `page` whose
/// row offset is out of range, or unknown sort properties.
pub fn parse_page_request(query: &str, limits: PageLimits) -> Result<PageRequest, PageRequestError> {
    let mut request = PageRequest::new(0, limits.default_size);
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "page" => request.page = parse_number("page", &value)?,
            "size" => request.size = parse_number("size", &value)?,
            "sort" => request.sort.extend(SortOrder::parse_param(&value)?),
            _ => {}
        }
    }
    if request.size == 0 {
        request.size = limits.default_size;
    }
    request.size = request.size.min(limits.max_size);
    if request
        .page
        .checked_mul(request.size)
        .is_none_or(|offset| offset > MAX_OFFSET)
    {
        return Err(PageRequestError::InvalidNumber {
            param: "page",
            value: request.page.to_string(),
        });
    }
    Ok(request)
}

/// Extracts a [`PageRequest`] using the [`PageLimits`] installed as a request
/// extension (or the defaults).
#[derive(Debug, Clone)]
pub struct Paged(pub PageRequest);

impl<S> FromRequestParts<S> for Paged
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let limits = parts
            .extensions
            .get::<PageLimits>()
            .copied()
            .unwrap_or_default();
        let request = parse_page_request(parts.uri.query().unwrap_or_default(), limits)?;
        Ok(Self(request))
    }
}

/// The required `query` parameter of the search endpoint.
#[derive(Debug, Clone)]
pub struct SearchText(pub String);

impl<S> FromRequestParts<S> for SearchText
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts.uri.query().unwrap_or_default();
        url::form_urlencoded::parse(raw.as_bytes())
            .find(|(key, _)| key == "query")
            .map(|(_, value)| Self(value.into_owned()))
            .ok_or_else(|| ApiError::missing_parameter("query"))
    }
}
