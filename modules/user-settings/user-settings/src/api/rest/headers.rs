//! Alert and pagination response headers understood by the web client.
//!
//! Alerts travel as `X-<app>-alert` (or `X-<app>-error` on failure) carrying a
//! translation key, plus `X-<app>-params` with the entity id or name. Paged
//! responses carry `X-Total-Count` and an RFC 5988 `Link` header.

use std::fmt::Write as _;

use axum::http::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderName, LINK};
use user_settings_sdk::Page;

pub const ENTITY_NAME: &str = "userSettings";
pub const X_TOTAL_COUNT: &str = "x-total-count";

/// Builds `X-<app>-*` alert headers for one application name.
#[derive(Debug, Clone)]
pub struct Alerts {
    app_name: String,
    alert: HeaderName,
    error: HeaderName,
    params: HeaderName,
}

impl Alerts {
    /// # Errors
    /// Fails when `app_name` cannot be part of an HTTP header name.
    pub fn new(app_name: &str) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            app_name: app_name.to_owned(),
            alert: HeaderName::try_from(format!("x-{app_name}-alert"))?,
            error: HeaderName::try_from(format!("x-{app_name}-error"))?,
            params: HeaderName::try_from(format!("x-{app_name}-params"))?,
        })
    }

    #[must_use]
    pub fn entity_created(&self, id: i64) -> HeaderMap {
        self.alert(format!("{}.{ENTITY_NAME}.created", self.app_name), &id.to_string())
    }

    #[must_use]
    pub fn entity_updated(&self, id: i64) -> HeaderMap {
        self.alert(format!("{}.{ENTITY_NAME}.updated", self.app_name), &id.to_string())
    }

    #[must_use]
    pub fn entity_deleted(&self, id: i64) -> HeaderMap {
        self.alert(format!("{}.{ENTITY_NAME}.deleted", self.app_name), &id.to_string())
    }

    /// Failure alert for `error_key`, e.g. `idexists`.
    #[must_use]
    pub fn failure(&self, error_key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        insert(&mut headers, self.error.clone(), &format!("error.{error_key}"));
        insert(&mut headers, self.params.clone(), ENTITY_NAME);
        headers
    }

    fn alert(&self, message: String, param: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        insert(&mut headers, self.alert.clone(), &message);
        insert(&mut headers, self.params.clone(), param);
        headers
    }
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(v) => {
            headers.insert(name, v);
        }
        Err(_) => tracing::warn!(header = %name, "Dropping header with non-visible characters"),
    }
}

fn link(buf: &mut String, base_url: &str, page: u64, size: u64, extra: &str, rel: &str) {
    let _ = write!(buf, "<{base_url}?page={page}&size={size}{extra}>; rel=\"{rel}\"");
}

fn link_header<T>(page: &Page<T>, base_url: &str, extra: &str) -> String {
    let mut value = String::new();
    if page.has_next() {
        link(&mut value, base_url, page.number + 1, page.size, extra, "next");
        value.push(',');
    }
    if page.has_previous() {
        link(&mut value, base_url, page.number - 1, page.size, extra, "prev");
        value.push(',');
    }
    let last = page.total_pages().saturating_sub(1);
    link(&mut value, base_url, last, page.size, extra, "last");
    value.push(',');
    link(&mut value, base_url, 0, page.size, extra, "first");
    value
}

fn paged(total: u64, link: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(X_TOTAL_COUNT, HeaderValue::from(total));
    insert(&mut headers, LINK, link);
    headers
}

/// `X-Total-Count` and `Link` for a page of `base_url`.
#[must_use]
pub fn pagination_headers<T>(page: &Page<T>, base_url: &str) -> HeaderMap {
    paged(page.total_elements, &link_header(page, base_url, ""))
}

/// Same as [`pagination_headers`] with `&query=<encoded>` on every link.
#[must_use]
pub fn search_pagination_headers<T>(query: &str, page: &Page<T>, base_url: &str) -> HeaderMap {
    let extra = format!("&query={}", urlencoding::encode(query));
    paged(page.total_elements, &link_header(page, base_url, &extra))
}
