use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use user_settings_sdk::PageRequestError;

use crate::domain::error::DomainError;

use super::headers::Alerts;
use super::problem::{FieldViolation, Problem};

pub type ApiResult<T> = Result<T, ApiError>;

/// A domain error on its way out of a handler.
///
/// When [`Alerts`] are attached, client-facing failures also carry the
/// `X-<app>-error` headers.
#[derive(Debug)]
pub struct ApiError {
    error: DomainError,
    alerts: Option<Alerts>,
}

impl ApiError {
    #[must_use]
    pub fn missing_parameter(name: &str) -> Self {
        DomainError::validation(name, "required parameter is missing").into()
    }

    /// A request body that is not valid JSON for the target type.
    #[must_use]
    pub fn rejected_body(rejection: &JsonRejection, alerts: Option<Alerts>) -> Self {
        Self {
            error: DomainError::validation("body", rejection.body_text()),
            alerts,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self {
            error,
            alerts: None,
        }
    }
}

impl From<PageRequestError> for ApiError {
    fn from(e: PageRequestError) -> Self {
        DomainError::from(e).into()
    }
}

/// Attach failure alerts to a domain result.
pub trait WithAlerts<T> {
    fn with_alerts(self, alerts: &Alerts) -> ApiResult<T>;
}

impl<T> WithAlerts<T> for Result<T, DomainError> {
    fn with_alerts(self, alerts: &Alerts) -> ApiResult<T> {
        self.map_err(|error| ApiError {
            error,
            alerts: Some(alerts.clone()),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let Self { error, alerts } = self;
        let failure = |key: &str| alerts.as_ref().map(|a| a.failure(key)).unwrap_or_default();

        match error {
            DomainError::IdExists => (StatusCode::BAD_REQUEST, failure("idexists")).into_response(),
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND.into_response(),
            DomainError::Validation { field, message } => {
                let problem = Problem::new(
                    StatusCode::BAD_REQUEST,
                    "Bad Request",
                    format!("Validation error on '{field}': {message}"),
                )
                .with_code("error.validation")
                .with_errors(vec![FieldViolation { field, message }])
                .with_current_trace();
                (failure("validation"), problem).into_response()
            }
            DomainError::Database(ref e) | DomainError::SearchIndex(ref e) => {
                tracing::error!(error = ?e, "{error}");
                Problem::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "An internal error occurred",
                )
                .with_code("error.internal")
                .with_current_trace()
                .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alerts() -> Alerts {
        Alerts::new("21PointsApp").unwrap()
    }

    #[test]
    fn id_exists_is_bad_request_with_failure_alert() {
        let resp = Err::<(), _>(DomainError::IdExists)
            .with_alerts(&alerts())
            .unwrap_err()
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get("X-21PointsApp-error").unwrap(),
            "error.idexists"
        );
        assert_eq!(
            resp.headers().get("X-21PointsApp-params").unwrap(),
            "userSettings"
        );
    }

    #[test]
    fn not_found_has_no_alert() {
        let resp = ApiError::from(DomainError::not_found(3)).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get("X-21PointsApp-error").is_none());
    }

    #[test]
    fn validation_is_problem_json() {
        let resp = Err::<(), _>(DomainError::validation("weeklyGoal", "too low"))
            .with_alerts(&alerts())
            .unwrap_err()
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/problem+json"
        );
        assert_eq!(
            resp.headers().get("X-21PointsApp-error").unwrap(),
            "error.validation"
        );
    }

    #[test]
    fn database_error_is_internal() {
        let resp = ApiError::from(DomainError::Database(anyhow::anyhow!("disk full"))).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_page_request_is_bad_request() {
        let resp = ApiError::from(PageRequestError::UnknownSortProperty("x".to_owned())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
