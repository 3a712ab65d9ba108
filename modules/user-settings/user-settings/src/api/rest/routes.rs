use std::sync::Arc;

use axum::extract::Extension;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::domain::service::Service;

use super::dto::{UserRefDto, UserSettingsDto, WeightUnitDto};
use super::handlers;
use super::headers::Alerts;
use super::pagination::PageLimits;
use super::problem::{FieldViolation, Problem};

#[derive(OpenApi)]
#[openapi(
    info(title = "21 Points Health - User Settings", version = "1.0.0"),
    paths(
        handlers::create_user_settings,
        handlers::update_user_settings,
        handlers::list_user_settings,
        handlers::get_user_settings,
        handlers::delete_user_settings,
        handlers::search_user_settings,
    ),
    components(schemas(UserSettingsDto, WeightUnitDto, UserRefDto, Problem, FieldViolation)),
    tags((name = "user-settings", description = "Per-user preferences"))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    alerts: Alerts,
    limits: PageLimits,
) -> Router {
    let api = Router::new()
        .route(
            handlers::USER_SETTINGS_PATH,
            get(handlers::list_user_settings)
                .post(handlers::create_user_settings)
                .put(handlers::update_user_settings),
        )
        .route(
            "/api/user-settings/{id}",
            get(handlers::get_user_settings).delete(handlers::delete_user_settings),
        )
        .route(handlers::SEARCH_PATH, get(handlers::search_user_settings))
        .route("/api/openapi.json", get(openapi_json))
        .layer(Extension(service))
        .layer(Extension(alerts))
        .layer(Extension(limits));

    router.merge(api)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        assert!(paths.contains(&"/api/user-settings".to_owned()));
        assert!(paths.contains(&"/api/user-settings/{id}".to_owned()));
        assert!(paths.contains(&"/api/_search/user-settings".to_owned()));
    }
}
