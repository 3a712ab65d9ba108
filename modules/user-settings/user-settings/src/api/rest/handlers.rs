use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use user_settings_sdk::UserSettings;

use crate::domain::error::DomainError;
use crate::domain::service::Service;

use super::body::JsonBody;
use super::dto::UserSettingsDto;
use super::error::{ApiResult, WithAlerts};
use super::headers::{Alerts, pagination_headers, search_pagination_headers};
use super::pagination::{Paged, SearchText};

pub const USER_SETTINGS_PATH: &str = "/api/user-settings";
pub const SEARCH_PATH: &str = "/api/_search/user-settings";

fn assigned_id(settings: &UserSettings) -> Result<i64, DomainError> {
    settings
        .id
        .ok_or_else(|| DomainError::Database(anyhow::anyhow!("stored record has no id")))
}

async fn create(svc: &Service, alerts: &Alerts, settings: UserSettings) -> ApiResult<Response> {
    let saved = svc.create(settings).await.with_alerts(alerts)?;
    let id = assigned_id(&saved)?;
    tracing::info!(user_settings_id = id, "User settings created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("{USER_SETTINGS_PATH}/{id}"))],
        alerts.entity_created(id),
        Json(UserSettingsDto::from(saved)),
    )
        .into_response())
}

/// Create new settings. The body must not carry an id.
#[utoipa::path(
    post,
    path = "/api/user-settings",
    tag = "user-settings",
    request_body = UserSettingsDto,
    responses(
        (status = 201, description = "Settings created", body = UserSettingsDto),
        (status = 400, description = "Body already has an id, is malformed or fails validation"),
    )
)]
pub async fn create_user_settings(
    Extension(svc): Extension<Arc<Service>>,
    Extension(alerts): Extension<Alerts>,
    JsonBody(body): JsonBody<UserSettingsDto>,
) -> ApiResult<Response> {
    create(&svc, &alerts, body.into()).await
}

/// Overwrite existing settings. A body without id is handled as a create.
#[utoipa::path(
    put,
    path = "/api/user-settings",
    tag = "user-settings",
    request_body = UserSettingsDto,
    responses(
        (status = 200, description = "Settings updated", body = UserSettingsDto),
        (status = 201, description = "Body had no id, settings created", body = UserSettingsDto),
        (status = 400, description = "Body is malformed or fails validation"),
    )
)]
pub async fn update_user_settings(
    Extension(svc): Extension<Arc<Service>>,
    Extension(alerts): Extension<Alerts>,
    JsonBody(body): JsonBody<UserSettingsDto>,
) -> ApiResult<Response> {
    let settings: UserSettings = body.into();
    if settings.id.is_none() {
        return create(&svc, &alerts, settings).await;
    }

    let saved = svc.update(settings).await.with_alerts(&alerts)?;
    let id = assigned_id(&saved)?;
    tracing::info!(user_settings_id = id, "User settings updated");

    Ok((
        StatusCode::OK,
        alerts.entity_updated(id),
        Json(UserSettingsDto::from(saved)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/user-settings",
    tag = "user-settings",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page index"),
        ("size" = Option<u64>, Query, description = "Page size"),
        ("sort" = Option<String>, Query, description = "property(,asc|desc), may repeat"),
    ),
    responses(
        (status = 200, description = "One page of settings", body = [UserSettingsDto]),
        (status = 400, description = "Malformed paging parameters"),
    )
)]
pub async fn list_user_settings(
    Extension(svc): Extension<Arc<Service>>,
    Paged(request): Paged,
) -> ApiResult<Response> {
    let page = svc.list(&request).await?;
    let headers = pagination_headers(&page, USER_SETTINGS_PATH);
    let body: Vec<UserSettingsDto> = page.content.into_iter().map(Into::into).collect();
    Ok((headers, Json(body)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/user-settings/{id}",
    tag = "user-settings",
    params(("id" = i64, Path, description = "Settings id")),
    responses(
        (status = 200, description = "Settings found", body = UserSettingsDto),
        (status = 404, description = "No settings with this id"),
    )
)]
pub async fn get_user_settings(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<UserSettingsDto>> {
    let settings = svc.get(id).await?;
    Ok(Json(settings.into()))
}

#[utoipa::path(
    delete,
    path = "/api/user-settings/{id}",
    tag = "user-settings",
    params(("id" = i64, Path, description = "Settings id")),
    responses((status = 200, description = "Settings deleted (or already absent)"))
)]
pub async fn delete_user_settings(
    Extension(svc): Extension<Arc<Service>>,
    Extension(alerts): Extension<Alerts>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    svc.delete(id).await?;
    tracing::info!(user_settings_id = id, "User settings deleted");
    Ok((StatusCode::OK, alerts.entity_deleted(id)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/_search/user-settings",
    tag = "user-settings",
    params(
        ("query" = String, Query, description = "Query passed to the search engine, e.g. id:42"),
        ("page" = Option<u64>, Query, description = "Zero-based page index"),
        ("size" = Option<u64>, Query, description = "Page size"),
        ("sort" = Option<String>, Query, description = "property(,asc|desc), may repeat"),
    ),
    responses(
        (status = 200, description = "One page of matches", body = [UserSettingsDto]),
        (status = 400, description = "Missing query or malformed paging parameters"),
    )
)]
pub async fn search_user_settings(
    Extension(svc): Extension<Arc<Service>>,
    SearchText(query): SearchText,
    Paged(request): Paged,
) -> ApiResult<Response> {
    let page = svc.search(&query, &request).await?;
    let headers = search_pagination_headers(&query, &page, SEARCH_PATH);
    let body: Vec<UserSettingsDto> = page.content.into_iter().map(Into::into).collect();
    Ok((headers, Json(body)).into_response())
}
