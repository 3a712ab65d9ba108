#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use sea_orm::{ConnectOptions, Database};
use serde_json::Value;
use tower::ServiceExt;
use user_settings::domain::repo::UserSettingsRepository;
use user_settings::domain::search::SearchIndex;
use user_settings::infra::search::InMemorySearchIndex;
use user_settings::infra::storage::sea_orm_repo::SeaOrmUserSettingsRepository;
use user_settings::{UserSettingsConfig, UserSettingsModule};

pub const DEFAULT_WEEKLY_GOAL: i32 = 10;
pub const UPDATED_WEEKLY_GOAL: i32 = 11;

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<SeaOrmUserSettingsRepository>,
    pub index: Arc<InMemorySearchIndex>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub async fn setup() -> TestApp {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect to sqlite");
    UserSettingsModule::migrate(&db).await.expect("migrate");

    let repo = Arc::new(SeaOrmUserSettingsRepository::new(db));
    let index = Arc::new(InMemorySearchIndex::new());
    index.delete_all().await.expect("clear index");

    let router = build_router(repo.clone(), index.clone());
    TestApp {
        router,
        repo,
        index,
    }
}

pub fn build_router(
    repo: Arc<dyn UserSettingsRepository>,
    index: Arc<dyn SearchIndex>,
) -> Router {
    let module = UserSettingsModule::from_parts(repo, index, &UserSettingsConfig::default())
        .expect("build module");
    module.register_rest(Router::new())
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn json(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub fn empty(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}
