#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use vtb_portal::catalog::LearningArea;
use vtb_portal::config::Config;
use vtb_portal::models::User;
use vtb_portal::session::USER_KEY;
use vtb_portal::storage::LocalStorage;

/// Nothing listens on the discard port, so every API call fails fast and
/// pages fall back to mock content.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9/api/v1";

pub struct TestApp {
    pub router: Router,
    pub storage: Arc<LocalStorage>,
    _dir: TempDir,
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub fn saved_user(&self) -> Option<User> {
        self.storage
            .get_item(USER_KEY)
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }
}

pub fn create_test_app() -> TestApp {
    create_test_app_with_api(UNREACHABLE_API)
}

pub fn create_test_app_with_api(api_base_url: &str) -> TestApp {
    build(api_base_url, |_| {})
}

/// App whose storage already holds a registered user (and optional token).
pub fn create_registered_app(api_base_url: &str, token: Option<&str>) -> TestApp {
    build(api_base_url, |storage| {
        let raw = serde_json::to_string(&sample_user()).unwrap();
        storage.set_item(USER_KEY, raw).unwrap();
        if let Some(token) = token {
            storage.set_item(vtb_portal::session::TOKEN_KEY, token).unwrap();
        }
    })
}

fn build(api_base_url: &str, seed: impl FnOnce(&LocalStorage)) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::local(dir.path(), api_base_url);
    let storage = LocalStorage::open(config.storage_path()).unwrap();
    seed(&storage);
    let storage = Arc::new(storage);
    let router = vtb_portal::create_app_with_storage(config, Arc::clone(&storage));

    TestApp {
        router,
        storage,
        _dir: dir,
    }
}

pub fn sample_user() -> User {
    User {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone_number: "+44 20 7946 0958".to_string(),
        selected_area: LearningArea::DevOps,
        registered_at: Some("2024-05-01T10:00:00.000Z".to_string()),
    }
}

/// Serves `router` on an ephemeral local port and returns the API base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/v1")
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// `name=value` pairs from every Set-Cookie header, joined for a Cookie header.
pub fn cookies(response: &Response<Body>) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Kind and decoded message of the flash cookie set by `response`.
pub fn flash(response: &Response<Body>) -> Option<(String, String)> {
    let cookie = cookies(response);
    let raw = cookie.strip_prefix("vtb_flash=")?;
    let (kind, message) = raw.split_once(':')?;
    let message = urlencoding::decode(message).ok()?.into_owned();
    Some((kind.to_string(), message))
}

/// Makes every later storage write fail: the temp file path is taken by a
/// directory.
pub fn block_storage_writes(app: &TestApp) {
    let path = app.storage.path().unwrap().with_extension("json.tmp");
    std::fs::create_dir(path).unwrap();
}
