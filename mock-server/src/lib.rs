use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub use axum::http::StatusCode;

pub const USER_INFO_PATH: &str = "/ptool_userinfo/user_info.php";

/// A canned reply for one user id.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Fixture {
    /// 200 with `record` as the JSON body.
    pub fn user(record: Value) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "application/json",
            body: record.to_string(),
            delay: None,
        }
    }

    /// Any status with a plain-text body.
    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.to_string(),
            delay: None,
        }
    }

    /// Hold the reply back for `delay` before sending it.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

pub type Db = Arc<RwLock<HashMap<String, Fixture>>>;

#[derive(Deserialize)]
pub struct UserInfoQuery {
    pub display_type: Option<String>,
    pub user_id: Option<String>,
}

/// Users every fresh `app()` starts with.
pub fn seed() -> HashMap<String, Fixture> {
    HashMap::from([
        (
            "mall001".to_string(),
            Fixture::user(json!({"userId": "mall001", "name": "Kim Minji", "grade": "VIP"})),
        ),
        (
            "mall002".to_string(),
            Fixture::user(json!({"userId": "mall002", "name": "김민지", "grade": "NORMAL"})),
        ),
    ])
}

pub fn app() -> Router {
    app_with(seed())
}

pub fn app_with(fixtures: HashMap<String, Fixture>) -> Router {
    let db: Db = Arc::new(RwLock::new(fixtures));
    Router::new()
        .route(USER_INFO_PATH, get(user_info))
        .route("/users/{user_id}", put(put_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(
    listener: TcpListener,
    fixtures: HashMap<String, Fixture>,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(fixtures)).await
}

async fn user_info(State(db): State<Db>, Query(query): Query<UserInfoQuery>) -> Response {
    if query.display_type.as_deref() != Some("json") {
        return (StatusCode::BAD_REQUEST, "display_type must be json").into_response();
    }
    let Some(user_id) = query.user_id else {
        return (StatusCode::BAD_REQUEST, "missing user_id").into_response();
    };

    let fixture = db.read().await.get(&user_id).cloned();
    let Some(fixture) = fixture else {
        tracing::debug!(%user_id, "unknown user");
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    if let Some(delay) = fixture.delay {
        tokio::time::sleep(delay).await;
    }
    tracing::debug!(%user_id, status = fixture.status.as_u16(), "serving fixture");
    (
        fixture.status,
        [(header::CONTENT_TYPE, fixture.content_type)],
        fixture.body,
    )
        .into_response()
}

async fn put_user(
    State(db): State<Db>,
    Path(user_id): Path<String>,
    Json(record): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let previous = db
        .write()
        .await
        .insert(user_id, Fixture::user(record.clone()));
    let status = if previous.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    (status, Json(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_fixture_serializes_record() {
        let fixture = Fixture::user(json!({"userId": "u1"}));
        assert_eq!(fixture.status, StatusCode::OK);
        assert_eq!(fixture.content_type, "application/json");
        let body: Value = serde_json::from_str(&fixture.body).unwrap();
        assert_eq!(body["userId"], "u1");
        assert!(fixture.delay.is_none());
    }

    #[test]
    fn raw_fixture_keeps_text() {
        let fixture = Fixture::raw(StatusCode::INTERNAL_SERVER_ERROR, "boom")
            .delayed(Duration::from_millis(5));
        assert_eq!(fixture.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(fixture.body, "boom");
        assert_eq!(fixture.delay, Some(Duration::from_millis(5)));
    }

    #[test]
    fn query_fields_are_optional() {
        let query: UserInfoQuery = serde_json::from_str("{}").unwrap();
        assert!(query.display_type.is_none());
        assert!(query.user_id.is_none());
    }

    #[test]
    fn seed_has_non_ascii_user() {
        let seed = seed();
        let body: Value = serde_json::from_str(&seed["mall002"].body).unwrap();
        assert_eq!(body["name"], "김민지");
    }
}
