use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::warn;

use roster_types::api::{UserRequest, UserView};
use roster_types::validation::Violation;

use crate::error::ApiError;
use crate::users::UserService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub users: UserService,
}

/// POST /api/user — 201 with an empty body, 409 if the id is taken.
pub async fn add_user(
    State(state): State<AppState>,
    body: Result<Json<UserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // Malformed JSON and undeclared enum symbols are client errors too.
    let Json(req) = body.map_err(|rejection| {
        warn!("Unreadable user request: {}", rejection.body_text());
        ApiError::Validation(vec![Violation::new("body", rejection.body_text())])
    })?;

    state.users.create_user(req).await?;
    Ok(StatusCode::CREATED)
}

/// GET /api/user
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, ApiError> {
    let users = state.users.list_users().await?;
    Ok(Json(users.collect()))
}

/// GET /api/user/{user_id} — 400 "Not found user" when absent.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserView>, ApiError> {
    let user = state.users.get_user(&user_id).await?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use roster_db::Database;

    use crate::router;
    use crate::users::tests::CountingStore;
    use crate::worker::Worker;

    fn app_with(store: Arc<dyn roster_db::UserStore>) -> Router {
        let users = UserService::new(store, Worker::new(4));
        router(Arc::new(AppStateInner { users }))
    }

    fn app() -> Router {
        app_with(Arc::new(Database::open_in_memory().unwrap()))
    }

    fn post_user(body: Value) -> Request<Body> {
        Request::post("/api/user")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let body = res.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, body)
    }

    fn alice() -> Value {
        json!({ "userId": "alice", "password": "password1", "isVerified": "TRUE" })
    }

    #[tokio::test]
    async fn create_get_conflict_scenario() {
        let app = app();

        let (status, body) = send(&app, post_user(alice())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.is_empty());

        let (status, body) = send(&app, get("/api/user/alice")).await;
        assert_eq!(status, StatusCode::OK);
        let view: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(view, json!({ "userId": "alice", "isVerified": "TRUE" }));

        let (status, body) = send(&app, post_user(alice())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let err: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(err["message"], "The userId already exists : alice");
        assert_eq!(err["status"], 409);
    }

    #[tokio::test]
    async fn extra_body_fields_are_ignored() {
        let app = app();
        let body = json!({
            "userId": "alice",
            "password": "password1",
            "isVerified": "TRUE",
            "email": "a@b.c",
        });
        let (status, _) = send(&app, post_user(body)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(&app, get("/api/user/alice")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_user_is_bad_request() {
        let (status, body) = send(&app(), get("/api/user/missing")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(err["message"], "Not found user");
    }

    #[tokio::test]
    async fn disallowed_flag_is_rejected_before_store() {
        let store = Arc::new(CountingStore::default());
        let app = app_with(store.clone());

        let body = json!({ "userId": "alice", "password": "password1", "isVerified": "NULL" });
        let (status, body) = send(&app, post_user(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            err["violations"],
            json!([{ "field": "isVerified", "message": "Invalid Code" }])
        );
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn unparseable_body_is_bad_request() {
        let store = Arc::new(CountingStore::default());
        let app = app_with(store.clone());

        let body = json!({ "userId": "alice", "password": "password1", "isVerified": "MAYBE" });
        let (status, _) = send(&app, post_user(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let req = Request::post("/api/user")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn list_never_exposes_passwords() {
        let app = app();
        send(&app, post_user(alice())).await;
        let bob = json!({ "userId": "bobby", "password": "password2", "isVerified": "FALSE" });
        send(&app, post_user(bob)).await;

        let (status, body) = send(&app, get("/api/user")).await;
        assert_eq!(status, StatusCode::OK);
        let list: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            list,
            json!([
                { "userId": "alice", "isVerified": "TRUE" },
                { "userId": "bobby", "isVerified": "FALSE" },
            ])
        );
        assert!(!String::from_utf8(body).unwrap().contains("password"));
    }

    #[tokio::test]
    async fn empty_list_is_empty_array() {
        let (status, body) = send(&app(), get("/api/user")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"[]");
    }
}
