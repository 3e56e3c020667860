use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

use super::AppState;
use crate::models::{ErrorResponse, MessageResponse};
use crate::roster::{Roster, RosterError};

#[derive(Debug, Deserialize)]
pub(crate) struct EmailQuery {
    email: String,
}

pub(crate) enum ApiError {
    Roster(RosterError),
    InvalidQuery(String),
    InvalidPath(StatusCode, String),
}

impl From<RosterError> for ApiError {
    fn from(e: RosterError) -> Self {
        ApiError::Roster(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Roster(e) => (e.status(), e.to_string()),
            ApiError::InvalidQuery(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::InvalidPath(status, msg) => (status, msg),
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

fn email_param(query: Result<Query<EmailQuery>, QueryRejection>) -> Result<String, ApiError> {
    match query {
        Ok(Query(q)) => Ok(q.email),
        Err(rejection) => Err(ApiError::InvalidQuery(rejection.body_text())),
    }
}

fn activity_param(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    match path {
        Ok(Path(name)) => Ok(name),
        Err(rejection) => Err(ApiError::InvalidPath(
            rejection.status(),
            rejection.body_text(),
        )),
    }
}

pub(crate) async fn list_activities_handler(State(state): State<AppState>) -> Json<Roster> {
    let roster = state.roster().clone();
    Json(roster)
}

pub(crate) async fn signup_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let activity_name = activity_param(path)?;
    let email = email_param(query)?;
    let result = state.roster().sign_up(&activity_name, &email);
    match result {
        Ok(message) => {
            info!("{}", message);
            Ok(Json(MessageResponse { message }))
        }
        Err(e) => {
            warn!("Signup for {} rejected: {}", activity_name, e);
            Err(e.into())
        }
    }
}

pub(crate) async fn withdraw_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let activity_name = activity_param(path)?;
    let email = email_param(query)?;
    let result = state.roster().withdraw(&activity_name, &email);
    match result {
        Ok(message) => {
            info!("{}", message);
            Ok(Json(MessageResponse { message }))
        }
        Err(e) => {
            warn!("Withdrawal from {} rejected: {}", activity_name, e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use axum::Router;
    use tower::ServiceExt;

    use super::*;
    use crate::models::Config;
    use crate::web::router;

    fn app() -> (Router, AppState) {
        let state = AppState::new(&Config::default()).unwrap();
        (router(state.clone(), "static"), state)
    }

    async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn chess_participants(state: &AppState) -> Vec<String> {
        state.roster().get("Chess Club").unwrap().participants.clone()
    }

    #[tokio::test]
    async fn test_get_activities_returns_all() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/activities").await;
        assert_eq!(status, StatusCode::OK);
        let map = body.as_object().unwrap();
        assert_eq!(map.len(), 9);
        for (_, activity) in map {
            assert!(activity["description"].is_string());
            assert!(activity["schedule"].is_string());
            assert!(activity["max_participants"].is_u64());
            assert!(activity["participants"].is_array());
        }
        assert_eq!(
            body["Chess Club"]["participants"],
            serde_json::json!(["michael@mergington.edu", "daniel@mergington.edu"])
        );
    }

    #[tokio::test]
    async fn test_signup_success() {
        let (app, state) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/activities/Chess%20Club/signup?email=new%40mergington.edu",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Signed up new@mergington.edu for Chess Club");
        assert!(chess_participants(&state).contains(&"new@mergington.edu".to_string()));
    }

    #[tokio::test]
    async fn test_signup_normalizes_email() {
        let (app, state) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/activities/Chess%20Club/signup?email=%20%20NEW_USER%40MERGINGTON.EDU%20%20",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            "Signed up new_user@mergington.edu for Chess Club"
        );
        assert_eq!(
            chess_participants(&state).last().unwrap(),
            "new_user@mergington.edu"
        );
    }

    #[tokio::test]
    async fn test_signup_duplicate() {
        let (app, state) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/activities/Chess%20Club/signup?email=MICHAEL%40MERGINGTON.EDU",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Student already signed up for this activity");
        assert_eq!(chess_participants(&state).len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_activity() {
        let (app, _) = app();
        for action in ["signup", "withdraw"] {
            let uri = format!("/activities/NoSuchActivity/{action}?email=test%40mergington.edu");
            let (status, body) = send(&app, Method::POST, &uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["detail"], "Activity not found");
        }
    }

    #[tokio::test]
    async fn test_withdraw_success() {
        let (app, state) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/activities/Chess%20Club/withdraw?email=DANIEL%40mergington.edu",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Removed daniel@mergington.edu from Chess Club");
        assert_eq!(chess_participants(&state), vec!["michael@mergington.edu"]);
    }

    #[tokio::test]
    async fn test_withdraw_not_signed_up() {
        let (app, state) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/activities/Chess%20Club/withdraw?email=nobody%40mergington.edu",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Student not signed up for this activity");
        assert_eq!(chess_participants(&state).len(), 2);
    }

    #[tokio::test]
    async fn test_missing_email() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::POST, "/activities/Chess%20Club/signup").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_root_redirects_to_static_page() {
        let (app, _) = app();
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/static/index.html"
        );
    }

    #[tokio::test]
    async fn test_bad_activity_segment_is_json() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/activities/%FF/signup?email=a%40mergington.edu",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("UTF-8"));
    }

    #[tokio::test]
    async fn test_same_student_in_two_activities() {
        let (app, state) = app();
        let email = "multi%40mergington.edu";
        for activity in ["Chess%20Club", "Programming%20Class"] {
            let uri = format!("/activities/{activity}/signup?email={email}");
            let (status, _) = send(&app, Method::POST, &uri).await;
            assert_eq!(status, StatusCode::OK);
        }
        let roster = state.roster();
        for activity in ["Chess Club", "Programming Class"] {
            let participants = &roster.get(activity).unwrap().participants;
            assert_eq!(participants.last().unwrap(), "multi@mergington.edu");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_signups_keep_every_student() {
        let (app, state) = app();
        let n = 100;

        let tasks: Vec<_> = (0..n)
            .map(|i| {
                let app = app.clone();
                tokio::spawn(async move {
                    let uri = format!(
                        "/activities/Chess%20Club/signup?email=student{i}%40mergington.edu"
                    );
                    let req = Request::builder()
                        .method(Method::POST)
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap();
                    app.oneshot(req).await.unwrap().status()
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), StatusCode::OK);
        }
        assert_eq!(chess_participants(&state).len(), 2 + n);
    }

    #[tokio::test]
    async fn test_static_files() {
        let state = AppState::new(&Config::default()).unwrap();
        let app = router(state, concat!(env!("CARGO_MANIFEST_DIR"), "/static"));

        let req = Request::builder()
            .uri("/static/index.html")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let req = Request::builder()
            .uri("/static/nope.html")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app();
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
