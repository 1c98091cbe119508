//! API client tests against an in-process axum server

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderMap as ServerHeaders, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::{json, Value};

use portal_core::{
    Database, MemoryTokenStore, NewTicket, SqliteTokenStore, TaskStatus, TicketStatus, TokenStore,
};
use portal_net::{ApiClient, CancelScope, Error};

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
}

fn client(base_url: &str, token: Option<&str>) -> (ApiClient, Arc<MemoryTokenStore>) {
    let tokens = Arc::new(match token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::new(),
    });
    let api = ApiClient::new(base_url, tokens.clone()).unwrap();
    (api, tokens)
}

/// Router answering `GET /api/tasks` with `body`, counting hits
fn tasks_router(body: Value, hits: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        "/api/tasks",
        get(move || {
            let body = body.clone();
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(body)
            }
        }),
    )
}

#[tokio::test]
async fn test_missing_token_fails_before_network() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(tasks_router(json!([]), hits.clone())).await;
    let (api, _) = client(&base, None);

    let err = api.tasks().await.unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));
    assert!(err.needs_login());

    let err = api
        .authorized_request(Method::GET, "/api/tasks", HeaderMap::new(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_token_read_on_every_call() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(tasks_router(json!([]), hits.clone())).await;
    let (api, tokens) = client(&base, None);

    tokens.set_token("late").unwrap();
    assert!(api.tasks().await.unwrap().is_empty());

    api.logout().unwrap();
    assert!(matches!(api.tasks().await, Err(Error::Unauthenticated)));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_auth_headers_override_caller_values() {
    let seen: Arc<Mutex<Option<ServerHeaders>>> = Arc::new(Mutex::new(None));
    let app = Router::new().route(
        "/api/echo",
        get({
            let seen = seen.clone();
            move |headers: ServerHeaders| {
                let seen = seen.clone();
                async move {
                    *seen.lock().unwrap() = Some(headers);
                    StatusCode::NO_CONTENT
                }
            }
        }),
    );
    let base = spawn_server(app).await;
    let (api, _) = client(&base, Some("fresh-token"));

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer stale"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    headers.insert("x-request-source", HeaderValue::from_static("cli"));

    let response = api
        .authorized_request(Method::GET, "/api/echo", headers, None)
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let headers = seen.lock().unwrap().take().unwrap();
    let auth: Vec<_> = headers.get_all("authorization").iter().collect();
    assert_eq!(auth.len(), 1);
    assert_eq!(auth[0].to_str().unwrap(), "Bearer fresh-token");
    assert_eq!(
        headers.get("content-type").unwrap().to_str().unwrap(),
        "application/json"
    );
    assert_eq!(headers.get("x-request-source").unwrap().to_str().unwrap(), "cli");
}

#[tokio::test]
async fn test_non_array_payload_rejected() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(tasks_router(json!({"tasks": []}), hits)).await;
    let (api, _) = client(&base, Some("t"));

    let err = api.tasks().await.unwrap_err();
    assert!(matches!(err, Error::InvalidResponse(_)));
    assert_eq!(err.to_string(), "Invalid response format: expected an array");
}

#[tokio::test]
async fn test_lenient_task_records() {
    let hits = Arc::new(AtomicUsize::new(0));
    let body = json!([
        {"id": 1, "title": "Roadmap", "status": "completed", "currentPhase": 4},
        {"_id": "x9", "assignedTo": null}
    ]);
    let base = spawn_server(tasks_router(body, hits)).await;
    let (api, _) = client(&base, Some("t"));

    let tasks = api.tasks().await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, "1");
    assert_eq!(tasks[0].status, TaskStatus::Completed);
    assert_eq!(tasks[0].progress_percent(), 100);
    assert_eq!(tasks[1].id, "x9");
    assert_eq!(tasks[1].title, "Untitled");
    assert!(tasks[1].assigned_to.is_empty());
}

#[tokio::test]
async fn test_http_error_carries_status_and_body() {
    let app = Router::new().route(
        "/api/helpdesk",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database offline") }),
    );
    let base = spawn_server(app).await;
    let (api, _) = client(&base, Some("t"));

    match api.tickets().await.unwrap_err() {
        Error::Http {
            status,
            status_text,
            body,
        } => {
            assert_eq!(status, 500);
            assert_eq!(status_text, "Internal Server Error");
            assert_eq!(body, "database offline");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_login_persists_token() {
    let app = Router::new().route(
        "/api/login",
        post(|Json(body): Json<Value>| async move {
            if body["password"] == "secret" {
                (StatusCode::OK, Json(json!({"token": "issued-token"})))
            } else if body["password"] == "tokenless" {
                (StatusCode::OK, Json(json!({"ok": true})))
            } else {
                (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad credentials"})))
            }
        }),
    );
    let base = spawn_server(app).await;
    let db = Arc::new(Mutex::new(Database::open_in_memory().unwrap()));
    let tokens = Arc::new(SqliteTokenStore::new(db.clone()));
    let api = ApiClient::new(&base, tokens.clone()).unwrap();

    let err = api.login("john.doe@tecnics.com", "wrong").await.unwrap_err();
    assert!(err.to_string().starts_with("Login failed: "));
    assert!(tokens.token().unwrap().is_none());

    let err = api.login("john.doe@tecnics.com", "tokenless").await.unwrap_err();
    assert_eq!(err.to_string(), "No token returned from login");
    assert!(tokens.token().unwrap().is_none());

    let token = api.login("john.doe@tecnics.com", "secret").await.unwrap();
    assert_eq!(token, "issued-token");
    let stored = db
        .lock()
        .unwrap()
        .client_storage()
        .get("bearerToken")
        .unwrap();
    assert_eq!(stored.as_deref(), Some("issued-token"));
    assert!(api.has_token().unwrap());
}

#[tokio::test]
async fn test_create_ticket_merges_echo() {
    let app = Router::new().route(
        "/api/helpdesk",
        post(|Json(body): Json<Value>| async move {
            Json(json!({
                "_id": "srv-1",
                "raisedBy": body["raisedBy"],
                "createdAt": "2024-04-02T08:00:00Z"
            }))
        }),
    );
    let base = spawn_server(app).await;
    let (api, _) = client(&base, Some("t"));

    let mut ticket = NewTicket::raised_by("John Doe");
    ticket.ticket_type = "Access Request".into();
    ticket.description = "Need VPN access".into();
    ticket.department = "Information Technology".into();

    let created = api.create_ticket(&ticket).await.unwrap();
    assert_eq!(created.id, "srv-1");
    assert_eq!(created.raised_by, "John Doe");
    assert_eq!(created.ticket_type, "Access Request");
    assert_eq!(created.status, TicketStatus::Open);
    assert_eq!(created.created_at, "2024-04-02");
}

#[tokio::test]
async fn test_cancelled_load_resolves_to_cancelled() {
    let app = Router::new().route(
        "/api/tasks",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(json!([]))
        }),
    );
    let base = spawn_server(app).await;
    let (api, _) = client(&base, Some("t"));

    let scope = CancelScope::new();
    let handle = scope.handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
    });

    let result = scope.token().run(api.tasks()).await;
    assert!(matches!(result, Err(Error::Cancelled)));
}

#[tokio::test]
async fn test_request_timeout_from_config() {
    let app = Router::new().route(
        "/api/employee",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(json!([]))
        }),
    );
    let base = spawn_server(app).await;
    let tokens = Arc::new(MemoryTokenStore::with_token("t"));
    let config = portal_core::PortalConfig {
        api_base_url: base,
        request_timeout_secs: Some(1),
        ..Default::default()
    };
    let api = ApiClient::from_config(&config, tokens).unwrap();

    let err = api.employees().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
