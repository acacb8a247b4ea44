//! Projects client against an in-process HTTP server
//!
//! The server mimics the Django side of the CSRF convention: list responses
//! set a `csrftoken` cookie, and every request's `X-CSRFToken` header is
//! recorded for inspection.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use id2_projects::app::{pump_background, App};
use id2_projects::config::Config;
use id2_projects::domain::{ProjectPayload, ProjectRecord};
use id2_projects::infrastructure::api::{ApiError, ProjectsApi, ProjectsClient};
use id2_projects::infrastructure::runtime::RuntimeBridge;
use id2_projects::modules::dialog::TriggerEvent;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
struct Seen {
    method: String,
    csrf: Option<String>,
    body: Option<Value>,
}

#[derive(Default)]
struct ServerState {
    projects: Mutex<Vec<Value>>,
    seen: Mutex<Vec<Seen>>,
    reject_posts: bool,
    /// Set the token cookie without a Path attribute, scoping it to the
    /// collection path
    unscoped_cookie: bool,
}

type Shared = Arc<ServerState>;

fn csrf_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-csrftoken")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn list(State(state): State<Shared>, headers: HeaderMap) -> impl IntoResponse {
    state.seen.lock().unwrap().push(Seen {
        method: "GET".into(),
        csrf: csrf_of(&headers),
        body: None,
    });
    let projects = state.projects.lock().unwrap().clone();
    let cookie = if state.unscoped_cookie {
        "csrftoken=tok123"
    } else {
        "csrftoken=tok123; Path=/"
    };
    (
        [(header::SET_COOKIE, cookie)],
        Json(Value::Array(projects)),
    )
}

async fn create(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.seen.lock().unwrap().push(Seen {
        method: "POST".into(),
        csrf: csrf_of(&headers),
        body: Some(body.clone()),
    });
    if state.reject_posts {
        return (StatusCode::FORBIDDEN, Json(json!({"detail": "CSRF Failed"})));
    }
    let mut projects = state.projects.lock().unwrap();
    let mut record = body.as_object().cloned().unwrap_or_default();
    record.insert("id".into(), json!(projects.len() + 1));
    projects.push(Value::Object(record.clone()));
    (StatusCode::CREATED, Json(Value::Object(record)))
}

async fn start_server(state: Shared) -> String {
    let app = Router::new()
        .route("/api/projects/", get(list).post(create))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve") });
    format!("http://{addr}")
}

/// Server on its own runtime thread, for tests that drive the sync bridge
fn start_server_thread(state: Shared) -> String {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("runtime");
        rt.block_on(async move {
            tx.send(start_server(state).await).expect("send addr");
            std::future::pending::<()>().await;
        });
    });
    rx.recv_timeout(Duration::from_secs(5)).expect("server addr")
}

fn seeded(projects: Value) -> Shared {
    let state = ServerState::default();
    *state.projects.lock().unwrap() = projects.as_array().cloned().unwrap_or_default();
    Arc::new(state)
}

fn records(value: Value) -> Vec<ProjectRecord> {
    value
        .as_array()
        .expect("array")
        .iter()
        .map(|v| v.as_object().cloned().expect("object"))
        .collect()
}

fn payload(value: Value) -> ProjectPayload {
    value.as_object().cloned().expect("object")
}

#[tokio::test]
async fn test_csrf_cookie_is_echoed_as_header() {
    let state = seeded(json!([{"id": 1, "name": "Alpha"}]));
    let base = start_server(state.clone()).await;
    let client = ProjectsClient::new(&base).expect("client");

    let list = client.list_projects().await.expect("list");
    assert_eq!(list, records(json!([{"id": 1, "name": "Alpha"}])));
    assert_eq!(client.csrf_token().as_deref(), Some("tok123"));

    let response = client
        .create_project(&payload(json!({"name": "Beta"})))
        .await
        .expect("create");
    assert_eq!(response, json!({"id": 2, "name": "Beta"}));

    let seen = state.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            Seen {
                method: "GET".into(),
                csrf: None,
                body: None,
            },
            Seen {
                method: "POST".into(),
                csrf: Some("tok123".into()),
                body: Some(json!({"name": "Beta"})),
            },
        ]
    );
}

#[tokio::test]
async fn test_cookie_without_path_still_sets_header_on_post() {
    let state = Arc::new(ServerState {
        unscoped_cookie: true,
        ..ServerState::default()
    });
    let base = start_server(state.clone()).await;
    let client = ProjectsClient::new(&base).expect("client");

    client.list_projects().await.expect("list");
    client
        .create_project(&payload(json!({"name": "Beta"})))
        .await
        .expect("create");

    let seen = state.seen.lock().unwrap().clone();
    assert_eq!(seen[1].method, "POST");
    assert_eq!(seen[1].csrf.as_deref(), Some("tok123"));
}

#[tokio::test]
async fn test_seeded_cookie_is_sent_on_first_request() {
    let state = seeded(json!([]));
    let base = start_server(state.clone()).await;
    let client = ProjectsClient::new(&base)
        .expect("client")
        .with_cookies(&[("csrftoken".to_string(), "fromconfig".to_string())]);

    client.list_projects().await.expect("list");
    let seen = state.seen.lock().unwrap().clone();
    assert_eq!(seen[0].csrf.as_deref(), Some("fromconfig"));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let state = Arc::new(ServerState {
        reject_posts: true,
        ..ServerState::default()
    });
    let base = start_server(state).await;
    let client = ProjectsClient::new(&base).expect("client");

    let err = client
        .create_project(&payload(json!({"name": "Beta"})))
        .await
        .expect_err("rejected");
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("CSRF Failed"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = ProjectsClient::new(&format!("http://{addr}")).expect("client");
    let err = client.list_projects().await.expect_err("unreachable");
    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn test_example_scenario_end_to_end() {
    let state = seeded(json!([{"id": 1, "name": "Alpha"}]));
    let base = start_server_thread(state.clone());
    let client = ProjectsClient::new(&base).expect("client");
    let bridge = RuntimeBridge::new(Arc::new(client)).expect("bridge");
    let config = Config {
        base_url: base,
        ..Config::default()
    };
    let mut app = App::init(&config);

    settle(&mut app, &bridge);
    assert_eq!(app.project_list, records(json!([{"id": 1, "name": "Alpha"}])));

    app.open_new_project_dialog(TriggerEvent::Key);
    app.confirm_dialog(payload(json!({"name": "Beta"})));
    settle(&mut app, &bridge);

    assert_eq!(
        app.project_list,
        records(json!([{"id": 1, "name": "Alpha"}, {"id": 2, "name": "Beta"}]))
    );
    let methods: Vec<String> = state
        .seen
        .lock()
        .unwrap()
        .iter()
        .map(|s| s.method.clone())
        .collect();
    assert_eq!(methods, vec!["GET", "POST", "GET"]);
}

fn settle(app: &mut App, bridge: &RuntimeBridge) {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        pump_background(app, bridge);
        if app.in_flight == 0 {
            return;
        }
        assert!(Instant::now() < deadline, "runtime did not settle");
        std::thread::sleep(Duration::from_millis(5));
    }
}
