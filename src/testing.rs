//! In-process mock of the three Palette endpoints used by the import flow

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use crate::config::ConnectionConfig;
use crate::palette::client::{API_KEY_HEADER, PROJECT_UID_HEADER};

/// Connection settings pointing at a mock endpoint
pub fn connection(endpoint: &str) -> ConnectionConfig {
    ConnectionConfig {
        api_endpoint: endpoint.to_string(),
        project_uid: "test-project".to_string(),
        api_key: "test-key".to_string(),
        timeout: None,
    }
}

/// One request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub api_key: Option<String>,
    pub project_uid: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
pub struct MockPalette {
    list_body: Value,
    list_status: StatusCode,
    import_body: Value,
    import_status: StatusCode,
    manifest_status: StatusCode,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockPalette {
    pub fn new(list_body: Value) -> Self {
        Self {
            list_body,
            list_status: StatusCode::OK,
            import_body: json!({"uid": "imported-uid"}),
            import_status: StatusCode::CREATED,
            manifest_status: StatusCode::OK,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn fail_list(mut self, status: StatusCode) -> Self {
        self.list_status = status;
        self
    }

    pub fn fail_import(mut self, status: StatusCode) -> Self {
        self.import_status = status;
        self
    }

    pub fn fail_manifest(mut self, status: StatusCode) -> Self {
        self.manifest_status = status;
        self
    }

    pub fn import_response(mut self, body: Value) -> Self {
        self.import_body = body;
        self
    }

    /// Manifest text served for a cluster uid
    pub fn manifest_for(uid: &str) -> String {
        format!(
            "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: cluster-{}\n",
            uid
        )
    }

    /// Bind to an ephemeral loopback port and serve until the test ends
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/v1/spectroclusters", get(list_clusters))
            .route("/v1/spectroclusters/:id/import", post(import_cluster))
            .route("/v1/spectroclusters/:id/import/manifest", get(import_manifest))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock listener");
        let addr = listener.local_addr().expect("Mock listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server failed");
        });

        format!("http://{}", addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn import_count(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == "POST")
            .count()
    }

    fn record(&self, method: &str, path: String, headers: &HeaderMap, body: Option<Value>) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            path,
            api_key: header(API_KEY_HEADER),
            project_uid: header(PROJECT_UID_HEADER),
            body,
        });
    }
}

fn rejected(status: StatusCode) -> Response {
    (
        status,
        json!({"code": status.as_u16().to_string(), "message": "request rejected"}).to_string(),
    )
        .into_response()
}

async fn list_clusters(State(mock): State<MockPalette>, headers: HeaderMap) -> Response {
    mock.record("GET", "/v1/spectroclusters".to_string(), &headers, None);
    if !mock.list_status.is_success() {
        return rejected(mock.list_status);
    }
    Json(mock.list_body.clone()).into_response()
}

async fn import_cluster(
    State(mock): State<MockPalette>,
    Path(cloud_type): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.record(
        "POST",
        format!("/v1/spectroclusters/{}/import", cloud_type),
        &headers,
        Some(body),
    );
    if !mock.import_status.is_success() {
        return rejected(mock.import_status);
    }
    (mock.import_status, Json(mock.import_body.clone())).into_response()
}

async fn import_manifest(
    State(mock): State<MockPalette>,
    Path(uid): Path<String>,
    headers: HeaderMap,
) -> Response {
    mock.record(
        "GET",
        format!("/v1/spectroclusters/{}/import/manifest", uid),
        &headers,
        None,
    );
    if !mock.manifest_status.is_success() {
        return rejected(mock.manifest_status);
    }
    MockPalette::manifest_for(&uid).into_response()
}
