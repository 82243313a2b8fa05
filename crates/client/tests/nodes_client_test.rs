//! Nodes client tests against an in-process fake repository.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use mailex_client::NodesClient;
use mailex_core::repository::{
    AssociationBody, ContentRepository, NodeBodyCreate, RepositoryError,
};
use mailex_shared::RepositoryConfig;
use rstest::rstest;
use serde_json::{Value, json};

const API_PATH: &str = "/alfresco/api/-default-/public/alfresco/versions/1";
// base64("admin:secret")
const BASIC_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Option<String>,
    authorization: Option<String>,
    content_type: Option<String>,
    body: Bytes,
}

#[derive(Clone, Default)]
struct FakeRepository {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeRepository {
    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn json_response(status: StatusCode, body: &Value) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body.to_string(),
    )
        .into_response()
}

async fn fake_nodes_api(State(fake): State<FakeRepository>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap();
    let header_value = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let path = parts
        .uri
        .path()
        .strip_prefix(API_PATH)
        .unwrap_or_default()
        .to_string();

    fake.requests.lock().unwrap().push(Recorded {
        method: parts.method.clone(),
        path: path.clone(),
        query: parts.uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: body.clone(),
    });

    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    match (parts.method, segments.as_slice()) {
        (Method::GET, ["nodes", "missing", "content"]) => {
            (StatusCode::NOT_FOUND, "no such node").into_response()
        }
        (Method::GET, ["nodes", "big", "content"]) => Body::from("0123456789").into_response(),
        (Method::GET, ["nodes", _, "content"]) => Body::from("raw-message").into_response(),
        (Method::POST, ["nodes", parent, "children"]) => {
            let request: Value = serde_json::from_slice(&body).unwrap();
            match request["name"].as_str() {
                Some("taken") => json_response(
                    StatusCode::CONFLICT,
                    &json!({
                        "error": {
                            "errorKey": "Duplicate child name not allowed",
                            "statusCode": 409,
                            "briefSummary": "Duplicate child name not allowed: taken"
                        }
                    }),
                ),
                Some("garbage") => (StatusCode::CREATED, "not json").into_response(),
                _ => json_response(
                    StatusCode::CREATED,
                    &json!({
                        "entry": {
                            "id": "created-1",
                            "name": request["name"],
                            "nodeType": request["nodeType"],
                            "parentId": parent
                        }
                    }),
                ),
            }
        }
        (Method::PUT, ["nodes", id, "content"]) => {
            json_response(StatusCode::OK, &json!({ "entry": { "id": id } }))
        }
        (Method::POST, ["nodes", _, "targets"]) => {
            let request: Value = serde_json::from_slice(&body).unwrap();
            json_response(StatusCode::CREATED, &json!({ "entry": request }))
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_fake() -> (FakeRepository, SocketAddr) {
    let fake = FakeRepository::default();
    let app = Router::new()
        .fallback(fake_nodes_api)
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (fake, addr)
}

fn client(addr: SocketAddr, max_content_bytes: u64) -> NodesClient {
    NodesClient::new(&RepositoryConfig {
        base_url: format!("http://{addr}{API_PATH}/"),
        username: "admin".to_string(),
        password: "secret".to_string(),
        timeout_secs: 5,
        max_content_bytes,
    })
    .expect("client should build")
}

#[tokio::test]
async fn test_get_content_downloads_as_attachment() {
    let (fake, addr) = spawn_fake().await;

    let content = client(addr, 1024).get_content("msg-1").await.unwrap();

    assert_eq!(content, Bytes::from_static(b"raw-message"));
    let requests = fake.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, "/nodes/msg-1/content");
    assert_eq!(requests[0].query.as_deref(), Some("attachment=true"));
    assert_eq!(requests[0].authorization.as_deref(), Some(BASIC_AUTH));
}

#[tokio::test]
async fn test_get_content_over_limit_is_rejected() {
    let (_fake, addr) = spawn_fake().await;

    let err = client(addr, 4).get_content("big").await.unwrap_err();

    assert!(matches!(err, RepositoryError::ContentTooLarge { limit: 4 }));
}

#[tokio::test]
async fn test_get_content_at_limit_is_accepted() {
    let (_fake, addr) = spawn_fake().await;

    let content = client(addr, 10).get_content("big").await.unwrap();

    assert_eq!(content.len(), 10);
}

#[tokio::test]
async fn test_error_without_json_body_uses_reason_phrase() {
    let (_fake, addr) = spawn_fake().await;

    let err = client(addr, 1024).get_content("missing").await.unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::Status { status: 404, ref message } if message == "Not Found"
    ));
}

#[tokio::test]
async fn test_create_node_posts_body_with_auto_rename() {
    let (fake, addr) = spawn_fake().await;

    let node = client(addr, 1024)
        .create_node("parent-1", &NodeBodyCreate::folder("Receipt"))
        .await
        .unwrap();

    assert_eq!(node.id, "created-1");
    assert_eq!(node.name, "Receipt");
    assert_eq!(node.node_type, "cm:folder");
    assert_eq!(node.parent_id.as_deref(), Some("parent-1"));

    let requests = fake.requests();
    let request = &requests[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/nodes/parent-1/children");
    assert_eq!(request.query.as_deref(), Some("autoRename=true"));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    let body: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body, json!({ "name": "Receipt", "nodeType": "cm:folder" }));
}

#[tokio::test]
async fn test_create_node_error_carries_brief_summary() {
    let (_fake, addr) = spawn_fake().await;

    let err = client(addr, 1024)
        .create_node("parent-1", &NodeBodyCreate::content("taken"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(409));
    assert_eq!(
        err.to_string(),
        "repository returned status 409: Duplicate child name not allowed: taken"
    );
}

#[tokio::test]
async fn test_create_node_undecodable_response() {
    let (_fake, addr) = spawn_fake().await;

    let err = client(addr, 1024)
        .create_node("parent-1", &NodeBodyCreate::content("garbage"))
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Decode(_)));
}

#[tokio::test]
async fn test_update_node_content_puts_octet_stream_minor_version() {
    let (fake, addr) = spawn_fake().await;

    client(addr, 1024)
        .update_node_content("node-2", Bytes::from_static(b"%PDF-1.4"))
        .await
        .unwrap();

    let requests = fake.requests();
    let request = &requests[0];
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.path, "/nodes/node-2/content");
    assert_eq!(request.query.as_deref(), Some("majorVersion=false"));
    assert_eq!(request.content_type.as_deref(), Some("application/octet-stream"));
    assert_eq!(request.body, Bytes::from_static(b"%PDF-1.4"));
}

#[rstest]
#[case(AssociationBody::attachment("node-2"), "imap:attachment")]
#[case(AssociationBody::attachments_folder("node-1"), "imap:attachmentsFolder")]
#[tokio::test]
async fn test_create_association_posts_to_targets(
    #[case] body: AssociationBody,
    #[case] assoc_type: &str,
) {
    let (fake, addr) = spawn_fake().await;

    client(addr, 1024)
        .create_association("msg-1", &body)
        .await
        .unwrap();

    let requests = fake.requests();
    let request = &requests[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/nodes/msg-1/targets");
    assert_eq!(request.authorization.as_deref(), Some(BASIC_AUTH));
    let sent: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(
        sent,
        json!({ "targetId": body.target_id, "assocType": assoc_type })
    );
}

#[tokio::test]
async fn test_unreachable_repository_is_transport_error() {
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let err = client(addr, 1024).get_content("msg-1").await.unwrap_err();

    assert!(matches!(err, RepositoryError::Transport(_)));
}
