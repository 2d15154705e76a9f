use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use client_roster::api::{ApiError, ClientService, HttpClientService};
use client_roster::models::{Client, NewClient, Phone};

#[derive(Clone, Default)]
struct FakeBackend {
    clients: Arc<Mutex<Vec<Client>>>,
    last_post_body: Arc<Mutex<Option<Value>>>,
    delete_failure: Arc<Mutex<Option<StatusCode>>>,
    put_returns_no_content: Arc<Mutex<bool>>,
}

async fn list(State(backend): State<FakeBackend>) -> Json<Vec<Client>> {
    Json(backend.clients.lock().unwrap().clone())
}

async fn get_one(State(backend): State<FakeBackend>, Path(id): Path<i32>) -> Response {
    match backend.clients.lock().unwrap().iter().find(|c| c.client_id == id) {
        Some(client) => Json(client.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "no such client").into_response(),
    }
}

async fn create(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Response {
    *backend.last_post_body.lock().unwrap() = Some(body.clone());

    let new_client: NewClient = match serde_json::from_value(body) {
        Ok(new_client) => new_client,
        Err(err) => return (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    };

    let mut clients = backend.clients.lock().unwrap();
    let client_id = clients.iter().map(|c| c.client_id).max().unwrap_or(0) + 1;
    let created = Client {
        client_id,
        first_name: new_client.first_name,
        last_name: new_client.last_name,
        email: new_client.email,
        is_archived: new_client.is_archived,
        phones: new_client
            .phones
            .into_iter()
            .enumerate()
            .map(|(i, phone)| Phone {
                phone_id: Some(100 + i as i32),
                client_id,
                ..phone
            })
            .collect(),
    };
    clients.push(created.clone());

    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update(State(backend): State<FakeBackend>, Path(id): Path<i32>, Json(client): Json<Client>) -> Response {
    if client.client_id != id {
        return (StatusCode::BAD_REQUEST, "id in path and body differ").into_response();
    }

    let mut clients = backend.clients.lock().unwrap();
    let Some(existing) = clients.iter_mut().find(|c| c.client_id == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    *existing = client.clone();

    if *backend.put_returns_no_content.lock().unwrap() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(client).into_response()
    }
}

async fn delete(State(backend): State<FakeBackend>, Path(id): Path<i32>) -> Response {
    if let Some(status) = *backend.delete_failure.lock().unwrap() {
        return (status, "database on fire").into_response();
    }

    let mut clients = backend.clients.lock().unwrap();
    let before = clients.len();
    clients.retain(|c| c.client_id != id);
    if clients.len() == before {
        StatusCode::NOT_FOUND.into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn start(clients: Vec<Client>) -> (FakeBackend, HttpClientService) {
    let backend = FakeBackend::default();
    *backend.clients.lock().unwrap() = clients;

    let router = Router::new()
        .route("/api/clients", get(list).post(create))
        .route("/api/clients/:id", get(get_one).put(update).delete(delete))
        .with_state(backend.clone());
    let addr = serve(router).await;

    let service = HttpClientService::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    (backend, service)
}

fn client(id: i32, first: &str, last: &str) -> Client {
    Client {
        client_id: id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: Some(format!("{}@example.com", first.to_lowercase())),
        is_archived: Some(false),
        phones: vec![Phone {
            phone_id: Some(id * 10),
            ..Phone::new(id, "555-010-0100", Some(1))
        }],
    }
}

#[tokio::test]
async fn list_preserves_server_order() {
    let (_, service) = start(vec![client(5, "Eve", "Adams"), client(2, "Bob", "Stone")]).await;

    let clients = service.list_clients().await.unwrap();
    let ids: Vec<i32> = clients.iter().map(|c| c.client_id).collect();
    assert_eq!(ids, [5, 2]);
    assert_eq!(clients[0].phones[0].phone_id, Some(50));
}

#[tokio::test]
async fn create_posts_the_exact_payload() {
    let (backend, service) = start(Vec::new()).await;

    let new_client = NewClient {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: None,
        ..Default::default()
    };
    let created = service.create_client(&new_client).await.unwrap();

    assert_eq!(
        backend.last_post_body.lock().unwrap().clone(),
        Some(json!({ "firstName": "Ada", "lastName": "Lovelace", "email": null }))
    );
    assert_eq!(created.client_id, 1);
}

#[tokio::test]
async fn created_client_reads_back_with_its_new_id() {
    let (_, service) = start(vec![client(4, "Carol", "Shaw")]).await;

    let new_client = NewClient {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: Some("grace@navy.mil".to_string()),
        is_archived: Some(false),
        phones: vec![Phone::new(0, "+1 202 555 0101", Some(3))],
    };
    let created = service.create_client(&new_client).await.unwrap();
    let fetched = service.get_client(created.client_id).await.unwrap();

    assert_eq!(fetched.client_id, 5);
    assert_eq!(fetched.to_new_client().first_name, new_client.first_name);
    assert_eq!(fetched.last_name, new_client.last_name);
    assert_eq!(fetched.email, new_client.email);
    assert_eq!(fetched.phones[0].phone_number, "+1 202 555 0101");
    assert_eq!(fetched.phones[0].client_id, 5);
}

#[tokio::test]
async fn no_op_update_leaves_the_record_unchanged() {
    let original = client(9, "Alan", "Turing");
    let (_, service) = start(vec![original.clone()]).await;

    let fetched = service.get_client(9).await.unwrap();
    let updated = service.update_client(9, &fetched).await.unwrap();

    assert_eq!(updated, original);
    assert_eq!(service.get_client(9).await.unwrap(), original);
}

#[tokio::test]
async fn update_with_no_content_returns_the_submitted_client() {
    let (backend, service) = start(vec![client(9, "Alan", "Turing")]).await;
    *backend.put_returns_no_content.lock().unwrap() = true;

    let mut changed = client(9, "Alan", "Turing");
    changed.is_archived = Some(true);
    let updated = service.update_client(9, &changed).await.unwrap();

    assert_eq!(updated, changed);
    assert_eq!(service.get_client(9).await.unwrap().is_archived, Some(true));
}

#[tokio::test]
async fn mismatched_ids_are_a_client_error() {
    let (_, service) = start(vec![client(9, "Alan", "Turing")]).await;

    let err = service
        .update_client(9, &client(8, "Alan", "Turing"))
        .await
        .unwrap_err();
    match err {
        ApiError::Client { status, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "id in path and body differ");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn deleted_client_is_not_found() {
    let (_, service) = start(vec![client(7, "Grace", "Hopper")]).await;

    service.delete_client(7).await.unwrap();

    assert!(service.get_client(7).await.unwrap_err().is_not_found());
    assert!(service.list_clients().await.unwrap().is_empty());
}

#[tokio::test]
async fn server_failure_on_delete_is_a_server_error() {
    let (backend, service) = start(vec![client(7, "Grace", "Hopper")]).await;
    *backend.delete_failure.lock().unwrap() = Some(StatusCode::INTERNAL_SERVER_ERROR);

    match service.delete_client(7).await.unwrap_err() {
        ApiError::Server { status, message } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, "database on fire");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(service.list_clients().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Grab a free port and release it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = HttpClientService::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let err = service.list_clients().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let router = Router::new().route("/api/clients", get(|| async { "<html>maintenance</html>" }));
    let addr = serve(router).await;

    let service = HttpClientService::new(&format!("http://{}/", addr), Duration::from_secs(5)).unwrap();
    let err = service.list_clients().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
}
