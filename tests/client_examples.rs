//! Client examples against a mock of the remote API and against the toy server.

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use http_basics::client::{ClientError, Example, ExampleClient};
use http_basics::config::ClientConfig;

mod common;

fn client_for(base_url: String) -> ExampleClient {
    ExampleClient::new(&ClientConfig {
        base_url,
        timeout_secs: 5,
        ..ClientConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn examples_send_documented_requests() {
    let (addr, recorder) = common::start_mock_api().await;
    let client = client_for(format!("http://{}", addr));

    let results = client.run_all().await;
    assert_eq!(results.len(), 4);
    for (example, result) in &results {
        assert!(result.is_ok(), "{:?} failed: {:?}", example, result.as_ref().err());
    }

    let requests = recorder.requests();
    assert_eq!(requests.len(), 4);

    let get = &requests[0];
    assert_eq!(get.method, Method::GET);
    assert_eq!(get.path, "/users/1");
    assert_eq!(get.headers[ACCEPT], "application/json");
    assert_eq!(get.headers[USER_AGENT], ClientConfig::default().user_agent.as_str());

    let post = &requests[1];
    assert_eq!(post.method, Method::POST);
    assert_eq!(post.path, "/users");
    assert_eq!(post.headers[CONTENT_TYPE], "application/json");
    assert_eq!(post.headers[ACCEPT], "application/json");
    assert_eq!(
        serde_json::from_str::<Value>(&post.body).unwrap(),
        json!({"name": "Kat Perreira", "email": "kat@example.com", "username": "katperreira"})
    );

    let put = &requests[2];
    assert_eq!(put.method, Method::PUT);
    assert_eq!(put.path, "/users/1");
    assert_eq!(put.headers[CONTENT_TYPE], "application/json");
    assert_eq!(
        serde_json::from_str::<Value>(&put.body).unwrap(),
        json!({"id": 1, "name": "Kat Perreira Updated", "email": "kat.updated@example.com", "username": "katperreira"})
    );

    let delete = &requests[3];
    assert_eq!(delete.method, Method::DELETE);
    assert_eq!(delete.path, "/users/1");
    assert!(delete.body.is_empty());
}

#[tokio::test]
async fn exchanges_capture_responses() {
    let (addr, _recorder) = common::start_mock_api().await;
    let client = client_for(format!("http://{}", addr));

    let get = client.send(Example::Get).await.unwrap();
    assert_eq!(get.status, StatusCode::OK);
    assert_eq!(get.json().unwrap()["name"], "Leanne Graham");
    assert_eq!(get.response_headers[CONTENT_TYPE], "application/json");

    let post = client.send(Example::Post).await.unwrap();
    assert_eq!(post.status, StatusCode::CREATED);
    assert_eq!(post.json().unwrap()["id"], 11);
    assert!(post.pretty_body().contains("\n  \"name\": \"Kat Perreira\""));

    let delete = client.send(Example::Delete).await.unwrap();
    assert_eq!(delete.status, StatusCode::OK);
}

#[tokio::test]
async fn transport_failure_does_not_stop_later_examples() {
    let addr = common::closed_addr().await;
    let client = client_for(format!("http://{}", addr));

    let results = client.run_all().await;
    let order: Vec<Example> = results.iter().map(|(e, _)| *e).collect();
    assert_eq!(order, Example::ALL.to_vec());
    for (_, result) in results {
        assert!(matches!(result, Err(ClientError::Http(_))));
    }
}

#[tokio::test]
async fn examples_against_local_server() {
    let server = common::start_server().await;
    let client = client_for(server.url("/api"));

    let get = client.send(Example::Get).await.unwrap();
    assert_eq!(get.status, StatusCode::OK);
    assert_eq!(get.json().unwrap()["name"], "Kat Perreira");

    let post = client.send(Example::Post).await.unwrap();
    assert_eq!(post.status, StatusCode::CREATED);
    assert_eq!(post.json().unwrap()["id"], 3);

    // The toy server has no PUT route
    let put = client.send(Example::Put).await.unwrap();
    assert_eq!(put.status, StatusCode::NOT_FOUND);
    assert_eq!(put.json().unwrap()["error"], "Endpoint not found");

    let delete = client.send(Example::Delete).await.unwrap();
    assert_eq!(delete.status, StatusCode::NO_CONTENT);

    let store = server.stop().await;
    assert!(store.get(1).is_none());
    assert_eq!(store.get(3).unwrap().name.as_deref(), Some("Kat Perreira"));
}
