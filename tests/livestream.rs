mod common;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::time::Duration;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

async fn next_event(socket: &mut Socket) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("Timed out waiting for a livestream event")
            .expect("Socket closed")
            .expect("Socket error");

        if let Message::Text(text) = frame {
            return serde_json::from_str(&text).expect("Event is not JSON");
        }
    }
}

async fn state(client: &reqwest::Client, app: &common::TestApp) -> Value {
    let body: Value = client
        .get(app.url("/livestream"))
        .send()
        .await
        .expect("Failed to execute request.")
        .json()
        .await
        .unwrap();
    body["item"].clone()
}

#[actix_web::test]
async fn start_merges_metadata_and_stop_keeps_it() {
    let app = common::spawn_app_without_db().await;
    let client = reqwest::Client::new();

    let initial = state(&client, &app).await;
    assert_eq!(initial["is_streaming"], false);
    assert_eq!(initial["stream"]["quality"], "HD");
    assert!(initial["stream"]["started_at"].is_null());

    let response = client
        .post(app.url("/admin/livestream/start"))
        .bearer_auth(common::ADMIN_TOKEN)
        .json(&json!({"title": "Morning routine", "viewer_count": 12}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["item"]["is_streaming"], true);
    assert_eq!(body["item"]["stream"]["title"], "Morning routine");
    assert_eq!(body["item"]["stream"]["viewer_count"], 12);
    assert_eq!(body["item"]["stream"]["quality"], "HD");
    assert!(body["item"]["stream"]["started_at"].is_string());

    let response = client
        .post(app.url("/admin/livestream/stop"))
        .bearer_auth(common::ADMIN_TOKEN)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());

    let stopped = state(&client, &app).await;
    assert_eq!(stopped["is_streaming"], false);
    assert!(stopped["stream"]["started_at"].is_null());
    assert_eq!(stopped["stream"]["title"], "Morning routine");
    assert_eq!(stopped["stream"]["viewer_count"], 12);
}

#[actix_web::test]
async fn start_without_body_still_starts() {
    let app = common::spawn_app_without_db().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/admin/livestream/start"))
        .bearer_auth(common::ADMIN_TOKEN)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());

    let current = state(&client, &app).await;
    assert_eq!(current["is_streaming"], true);
    assert!(current["stream"]["started_at"].is_string());
}

#[actix_web::test]
async fn start_rejects_malformed_metadata() {
    let app = common::spawn_app_without_db().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/admin/livestream/start"))
        .bearer_auth(common::ADMIN_TOKEN)
        .json(&json!({"title": 42}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(400, response.status().as_u16());

    let response = client
        .post(app.url("/admin/livestream/start"))
        .bearer_auth(common::ADMIN_TOKEN)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body("title=Glow")
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(400, response.status().as_u16());

    let current = state(&client, &app).await;
    assert_eq!(current["is_streaming"], false);
    assert_eq!(current["stream"]["title"], "");
}

#[actix_web::test]
async fn counters_are_overwritten() {
    let app = common::spawn_app_without_db().await;
    let client = reqwest::Client::new();

    for (path, value) in [("/admin/livestream/viewers", 40), ("/admin/livestream/likes", -3)] {
        let response = client
            .put(app.url(path))
            .bearer_auth(common::ADMIN_TOKEN)
            .json(&json!({ "value": value }))
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(200, response.status().as_u16());
    }

    let current = state(&client, &app).await;
    assert_eq!(current["stream"]["viewer_count"], 40);
    assert_eq!(current["stream"]["likes"], -3);
}

#[actix_web::test]
async fn chat_keeps_only_the_latest_fifty() {
    let app = common::spawn_app_without_db().await;
    let client = reqwest::Client::new();

    for i in 0..55 {
        let response = client
            .post(app.url("/livestream/chat"))
            .json(&json!({"author": "ana", "text": format!("message {}", i)}))
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(200, response.status().as_u16());
    }

    let current = state(&client, &app).await;
    let chat = current["chat_messages"].as_array().unwrap();
    assert_eq!(chat.len(), 50);
    assert_eq!(chat[0]["text"], "message 5");
    assert_eq!(chat[49]["text"], "message 54");

    let response = client
        .delete(app.url("/admin/livestream/chat"))
        .bearer_auth(common::ADMIN_TOKEN)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());

    let current = state(&client, &app).await;
    assert!(current["chat_messages"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn chat_rejects_blank_messages() {
    let app = common::spawn_app_without_db().await;

    let response = reqwest::Client::new()
        .post(app.url("/livestream/chat"))
        .json(&json!({"author": "ana", "text": "   "}))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
}

#[actix_web::test]
async fn admin_livestream_routes_require_token() {
    let app = common::spawn_app_without_db().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/admin/livestream/start"))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(401, response.status().as_u16());

    let response = client
        .delete(app.url("/admin/livestream/chat"))
        .bearer_auth("not-the-token")
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(403, response.status().as_u16());

    assert_eq!(state(&client, &app).await["is_streaming"], false);
}

#[actix_web::test]
async fn websocket_receives_snapshot_then_events() {
    let app = common::spawn_app_without_db().await;
    let client = reqwest::Client::new();

    let (mut socket, _) = connect_async(app.ws_url("/livestream/ws"))
        .await
        .expect("Failed to open websocket");

    let event = next_event(&mut socket).await;
    assert_eq!(event["type"], "snapshot");
    assert_eq!(event["state"]["is_streaming"], false);

    client
        .post(app.url("/admin/livestream/start"))
        .bearer_auth(common::ADMIN_TOKEN)
        .json(&json!({"title": "Night routine"}))
        .send()
        .await
        .expect("Failed to execute request.");

    let event = next_event(&mut socket).await;
    assert_eq!(event["type"], "stream_started");
    assert_eq!(event["state"]["stream"]["title"], "Night routine");

    socket
        .send(Message::Text(
            json!({"type": "chat", "author": "bea", "text": "hello from the socket"}).to_string(),
        ))
        .await
        .expect("Failed to send chat frame");

    let event = next_event(&mut socket).await;
    assert_eq!(event["type"], "chat_message_added");
    assert_eq!(event["message"]["author"], "bea");

    let current = state(&client, &app).await;
    assert_eq!(current["chat_messages"][0]["text"], "hello from the socket");

    socket.close(None).await.ok();
}
