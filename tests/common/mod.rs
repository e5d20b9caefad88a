#![allow(dead_code)]

use chess_rooms::AppState;
use chess_rooms::config::CorsConfig;
use chess_rooms::messages::{ClientMessage, ServerMessage};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

pub struct TestServer {
    base_url: String,
    pub state: AppState,
}

impl TestServer {
    pub fn ws_url(&self) -> String {
        format!("{}/ws", self.base_url)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!(
            "http://{}{}",
            self.base_url.strip_prefix("ws://").unwrap(),
            path
        )
    }

    /// Poll until the server has registered `count` open connections.
    pub async fn wait_for_connections(&self, count: usize) {
        wait_until(|| self.state.sessions.connection_count() == count).await;
    }
}

pub async fn wait_until<F: Fn() -> bool>(condition: F) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met in time");
}

pub async fn spawn_test_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new();

    let app = chess_rooms::router(state.clone(), &CorsConfig::default());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("ws://{}", addr),
        state,
    }
}

pub async fn connect(server: &TestServer) -> WsStream {
    let (ws, _) = connect_async(&server.ws_url()).await.expect("Failed to connect");
    ws
}

fn text(msg: &ClientMessage) -> Message {
    Message::Text(serde_json::to_string(msg).unwrap().into())
}

pub fn join_room_msg(room_id: &str) -> Message {
    text(&ClientMessage::JoinRoom(room_id.to_string()))
}

pub fn move_msg(data: Value) -> Message {
    text(&ClientMessage::Move(data))
}

pub fn game_over_msg(room_id: &str, winner: &str, reason: &str) -> Message {
    text(&ClientMessage::GameOver {
        room_id: room_id.to_string(),
        winner: winner.to_string(),
        reason: reason.to_string(),
    })
}

pub async fn recv(ws: &mut WsStream) -> ServerMessage {
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("Timed out waiting for message")
        .unwrap()
        .unwrap();
    serde_json::from_str(msg.to_text().unwrap()).unwrap()
}

/// Assert nothing arrives within a short window.
pub async fn assert_silent(ws: &mut WsStream) {
    let result = tokio::time::timeout(Duration::from_millis(150), ws.next()).await;
    assert!(result.is_err(), "Expected no message, got {:?}", result);
}
