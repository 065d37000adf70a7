//! WebSocket 연결 handler.
//!
//! Axum WebSocket 엔드포인트 및 메시지 처리. 첫 메시지는 반드시
//! `connection_init`이어야 하며, 신원은 연결 수립 시 한 번 해석되어
//! 연결이 유지되는 동안 재사용됩니다.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::Utc;
use tracing::{debug, info, warn};

use super::messages::{ClientMessage, ServerMessage};
use crate::auth::{extract_identity, CredentialCarrier};
use crate::context::CallContext;
use crate::error::error_code;
use crate::state::AppState;

/// WebSocket 라우터 생성.
pub fn websocket_router() -> Router<AppState> {
    Router::new().route("/", get(websocket_handler))
}

/// WebSocket 업그레이드 핸들러.
///
/// # 엔드포인트
///
/// `GET /ws`
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// WebSocket 연결 처리.
async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let session_id = uuid::Uuid::new_v4();
    info!(%session_id, "WebSocket connected");

    // 첫 메시지는 connection_init이어야 함
    let ctx = match wait_for_init(&mut socket, &state).await {
        Some(ctx) => ctx,
        None => {
            debug!(%session_id, "WebSocket closed before init");
            return;
        }
    };

    let ack = ServerMessage::ConnectionAck {
        authenticated: ctx.identity.is_some(),
    };
    if send(&mut socket, &ack).await.is_err() {
        return;
    }

    while let Some(result) = socket.recv().await {
        let msg = match result {
            Ok(msg) => msg,
            Err(e) => {
                warn!(%session_id, "WebSocket receive error: {}", e);
                break;
            }
        };

        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // Ping/Pong 프레임은 프로토콜 계층에서 처리됨
            _ => continue,
        };

        let reply = match ClientMessage::from_json(&text) {
            Ok(ClientMessage::ConnectionInit { .. }) => ServerMessage::Error {
                code: "ALREADY_INITIALIZED".to_string(),
                message: "Connection is already initialized".to_string(),
            },
            Ok(ClientMessage::Me) => match state.operations.current_profile(&ctx).await {
                Ok(user) => ServerMessage::Profile { user },
                Err(err) => ServerMessage::Error {
                    code: error_code(&err).to_string(),
                    message: err.to_string(),
                },
            },
            Ok(ClientMessage::Ping) => ServerMessage::Pong {
                timestamp: Utc::now().timestamp_millis(),
            },
            Err(err) => ServerMessage::Error {
                code: "INVALID_MESSAGE".to_string(),
                message: err.to_string(),
            },
        };

        if send(&mut socket, &reply).await.is_err() {
            break;
        }
    }

    info!(%session_id, "WebSocket disconnected");
}

/// connection_init을 기다려 호출 컨텍스트를 구성.
///
/// init 이전에 연결이 닫히거나 다른 메시지가 오면 `None`.
async fn wait_for_init(socket: &mut WebSocket, state: &AppState) -> Option<CallContext> {
    while let Some(Ok(msg)) = socket.recv().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => return None,
            _ => continue,
        };

        match ClientMessage::from_json(&text) {
            Ok(ClientMessage::ConnectionInit { payload }) => {
                // 연결 파라미터에서 신원 해석 — 실패해도 연결은 유지
                let identity =
                    extract_identity(CredentialCarrier::Connection(&payload), &state.tokens);
                return Some(CallContext::new(state.store.clone(), identity));
            }
            _ => {
                let err = ServerMessage::Error {
                    code: "NOT_INITIALIZED".to_string(),
                    message: "First message must be connection_init".to_string(),
                };
                if send(socket, &err).await.is_err() {
                    return None;
                }
            }
        }
    }
    None
}

async fn send(socket: &mut WebSocket, msg: &ServerMessage) -> Result<(), ()> {
    let json = msg.to_json().map_err(|e| {
        warn!("WebSocket serialization failed: {}", e);
    })?;
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}
