//! 연결 수립 파라미터 기반 인증을 지원하는 WebSocket 엔드포인트.
//!
//! 요청 헤더를 쓸 수 없는 전송 형태를 위해 자격증명은 `connection_init`
//! 메시지의 `payload.Authorization` 키에 실립니다.
//!
//! # 메시지 형식
//!
//! 모든 메시지는 JSON 형식으로 교환됩니다.
//!
//! ## 클라이언트 → 서버
//!
//! ```json
//! {"type": "connection_init", "payload": {"Authorization": "Bearer <token>"}}
//! {"type": "me"}
//! {"type": "ping"}
//! ```
//!
//! ## 서버 → 클라이언트
//!
//! ```json
//! {"type": "connection_ack", "authenticated": true}
//! {"type": "profile", "user": {...}}
//! {"type": "pong", "timestamp": 1700000000000}
//! {"type": "error", "code": "AUTHENTICATION_REQUIRED", "message": "..."}
//! ```

pub mod handler;
pub mod messages;

pub use handler::{websocket_handler, websocket_router};
pub use messages::{ClientMessage, ServerMessage, WsError};
