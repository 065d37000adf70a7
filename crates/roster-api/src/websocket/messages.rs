//! WebSocket 메시지 타입.
//!
//! 클라이언트-서버 간 교환되는 메시지 정의.

use roster_core::UserView;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// WebSocket 에러.
#[derive(Debug, thiserror::Error)]
pub enum WsError {
    #[error("잘못된 메시지 형식: {0}")]
    InvalidMessage(String),
    #[error("직렬화 실패: {0}")]
    SerializationError(#[from] serde_json::Error),
}

// ==================== 클라이언트 → 서버 메시지 ====================

/// 클라이언트에서 서버로 보내는 메시지.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// 연결 수립.
    ///
    /// 요청 헤더를 쓸 수 없는 전송 형태이므로 자격증명은 연결 수립
    /// 파라미터의 `Authorization` 키에 실립니다.
    ConnectionInit {
        /// 연결 파라미터
        #[serde(default)]
        payload: Map<String, Value>,
    },
    /// 내 프로필 조회 (보호)
    Me,
    /// 핑 (연결 유지)
    Ping,
}

impl ClientMessage {
    /// JSON 문자열에서 파싱.
    pub fn from_json(json: &str) -> Result<Self, WsError> {
        serde_json::from_str(json).map_err(|e| WsError::InvalidMessage(e.to_string()))
    }
}

// ==================== 서버 → 클라이언트 메시지 ====================

/// 서버에서 클라이언트로 보내는 메시지.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// 연결 수립 확인
    ConnectionAck {
        /// 신원 해석 성공 여부
        authenticated: bool,
    },
    /// 프로필 응답
    Profile {
        /// 호출자 본인 프로필 (이메일 가시)
        user: UserView,
    },
    /// 퐁 응답
    Pong {
        /// 서버 타임스탬프 (ms)
        timestamp: i64,
    },
    /// 에러
    Error {
        /// 에러 코드
        code: String,
        /// 에러 메시지
        message: String,
    },
}

impl ServerMessage {
    /// JSON 문자열로 직렬화.
    pub fn to_json(&self) -> Result<String, WsError> {
        Ok(serde_json::to_string(self)?)
    }
}
