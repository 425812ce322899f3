//! 운영 진단 로그 모델.
//!
//! 운영자에게 보여주는 진단 피드 전용이며 의미론적으로는 비필수다.
//! 스크랩 실패는 이 피드에만 나타난다 — 알림 경로로는 가지 않는다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 진단 로그 최대 보관 건수 (최신이 앞)
pub const MAX_LOG_ENTRIES: usize = 200;

/// 로그 레벨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Error,
}

/// 진단 로그 엔트리. `status`는 HTTP 상태 코드, 해당 없으면 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub status: u16,
    pub message: String,
}

impl LogEntry {
    /// 현재 시각으로 엔트리 생성
    pub fn new(level: LogLevel, message: impl Into<String>, status: u16) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            status,
            message: message.into(),
        }
    }
}
