//! 변경 이력 모델.
//!
//! 총 건수가 움직일 때마다 한 건씩 쌓이는 감사 기록.
//! 알림 정책과는 독립이다 — 알림이 억제돼도 이력은 남는다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stats::SeverityCounts;

/// 변경 이력 최대 보관 건수 (최신이 앞, 초과분은 뒤에서 버린다)
pub const MAX_CHANGE_LOG_ENTRIES: usize = 200;

/// 총 건수 변동 한 건의 기록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogEntry {
    pub timestamp: DateTime<Utc>,
    /// 변동 후 총 건수
    pub total: u32,
    /// 부호 있는 증감폭 (new − previous)
    pub delta: i64,
    /// 변동 시점의 심각도별 건수
    pub severity: SeverityCounts,
}
