//! UI 셸 푸시 업데이트 이벤트.
//!
//! 상태가 바뀔 때마다 해당 스냅샷 전체를 브로드캐스트한다.
//! 셸이 없거나 수신자가 밀려도 파이프라인은 영향받지 않는다.

use serde::Serialize;

use zenmon_core::config::MonitorConfig;
use zenmon_core::models::changelog::ChangeLogEntry;
use zenmon_core::models::log::LogEntry;
use zenmon_core::models::stats::Stats;

/// 상태 변경 브로드캐스트 이벤트
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum MonitorEvent {
    /// 설정 변경
    #[serde(rename = "config")]
    Config(MonitorConfig),
    /// 새 스냅샷 커밋
    #[serde(rename = "stats")]
    Stats(Stats),
    /// 변경 이력 갱신 (전체, 최신이 앞)
    #[serde(rename = "changelog")]
    ChangeLog(Vec<ChangeLogEntry>),
    /// 진단 로그 갱신 (전체, 최신이 앞)
    #[serde(rename = "logs")]
    Logs(Vec<LogEntry>),
    /// 모니터링 on/off 토글
    #[serde(rename = "monitoring")]
    Monitoring(bool),
}
