//! 모니터 설정 구조체.
//!
//! 감시 대상 URL, 폴링 주기, 알림 정책을 정의한다.
//! 외부 입력은 항상 [`MonitorConfig::sanitize`]를 거친다 — 정제 후의
//! 설정은 빈 URL이 없고 주기가 [1,60]분 범위라는 불변식을 만족한다.

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// 기본 감시 대상 URL
pub const DEFAULT_URL: &str = "https://zentao.sskuaixiu.com/my-work-bug.html?tid=r6xl1evk";

/// 폴링 주기 하한 (분)
pub const MIN_INTERVAL_MINUTES: u32 = 1;
/// 폴링 주기 상한 (분)
pub const MAX_INTERVAL_MINUTES: u32 = 60;

/// 모니터 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitorConfig {
    /// 감시 대상 버그 목록 URL
    pub url: String,
    /// 세션 쿠키 — 불투명 문자열 그대로 요청 헤더에 싣는다
    pub cookie: String,
    /// 폴링 주기 (분, 1~60)
    pub interval_minutes: u32,
    /// 데스크톱 알림 활성화
    pub enable_notifications: bool,
    /// 알림음 활성화
    pub enable_sound: bool,
    /// 총 건수 증가 시 알림
    pub notify_on_increase: bool,
    /// 총 건수 감소 시 알림
    pub notify_on_decrease: bool,
    /// 관심 심각도 목록. 비어 있으면 네 단계 전체로 본다.
    pub notify_levels: Vec<Severity>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            cookie: String::new(),
            interval_minutes: 15,
            enable_notifications: true,
            enable_sound: true,
            notify_on_increase: true,
            notify_on_decrease: true,
            notify_levels: Vec::new(),
        }
    }
}

impl MonitorConfig {
    /// 입력값 정제: 공백 제거, 빈 URL은 기본값으로 치환, 주기는 [1,60] 클램프.
    pub fn sanitize(mut self) -> Self {
        self.url = self.url.trim().to_string();
        self.cookie = self.cookie.trim().to_string();
        if self.url.is_empty() {
            self.url = DEFAULT_URL.to_string();
        }
        self.interval_minutes = self
            .interval_minutes
            .clamp(MIN_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES);
        self
    }
}
