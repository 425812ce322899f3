//! 스냅샷 통계 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// 심각도별 결함 건수. 매 스크랩마다 처음부터 다시 집계한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(default)]
    pub critical: u32,
    #[serde(default)]
    pub severe: u32,
    #[serde(default)]
    pub major: u32,
    #[serde(default)]
    pub minor: u32,
}

impl SeverityCounts {
    /// 심각도별 건수 조회
    pub fn get(&self, level: Severity) -> u32 {
        match level {
            Severity::Critical => self.critical,
            Severity::Severe => self.severe,
            Severity::Major => self.major,
            Severity::Minor => self.minor,
        }
    }

    /// 심각도별 건수 1 증가
    pub fn bump(&mut self, level: Severity) {
        match level {
            Severity::Critical => self.critical += 1,
            Severity::Severe => self.severe += 1,
            Severity::Major => self.major += 1,
            Severity::Minor => self.minor += 1,
        }
    }

    /// 분류된 전체 건수
    pub fn sum(&self) -> u32 {
        self.critical + self.severe + self.major + self.minor
    }
}

/// 한 시점의 관측 스냅샷.
///
/// `last_updated`가 `None`이면 아직 관측 이력이 없다는 뜻이다.
/// 페이지가 선언한 총 건수가 있으면 행 수보다 우선한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub severity: SeverityCounts,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// 상태 파일(`state.json`) 래퍼
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(default)]
    pub last_stats: Stats,
}
