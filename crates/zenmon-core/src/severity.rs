//! 심각도 분류기.
//!
//! 테이블 셀에서 뽑은 자유 텍스트를 네 단계 심각도로 정규화한다.
//! 어휘 매칭(중국어/영어) → 숫자 코드(1~4) 순서로 시도하며,
//! 어느 쪽에도 해당하지 않으면 `None` — 예외 없는 전함수다.

use serde::{Deserialize, Serialize};

/// 결함 심각도. 순서 비교는 긴급도 기준 (`Critical > Severe > Major > Minor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Major,
    Severe,
    Critical,
}

impl Severity {
    /// 긴급도 내림차순 전체 목록 — 알림 메시지 조각 순서로도 쓰인다.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Severe,
        Severity::Major,
        Severity::Minor,
    ];

    /// 숫자 심각도 코드 매핑 (1→Critical … 4→Minor)
    pub fn from_code(code: u32) -> Option<Severity> {
        match code {
            1 => Some(Severity::Critical),
            2 => Some(Severity::Severe),
            3 => Some(Severity::Major),
            4 => Some(Severity::Minor),
            _ => None,
        }
    }

    /// 알림 메시지용 등급 라벨 (원 제품의 중국어 표기)
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "一级",
            Severity::Severe => "二级",
            Severity::Major => "三级",
            Severity::Minor => "四级",
        }
    }
}

/// 셀 텍스트를 심각도로 분류한다. 첫 매칭이 이긴다 (대소문자 무시, 부분 일치).
pub fn classify(text: &str) -> Option<Severity> {
    let value = text.trim();
    if value.is_empty() {
        return None;
    }
    let lower = value.to_lowercase();

    if lower.contains("致命") || lower.contains("critical") || lower.contains("blocker") {
        return Some(Severity::Critical);
    }
    if lower.contains("严重") || lower.contains("high") {
        return Some(Severity::Severe);
    }
    if lower.contains("主要") || lower.contains("major") {
        return Some(Severity::Major);
    }
    if lower.contains("次要") || lower.contains("轻微") || lower.contains("minor") {
        return Some(Severity::Minor);
    }

    // 라벨 없이 숫자 코드만 렌더링된 페이지 대응
    first_embedded_number(&lower).and_then(Severity::from_code)
}

/// 문자열에서 첫 연속 숫자 구간을 정수로 파싱한다. 없거나 넘치면 `None`.
pub fn first_embedded_number(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
