//! zenmon 핵심 에러 타입.
//!
//! 스크랩 한 사이클의 실패는 해당 사이클만 중단하고 스케줄러는 다음 틱을
//! 기다린다. 저장 실패는 호출부에서 경고 로그 후 삼킨다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정값 오류 (정제 후 빈 URL — 정제가 기본값을 채우므로 구조적으로 도달 불가)
    #[error("설정 에러: {0}")]
    Config(String),

    /// 전송 계층 실패 (DNS/연결/타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// HTTP 4xx/5xx 응답
    #[error("HTTP 응답 에러: {status}")]
    HttpStatus {
        /// 응답 상태 코드
        status: u16,
    },

    /// HTML 본문 파싱 실패
    #[error("파싱 에러: {0}")]
    Parse(String),

    /// 파일 읽기/쓰기 실패
    #[error("저장소 에러: {0}")]
    Persistence(String),
}

impl CoreError {
    /// 진단 로그 피드에 기록할 HTTP 상태 코드. 해당 없으면 0.
    pub fn status(&self) -> u16 {
        match self {
            CoreError::HttpStatus { status } => *status,
            _ => 0,
        }
    }
}
