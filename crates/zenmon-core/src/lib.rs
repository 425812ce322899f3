//! # zenmon-core
//!
//! 젠타오 버그 모니터의 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 스크래퍼와 모니터 서비스가 공유하는 핵심 타입과 순수 로직을 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 도메인 데이터 구조체 (serde Serialize/Deserialize)
//! - [`severity`] — 심각도 분류기
//! - [`diff`] — 변화 감지 + 알림 판정 (순수 함수)
//! - [`ports`] — 데스크톱 셸 포트 인터페이스 (async_trait)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 모니터 설정 구조체
//! - [`store`] — JSON 파일 영속화 (로드/저장)

pub mod config;
pub mod diff;
pub mod error;
pub mod models;
pub mod ports;
pub mod severity;
pub mod store;
