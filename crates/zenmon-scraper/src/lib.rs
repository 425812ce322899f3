//! # zenmon-scraper
//!
//! 버그 목록 페이지를 가져와 심각도별 건수 스냅샷으로 바꾸는 어댑터.
//!
//! - [`client`] — HTTP 수집 (reqwest, 25초 타임아웃, 쿠키 헤더)
//! - [`extract`] — 알려진 DOM 형태들에 대한 best-effort 추출기

pub mod client;
pub mod extract;

pub use client::PageClient;
