//! 버그 페이지 HTTP 클라이언트.
//!
//! 설정된 URL에 브라우저 User-Agent와 선택적 쿠키로 GET 한 번 —
//! 재시도 없음, 전체 작업 타임아웃 25초. 실패한 스크랩은 로그로 남고
//! 다음 틱에 맡겨진다.

use std::time::Duration;

use chrono::Utc;
use scraper::Html;
use tracing::debug;

use zenmon_core::config::MonitorConfig;
use zenmon_core::error::CoreError;
use zenmon_core::models::stats::Stats;

use crate::extract;

/// 데스크톱 브라우저 User-Agent
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 요청 전체 타임아웃
const FETCH_TIMEOUT: Duration = Duration::from_secs(25);

/// 버그 목록 페이지 클라이언트
///
/// 공유 상태를 건드리지 않는다 — 스냅샷 커밋은 호출부 몫이다.
pub struct PageClient {
    client: reqwest::Client,
}

impl PageClient {
    /// 새 클라이언트 생성
    pub fn new() -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;
        Ok(Self { client })
    }

    /// 한 번의 GET + 추출.
    ///
    /// 성공 시 관측 시각이 찍힌 스냅샷과 HTTP 상태를 반환한다.
    /// 4xx/5xx는 [`CoreError::HttpStatus`], 전송 실패는 [`CoreError::Network`].
    pub async fn scrape(&self, config: &MonitorConfig) -> Result<(Stats, u16), CoreError> {
        let mut request = self
            .client
            .get(&config.url)
            .header(reqwest::header::USER_AGENT, USER_AGENT);
        if !config.cookie.is_empty() {
            request = request.header(reqwest::header::COOKIE, &config.cookie);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("요청 실패: {e}")))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(CoreError::HttpStatus { status });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("본문 읽기 실패: {e}")))?;
        debug!("본문 수신: {} bytes (HTTP {status})", body.len());

        let document = Html::parse_document(&body);
        let mut stats = extract::parse_stats(&document);
        stats.last_updated = Some(Utc::now());

        Ok((stats, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const PAGE: &str = r#"
        <table id="bugList"><tbody>
          <tr><td>1</td><td>t</td><td><span>致命</span></td></tr>
          <tr><td>2</td><td>t</td><td><span>次要</span></td></tr>
        </tbody></table>"#;

    fn config_for(url: String) -> MonitorConfig {
        MonitorConfig {
            url,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn scrape_parses_and_stamps_snapshot() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", Matcher::Regex("Chrome".into()))
            .with_status(200)
            .with_body(PAGE)
            .create_async()
            .await;

        let client = PageClient::new().unwrap();
        let (stats, status) = client.scrape(&config_for(server.url())).await.unwrap();

        assert_eq!(status, 200);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.severity.critical, 1);
        assert_eq!(stats.severity.minor, 1);
        assert!(stats.last_updated.is_some());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn cookie_header_is_forwarded_when_present() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("cookie", "zentaosid=abc123")
            .with_status(200)
            .with_body(PAGE)
            .create_async()
            .await;

        let mut config = config_for(server.url());
        config.cookie = "zentaosid=abc123".into();

        let client = PageClient::new().unwrap();
        client.scrape(&config).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_cookie_sends_no_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("cookie", Matcher::Missing)
            .with_status(200)
            .with_body(PAGE)
            .create_async()
            .await;

        let client = PageClient::new().unwrap();
        client.scrape(&config_for(server.url())).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn http_error_status_is_classified() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(403)
            .with_body("Forbidden")
            .create_async()
            .await;

        let client = PageClient::new().unwrap();
        let err = client.scrape(&config_for(server.url())).await.unwrap_err();
        assert!(matches!(err, CoreError::HttpStatus { status: 403 }));
        assert_eq!(err.status(), 403);
    }

    #[tokio::test]
    async fn transport_failure_is_classified_with_zero_status() {
        let client = PageClient::new().unwrap();
        // 닫힌 포트 — 연결 거부
        let err = client
            .scrape(&config_for("http://127.0.0.1:9".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
        assert_eq!(err.status(), 0);
    }

    #[tokio::test]
    async fn garbage_body_yields_zero_stats_not_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("not html at all %%%")
            .create_async()
            .await;

        let client = PageClient::new().unwrap();
        let (stats, status) = client.scrape(&config_for(server.url())).await.unwrap();
        assert_eq!(status, 200);
        assert_eq!(stats.total, 0);
    }
}
