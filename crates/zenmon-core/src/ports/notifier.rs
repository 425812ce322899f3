//! 데스크톱 알림 포트.
//!
//! 구현: 데스크톱 셸 (OS 알림 + 알림음 재생)

use async_trait::async_trait;

use crate::error::CoreError;

/// 데스크톱 알림 인터페이스
#[async_trait]
pub trait DesktopNotifier: Send + Sync {
    /// 알림 표시 (제목 + 본문)
    async fn show_notification(&self, title: &str, body: &str) -> Result<(), CoreError>;

    /// 알림음 재생 신호. `force`는 설정과 무관하게 재생하는 테스트 트리거다.
    async fn play_sound(&self, force: bool) -> Result<(), CoreError>;
}
