//! 폴링 스케줄러.
//!
//! 설정된 주기마다 fetch를 트리거하는 장수명 티커 태스크.
//! 재설정은 기존 티커를 멈추고 새로 시작한다. 진행 중인 fetch는
//! 강제 취소하지 않는다 — 끝나고 결과를 커밋하면 그만이다.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant};
use tracing::{info, warn};

use zenmon_core::models::log::LogLevel;

use crate::service::MonitorService;

/// 폴링 티커 핸들
#[derive(Default)]
pub(crate) struct Poller {
    stop_tx: Mutex<Option<watch::Sender<bool>>>,
}

impl Poller {
    /// 기존 티커를 멈추고 새 주기로 다시 시작한다.
    pub(crate) fn restart(&self, service: Arc<MonitorService>, interval_minutes: u32) {
        self.stop();

        let (stop_tx, mut stop_rx) = watch::channel(false);
        *self.stop_tx.lock() = Some(stop_tx);

        let period = Duration::from_secs(u64::from(interval_minutes) * 60);
        tokio::spawn(async move {
            // 첫 틱도 한 주기 뒤에 온다 — 기동 직후의 수동 fetch와 겹치지 않는다
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        service.add_log(
                            LogLevel::Info,
                            format!("Auto sync triggered (every {interval_minutes} minutes)"),
                            0,
                        );
                        if let Err(e) = service.fetch_now().await {
                            warn!("자동 스크랩 실패: {e}");
                        }
                    }
                    _ = stop_rx.changed() => {
                        info!("폴링 루프 종료");
                        break;
                    }
                }
            }
        });
    }

    /// 티커 정지. 돌고 있지 않으면 no-op.
    pub(crate) fn stop(&self) {
        if let Some(stop) = self.stop_tx.lock().take() {
            let _ = stop.send(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_without_start_is_a_noop() {
        let poller = Poller::default();
        poller.stop();
        poller.stop();
    }
}
