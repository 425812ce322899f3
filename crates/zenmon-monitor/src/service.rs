//! 모니터 서비스.
//!
//! 단일 뮤텍스로 보호되는 상태 블록과 스크랩 파이프라인, UI 셸에
//! 노출하는 명령 표면. 락은 짧은 임계 구역에서만 잡는다 — 네트워크
//! 호출과 HTML 파싱은 락 밖에서 돈다.

use std::sync::{Arc, Weak};

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::{broadcast, Semaphore};
use tracing::{debug, warn};

use zenmon_core::config::MonitorConfig;
use zenmon_core::diff;
use zenmon_core::error::CoreError;
use zenmon_core::models::changelog::{ChangeLogEntry, MAX_CHANGE_LOG_ENTRIES};
use zenmon_core::models::log::{LogEntry, LogLevel, MAX_LOG_ENTRIES};
use zenmon_core::models::stats::Stats;
use zenmon_core::ports::notifier::DesktopNotifier;
use zenmon_core::store::StateStore;
use zenmon_scraper::PageClient;

use crate::events::MonitorEvent;
use crate::scheduler::Poller;

/// 데스크톱 알림 제목
const NOTIFY_TITLE: &str = "禅道监控";

/// 푸시 업데이트 채널 버퍼
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// 공유 상태 블록 — 유일한 가변 공유 자원, 단일 뮤텍스 아래에 있다
struct MonitorState {
    config: MonitorConfig,
    stats: Stats,
    change_log: Vec<ChangeLogEntry>,
    log_entries: Vec<LogEntry>,
    monitoring_enabled: bool,
}

/// 모니터 서비스
///
/// 메모리 상태가 단일 진실 원천이다. 영속화는 커밋 뒤의 부수 효과이며
/// 실패해도 세션은 계속된다.
pub struct MonitorService {
    state: Mutex<MonitorState>,
    store: StateStore,
    client: PageClient,
    notifier: Arc<dyn DesktopNotifier>,
    /// 단일 비행 게이트 — 용량 1, 중복 트리거는 대기 없이 버린다
    scrape_gate: Semaphore,
    poller: Poller,
    event_tx: broadcast::Sender<MonitorEvent>,
    /// 백그라운드 태스크에 넘길 자기 참조
    self_ref: Weak<MonitorService>,
}

impl MonitorService {
    /// 저장소에서 설정/상태/이력을 복원해 서비스 생성
    pub fn new(
        store: StateStore,
        client: PageClient,
        notifier: Arc<dyn DesktopNotifier>,
    ) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let state = MonitorState {
            config: store.load_config(),
            stats: store.load_state(),
            change_log: store.load_change_log(),
            log_entries: Vec::new(),
            monitoring_enabled: true,
        };
        Arc::new_cyclic(|weak| Self {
            state: Mutex::new(state),
            store,
            client,
            notifier,
            scrape_gate: Semaphore::new(1),
            poller: Poller::default(),
            event_tx,
            self_ref: weak.clone(),
        })
    }

    /// 기동: 폴링 시작 → 전체 상태 푸시 → 즉시 1회 스크랩
    pub fn start(&self) {
        self.start_polling();
        self.emit_all();
        self.spawn_fetch();
    }

    /// 종료: 폴링 정지
    pub fn shutdown(&self) {
        self.poller.stop();
    }

    /// 푸시 업데이트 구독
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.event_tx.subscribe()
    }

    // ============================================================
    // 조회 명령
    // ============================================================

    /// 현재 설정 (복제본)
    pub fn config(&self) -> MonitorConfig {
        self.state.lock().config.clone()
    }

    /// 마지막 스냅샷 (복제본)
    pub fn stats(&self) -> Stats {
        self.state.lock().stats.clone()
    }

    /// 변경 이력 (최신이 앞)
    pub fn change_log(&self) -> Vec<ChangeLogEntry> {
        self.state.lock().change_log.clone()
    }

    /// 진단 로그 (최신이 앞)
    pub fn logs(&self) -> Vec<LogEntry> {
        self.state.lock().log_entries.clone()
    }

    /// 모니터링 활성 여부
    pub fn monitoring_enabled(&self) -> bool {
        self.state.lock().monitoring_enabled
    }

    // ============================================================
    // 설정/토글 명령
    // ============================================================

    /// 설정 저장: 정제 → 메모리 커밋 → 파일 저장 → 티커 재시작 → 즉시 스크랩
    pub fn save_config(&self, config: MonitorConfig) -> Result<(), CoreError> {
        let config = config.sanitize();
        {
            self.state.lock().config = config.clone();
        }
        self.store.save_config(&config)?;

        if self.monitoring_enabled() {
            self.start_polling();
        }
        self.emit(MonitorEvent::Config(config));
        if self.monitoring_enabled() {
            self.spawn_fetch();
        }
        Ok(())
    }

    /// 모니터링 재개
    pub fn start_monitoring(&self) {
        self.set_monitoring_enabled(true);
    }

    /// 모니터링 일시정지
    pub fn stop_monitoring(&self) {
        self.set_monitoring_enabled(false);
    }

    fn set_monitoring_enabled(&self, enabled: bool) {
        {
            let mut state = self.state.lock();
            if state.monitoring_enabled == enabled {
                return;
            }
            state.monitoring_enabled = enabled;
        }

        if enabled {
            self.add_log(LogLevel::Info, "Monitoring resumed", 0);
            self.start_polling();
        } else {
            self.poller.stop();
            self.add_log(LogLevel::Info, "Monitoring paused", 0);
        }
        self.emit(MonitorEvent::Monitoring(enabled));
    }

    /// 현재 설정 주기로 폴링 (재)시작. 모니터링이 꺼져 있으면 정지만 한다.
    pub(crate) fn start_polling(&self) {
        if !self.monitoring_enabled() {
            self.poller.stop();
            return;
        }
        let Some(service) = self.self_ref.upgrade() else {
            return;
        };
        let interval_minutes = self.config().interval_minutes;
        self.add_log(
            LogLevel::Info,
            format!("Polling started: every {interval_minutes} minutes"),
            0,
        );
        self.poller.restart(service, interval_minutes);
    }

    /// 백그라운드에서 1회 스크랩
    fn spawn_fetch(&self) {
        let Some(service) = self.self_ref.upgrade() else {
            return;
        };
        tokio::spawn(async move {
            let _ = service.fetch_now().await;
        });
    }

    // ============================================================
    // 스크랩 파이프라인
    // ============================================================

    /// 즉시 1회 스크랩.
    ///
    /// 이미 진행 중이면 스킵을 로그로 남기고 정상 반환한다 — 겹치는
    /// 트리거는 예상된 일이지 에러가 아니다. 게이트는 모든 종료 경로에서
    /// 해제된다 (RAII permit).
    pub async fn fetch_now(&self) -> Result<(), CoreError> {
        let _permit = match self.scrape_gate.try_acquire() {
            Ok(permit) => permit,
            Err(_) => {
                self.add_log(
                    LogLevel::Info,
                    "Scrape skipped: previous sync still running",
                    0,
                );
                return Ok(());
            }
        };

        let config = self.config();
        if config.url.is_empty() {
            // 정제가 기본 URL을 채우므로 도달 불가
            return Err(CoreError::Config("감시 URL이 비어 있습니다".into()));
        }

        self.add_log(LogLevel::Info, format!("Scraping {}", config.url), 0);

        let (stats, status) = match self.client.scrape(&config).await {
            Ok(result) => result,
            Err(e) => {
                self.add_log(LogLevel::Error, format!("Scrape failed: {e}"), e.status());
                return Err(e);
            }
        };
        self.add_log(
            LogLevel::Info,
            format!("HTTP {status} - parsed {} bugs", stats.total),
            status,
        );

        let (previous, total_changed, delta, notify) = {
            let mut state = self.state.lock();
            let previous = std::mem::replace(&mut state.stats, stats.clone());
            let (changed, delta) = diff::detect_total_change(&previous, &stats);
            let notify = changed
                && diff::should_notify_on_delta(
                    delta,
                    config.notify_on_increase,
                    config.notify_on_decrease,
                )
                && diff::selected_levels_changed(
                    &previous.severity,
                    &stats.severity,
                    &config.notify_levels,
                );
            (previous, changed, delta, notify)
        };

        // 커밋 후의 영속화는 best-effort — 락 밖에서 쓴다
        if let Err(e) = self.store.save_state(&stats) {
            warn!("상태 저장 실패: {e}");
        }
        self.emit(MonitorEvent::Stats(stats.clone()));

        if total_changed {
            self.append_change_log(ChangeLogEntry {
                timestamp: stats.last_updated.unwrap_or_else(Utc::now),
                total: stats.total,
                delta,
                severity: stats.severity,
            });
        }

        if notify {
            let message = diff::build_notify_message(
                &previous.severity,
                &stats.severity,
                &config.notify_levels,
                stats.total,
            );
            self.notify_change(&config, &message).await;
        }

        Ok(())
    }

    /// 설정 토글에 따라 데스크톱 알림과 알림음을 독립적으로 발송한다.
    /// 발송 실패는 파이프라인에 영향을 주지 않는다.
    async fn notify_change(&self, config: &MonitorConfig, message: &str) {
        if config.enable_notifications {
            if let Err(e) = self.notifier.show_notification(NOTIFY_TITLE, message).await {
                debug!("알림 발송 실패: {e}");
            }
        }
        if config.enable_sound {
            if let Err(e) = self.notifier.play_sound(false).await {
                debug!("알림음 재생 실패: {e}");
            }
        }
    }

    // ============================================================
    // 기타 명령
    // ============================================================

    /// 테스트 알림: 설정과 무관하게 알림과 알림음을 강제 트리거한다.
    pub async fn test_notification(&self) -> Result<(), CoreError> {
        self.notifier
            .show_notification(NOTIFY_TITLE, "测试通知：系统通知与声音已触发。")
            .await?;
        self.notifier.play_sound(true).await?;
        self.add_log(LogLevel::Info, "Test notification triggered", 0);
        Ok(())
    }

    /// 변경 이력 비우기 (메모리 + 파일)
    pub fn clear_change_log(&self) {
        {
            self.state.lock().change_log.clear();
        }
        self.store.remove_change_log();
        self.emit(MonitorEvent::ChangeLog(Vec::new()));
    }

    /// 모니터링 데이터 전체 비우기 — 스냅샷/이력/로그. 설정은 남긴다.
    pub fn clear_monitoring_data(&self) {
        {
            let mut state = self.state.lock();
            state.stats = Stats::default();
            state.change_log.clear();
            state.log_entries.clear();
        }
        self.emit_all();
        self.store.remove_change_log();
        self.store.remove_state();
    }

    // ============================================================
    // 내부
    // ============================================================

    /// 진단 로그 엔트리 추가 (최신이 앞, 200건 초과분은 버린다)
    pub(crate) fn add_log(&self, level: LogLevel, message: impl Into<String>, status: u16) {
        let entry = LogEntry::new(level, message, status);
        match entry.level {
            LogLevel::Info => debug!(status = entry.status, "{}", entry.message),
            LogLevel::Error => warn!(status = entry.status, "{}", entry.message),
        }

        let entries = {
            let mut state = self.state.lock();
            state.log_entries.insert(0, entry);
            state.log_entries.truncate(MAX_LOG_ENTRIES);
            state.log_entries.clone()
        };
        self.emit(MonitorEvent::Logs(entries));
    }

    /// 변경 이력 엔트리 추가 + best-effort 영속화
    fn append_change_log(&self, entry: ChangeLogEntry) {
        let entries = {
            let mut state = self.state.lock();
            state.change_log.insert(0, entry);
            state.change_log.truncate(MAX_CHANGE_LOG_ENTRIES);
            state.change_log.clone()
        };
        if let Err(e) = self.store.save_change_log(&entries) {
            warn!("변경 이력 저장 실패: {e}");
        }
        self.emit(MonitorEvent::ChangeLog(entries));
    }

    fn emit(&self, event: MonitorEvent) {
        let _ = self.event_tx.send(event);
    }

    fn emit_all(&self) {
        self.emit(MonitorEvent::Config(self.config()));
        self.emit(MonitorEvent::Stats(self.stats()));
        self.emit(MonitorEvent::ChangeLog(self.change_log()));
        self.emit(MonitorEvent::Logs(self.logs()));
        self.emit(MonitorEvent::Monitoring(self.monitoring_enabled()));
    }
}
