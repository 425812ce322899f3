//! JSON 파일 영속화.
//!
//! 설정/마지막 상태/변경 이력을 플랫폼별 데이터 디렉토리에
//! 보기 좋게 들여쓴 JSON으로 저장한다. 파일이 없거나 손상되면 조용히
//! 기본값으로 대체한다 — 기동 실패는 없다. 실행 중에는 메모리가 단일
//! 진실 원천이고 파일은 재시작 복구용 스냅샷일 뿐이다.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::MonitorConfig;
use crate::error::CoreError;
use crate::models::changelog::ChangeLogEntry;
use crate::models::stats::{State, Stats};

/// 설정 파일 이름
const CONFIG_FILE_NAME: &str = "config.json";
/// 상태 파일 이름
const STATE_FILE_NAME: &str = "state.json";
/// 변경 이력 파일 이름
const CHANGE_LOG_FILE_NAME: &str = "changelog.json";

/// 앱 디렉토리 이름
const APP_DIR_NAME: &str = "zenmon";

/// 파일 저장소
///
/// 한 관심사당 한 파일. 저장은 best-effort — 실패해도 세션의 메모리
/// 상태는 그대로 유효하다.
#[derive(Debug, Clone)]
pub struct StateStore {
    data_dir: PathBuf,
}

impl StateStore {
    /// 플랫폼 기본 데이터 디렉토리로 저장소 생성
    pub fn new() -> Result<Self, CoreError> {
        Self::with_dir(Self::default_data_dir()?)
    }

    /// 지정된 디렉토리로 저장소 생성 (테스트용 포함)
    pub fn with_dir(data_dir: PathBuf) -> Result<Self, CoreError> {
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|e| {
                CoreError::Persistence(format!(
                    "데이터 디렉토리 생성 실패: {}: {}",
                    data_dir.display(),
                    e
                ))
            })?;
            info!("데이터 디렉토리 생성: {}", data_dir.display());
        }
        Ok(Self { data_dir })
    }

    /// 데이터 디렉토리 경로
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// 설정 로드. 실패 시 기본 설정. 로드 결과는 항상 정제를 거친다.
    pub fn load_config(&self) -> MonitorConfig {
        self.read_json::<MonitorConfig>(CONFIG_FILE_NAME)
            .unwrap_or_default()
            .sanitize()
    }

    /// 설정 저장
    pub fn save_config(&self, config: &MonitorConfig) -> Result<(), CoreError> {
        self.write_json(CONFIG_FILE_NAME, config)
    }

    /// 마지막 스냅샷 로드. 실패 시 미관측 상태.
    pub fn load_state(&self) -> Stats {
        self.read_json::<State>(STATE_FILE_NAME)
            .map(|state| state.last_stats)
            .unwrap_or_default()
    }

    /// 마지막 스냅샷 저장
    pub fn save_state(&self, stats: &Stats) -> Result<(), CoreError> {
        let state = State {
            last_stats: stats.clone(),
        };
        self.write_json(STATE_FILE_NAME, &state)
    }

    /// 상태 파일 삭제 (없으면 no-op)
    pub fn remove_state(&self) {
        let _ = fs::remove_file(self.data_dir.join(STATE_FILE_NAME));
    }

    /// 변경 이력 로드. 실패 시 빈 목록.
    pub fn load_change_log(&self) -> Vec<ChangeLogEntry> {
        self.read_json(CHANGE_LOG_FILE_NAME).unwrap_or_default()
    }

    /// 변경 이력 저장 (최신이 앞인 순서 그대로)
    pub fn save_change_log(&self, entries: &[ChangeLogEntry]) -> Result<(), CoreError> {
        self.write_json(CHANGE_LOG_FILE_NAME, &entries)
    }

    /// 변경 이력 파일 삭제 (없으면 no-op)
    pub fn remove_change_log(&self) {
        let _ = fs::remove_file(self.data_dir.join(CHANGE_LOG_FILE_NAME));
    }

    /// 플랫폼별 기본 데이터 디렉토리 경로
    fn default_data_dir() -> Result<PathBuf, CoreError> {
        #[cfg(target_os = "macos")]
        {
            // macOS: ~/Library/Application Support/zenmon/
            let home = std::env::var("HOME").map_err(|_| {
                CoreError::Persistence("HOME 환경 변수를 찾을 수 없습니다".to_string())
            })?;
            Ok(PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR_NAME))
        }

        #[cfg(target_os = "windows")]
        {
            // Windows: %APPDATA%\zenmon\
            let appdata = std::env::var("APPDATA").map_err(|_| {
                CoreError::Persistence("APPDATA 환경 변수를 찾을 수 없습니다".to_string())
            })?;
            Ok(PathBuf::from(appdata).join(APP_DIR_NAME))
        }

        #[cfg(target_os = "linux")]
        {
            // Linux: ~/.config/zenmon/
            let home = std::env::var("HOME").map_err(|_| {
                CoreError::Persistence("HOME 환경 변수를 찾을 수 없습니다".to_string())
            })?;
            Ok(PathBuf::from(home).join(".config").join(APP_DIR_NAME))
        }

        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            // 기타 플랫폼: 현재 디렉토리
            Ok(PathBuf::from(".").join(APP_DIR_NAME))
        }
    }

    /// 파일에서 JSON 로드. 모든 실패는 `None` — 호출부가 기본값을 쓴다.
    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.data_dir.join(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                debug!("{} 읽기 생략: {e}", path.display());
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("{} 파싱 실패, 기본값 사용: {e}", path.display());
                None
            }
        }
    }

    /// 파일에 JSON 저장 (pretty-print)
    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), CoreError> {
        let path = self.data_dir.join(name);
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| CoreError::Persistence(format!("직렬화 실패: {e}")))?;
        fs::write(&path, content).map_err(|e| {
            CoreError::Persistence(format!("파일 저장 실패: {}: {}", path.display(), e))
        })?;
        debug!("저장 완료: {}", path.display());
        Ok(())
    }
}
