use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::models::TriageConfig;
use super::{parser, Env};

pub const CONFIG_FILENAME: &str = ".issuesheriff.yml";

/// 설정 파일 경로를 직접 지정하는 환경 변수
pub const CONFIG_PATH_VAR: &str = "ISSUE_SHERIFF_CONFIG";

/// 레포 설정 파일을 읽어 기본값 위에 머지한 최종 설정 반환.
///
/// 파일이 없으면 조용히 기본값을 쓰고, 읽기에 실패하면 경고만 남기고 기본값을 쓴다.
/// 어떤 경우에도 설정 때문에 실행이 중단되지 않는다.
pub fn load_merged(env: &dyn Env, repo_path: &Path) -> TriageConfig {
    let path = config_path(env, repo_path);

    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return TriageConfig::default();
    }

    match load_from_file(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("failed to load {}: {e:#}. Using defaults.", path.display());
            TriageConfig::default()
        }
    }
}

/// 파일 하나를 읽어 기본값과 머지
pub fn load_from_file(path: &Path) -> Result<TriageConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let overlay = parser::parse(&content);
    Ok(TriageConfig::default().merge(overlay))
}

/// `ISSUE_SHERIFF_CONFIG`가 있으면 그 경로, 없으면 `{repo_path}/.issuesheriff.yml`
pub fn config_path(env: &dyn Env, repo_path: &Path) -> PathBuf {
    match env.var(CONFIG_PATH_VAR) {
        Ok(p) if !p.is_empty() => PathBuf::from(p),
        _ => repo_path.join(CONFIG_FILENAME),
    }
}
