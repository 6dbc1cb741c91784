pub mod loader;
pub mod models;
pub mod parser;

use std::path::Path;

use anyhow::Result;

use self::models::TriageConfig;

// ─── ConfigLoader trait ───

/// 설정 로드 추상화 — 파이프라인은 이 trait에만 의존한다.
pub trait ConfigLoader: Send + Sync {
    /// 기본값 + 레포 설정 파일을 머지하여 최종 설정 반환
    fn load(&self, repo_path: &Path) -> TriageConfig;
}

/// 실제 설정 로더 — `loader::load_merged`에 위임
pub struct RealConfigLoader {
    env: Box<dyn Env>,
}

impl RealConfigLoader {
    pub fn new(env: Box<dyn Env>) -> Self {
        Self { env }
    }
}

impl ConfigLoader for RealConfigLoader {
    fn load(&self, repo_path: &Path) -> TriageConfig {
        loader::load_merged(&*self.env, repo_path)
    }
}

/// 환경 변수 조회 추상화
pub trait Env: Send + Sync {
    fn var(&self, key: &str) -> Result<String, std::env::VarError>;
}

/// 실제 환경 변수를 사용하는 구현체
pub struct RealEnv;

impl Env for RealEnv {
    fn var(&self, key: &str) -> Result<String, std::env::VarError> {
        std::env::var(key)
    }
}

/// 인증 토큰 확인. `GITHUB_TOKEN`, `GH_TOKEN` 순으로 찾는다.
pub fn require_token(env: &dyn Env) -> Result<String> {
    ["GITHUB_TOKEN", "GH_TOKEN"]
        .iter()
        .find_map(|key| env.var(key).ok().filter(|v| !v.trim().is_empty()))
        .ok_or_else(|| anyhow::anyhow!("missing credentials: set GITHUB_TOKEN or GH_TOKEN"))
}

/// `GH_HOST` (GitHub Enterprise 호스트), 없으면 None
pub fn gh_host(env: &dyn Env) -> Option<String> {
    env.var("GH_HOST").ok().filter(|h| !h.is_empty())
}
