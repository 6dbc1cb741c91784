use std::path::Path;

use anyhow::{Context, Result};

use crate::components::rules;
use crate::config::loader;
use crate::config::models::TriageConfig;
use crate::config::Env;
use crate::domain::models::TriageTarget;

/// 머지된 설정을 YAML로 출력 (어떤 파일이 적용됐는지 첫 줄 주석으로 표시)
pub fn config_show(env: &dyn Env, repo_path: &Path) -> Result<String> {
    let path = loader::config_path(env, repo_path);
    let config = loader::load_merged(env, repo_path);

    let source = if path.exists() {
        path.display().to_string()
    } else {
        "built-in defaults".to_string()
    };

    let yaml = serde_yaml::to_string(&config)?;
    Ok(format!("# source: {source}\n{yaml}"))
}

/// API 호출 없이 판별 결과만 출력
pub fn classify(config: &TriageConfig, title: &str, body: &str, files: &[String]) -> String {
    let content = rules::detect_content_labels(title, body, config);
    let areas = rules::detect_area_labels(files, config);
    let missing = rules::needs_info(title, body);

    let mut output = String::new();
    output.push_str(&format!("content labels: {}\n", join_or_none(&content)));
    output.push_str(&format!("area labels:    {}\n", join_or_none(&areas)));
    output.push_str(&format!(
        "needs info:     {}\n",
        if missing { "yes" } else { "no" }
    ));
    output
}

/// webhook payload 파일 읽기. issue/PR 이벤트가 아니면 `Ok(None)`.
pub fn read_event(path: &Path) -> Result<Option<TriageTarget>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read event payload {}", path.display()))?;
    let payload: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("invalid event payload {}", path.display()))?;
    Ok(TriageTarget::from_event(&payload))
}

fn join_or_none(labels: &[String]) -> String {
    if labels.is_empty() {
        "(none)".to_string()
    } else {
        labels.join(", ")
    }
}
