use std::fmt;
use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::Gh;
use crate::domain::models::{IssueComment, Label};

/// 실제 `gh` CLI를 호출하는 구현체 (인증은 `GH_TOKEN`/`GITHUB_TOKEN`을 gh가 직접 읽는다)
pub struct RealGh;

/// `gh`가 0이 아닌 코드로 종료한 경우
#[derive(Debug)]
pub struct GhFailure {
    pub exit_code: i32,
    pub stderr: String,
}

impl GhFailure {
    pub fn is_not_found(&self) -> bool {
        self.stderr.contains("HTTP 404")
    }
}

impl fmt::Display for GhFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gh exited with {}: {}", self.exit_code, self.stderr.trim())
    }
}

impl std::error::Error for GhFailure {}

/// `gh` 실행 공통 경로: 호스트 인자 추가, 소요 시간 로깅, 실패 시 `GhFailure`
async fn exec(op: &str, mut args: Vec<String>, host: Option<&str>) -> Result<Vec<u8>> {
    if let Some(h) = host {
        args.push("--hostname".to_string());
        args.push(h.to_string());
    }

    tracing::debug!("[gh:{op}] >>> gh {}", args.join(" "));
    let start = Instant::now();

    let output = tokio::process::Command::new("gh")
        .args(&args)
        .output()
        .await
        .with_context(|| format!("failed to spawn gh for {op}"))?;

    let elapsed = start.elapsed();

    if !output.status.success() {
        let failure = GhFailure {
            exit_code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(
            "[gh:{op}] <<< FAILED ({}ms): {failure}",
            elapsed.as_millis()
        );
        return Err(failure.into());
    }

    tracing::debug!(
        "[gh:{op}] <<< OK ({}ms, {} bytes)",
        elapsed.as_millis(),
        output.stdout.len()
    );
    Ok(output.stdout)
}

fn api_args(path: String, method: &str) -> Vec<String> {
    vec![
        "api".to_string(),
        path,
        "--method".to_string(),
        method.to_string(),
    ]
}

#[async_trait]
impl Gh for RealGh {
    async fn label_get(
        &self,
        repo_name: &str,
        name: &str,
        host: Option<&str>,
    ) -> Result<Option<Label>> {
        let mut args = api_args(
            format!("repos/{repo_name}/labels/{}", urlencoding::encode(name)),
            "GET",
        );
        args.push("--jq".to_string());
        args.push(r#"{name: .name, color: .color, description: (.description // "")}"#.to_string());

        match exec("label_get", args, host).await {
            Ok(stdout) => Ok(Some(serde_json::from_slice(&stdout)?)),
            Err(e) if e.downcast_ref::<GhFailure>().is_some_and(GhFailure::is_not_found) => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn label_create(
        &self,
        repo_name: &str,
        label: &Label,
        host: Option<&str>,
    ) -> Result<()> {
        let mut args = api_args(format!("repos/{repo_name}/labels"), "POST");
        args.extend([
            "--silent".to_string(),
            "-f".to_string(),
            format!("name={}", label.name),
            "-f".to_string(),
            format!("color={}", label.color),
            "-f".to_string(),
            format!("description={}", label.description),
        ]);

        exec("label_create", args, host).await.map(|_| ())
    }

    async fn label_remove(
        &self,
        repo_name: &str,
        number: i64,
        label: &str,
        host: Option<&str>,
    ) -> Result<()> {
        let mut args = api_args(
            format!(
                "repos/{repo_name}/issues/{number}/labels/{}",
                urlencoding::encode(label)
            ),
            "DELETE",
        );
        args.push("--silent".to_string());

        exec("label_remove", args, host).await.map(|_| ())
    }

    async fn labels_add(
        &self,
        repo_name: &str,
        number: i64,
        labels: &[String],
        host: Option<&str>,
    ) -> Result<()> {
        let mut args = api_args(format!("repos/{repo_name}/issues/{number}/labels"), "POST");
        args.push("--silent".to_string());
        for label in labels {
            args.push("-f".to_string());
            args.push(format!("labels[]={label}"));
        }

        exec("labels_add", args, host).await.map(|_| ())
    }

    async fn pr_files(
        &self,
        repo_name: &str,
        number: i64,
        host: Option<&str>,
    ) -> Result<Vec<String>> {
        let mut args = api_args(format!("repos/{repo_name}/pulls/{number}/files"), "GET");
        args.extend([
            "--paginate".to_string(),
            "--jq".to_string(),
            ".[].filename".to_string(),
        ]);

        let stdout = exec("pr_files", args, host).await?;
        Ok(String::from_utf8_lossy(&stdout)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    async fn issue_comments(
        &self,
        repo_name: &str,
        number: i64,
        host: Option<&str>,
    ) -> Result<Vec<IssueComment>> {
        let mut args = api_args(format!("repos/{repo_name}/issues/{number}/comments"), "GET");
        args.extend([
            "--paginate".to_string(),
            "--jq".to_string(),
            r#".[] | {type: (.user.type // "Unknown"), body: (.body // "")}"#.to_string(),
        ]);

        let stdout = exec("issue_comments", args, host).await?;
        String::from_utf8_lossy(&stdout)
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).context("unexpected comment payload"))
            .collect()
    }

    async fn issue_comment(
        &self,
        repo_name: &str,
        number: i64,
        body: &str,
        host: Option<&str>,
    ) -> Result<()> {
        let mut args = api_args(format!("repos/{repo_name}/issues/{number}/comments"), "POST");
        args.extend([
            "--silent".to_string(),
            "-f".to_string(),
            format!("body={body}"),
        ]);

        tracing::debug!(
            "[gh:issue_comment] {repo_name}#{number} (body={} bytes)",
            body.len()
        );
        exec("issue_comment", args, host).await.map(|_| ())
    }
}
