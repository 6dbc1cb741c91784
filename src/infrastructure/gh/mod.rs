pub mod mock;
pub mod real;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{IssueComment, Label};

pub use mock::MockGh;
pub use real::RealGh;

/// GitHub 라벨/댓글/PR 파일 API 추상화.
///
/// 호출 하나가 요청 하나에 대응하며 재시도하지 않는다.
/// 실패를 어떻게 다룰지는 호출하는 쪽(components, pipeline)이 정한다.
#[async_trait]
pub trait Gh: Send + Sync {
    /// `GET repos/{repo}/labels/{name}` — 404면 `Ok(None)`
    async fn label_get(
        &self,
        repo_name: &str,
        name: &str,
        host: Option<&str>,
    ) -> Result<Option<Label>>;

    /// `POST repos/{repo}/labels`
    async fn label_create(&self, repo_name: &str, label: &Label, host: Option<&str>)
        -> Result<()>;

    /// `DELETE repos/{repo}/issues/{number}/labels/{label}` — 라벨 정의는 남기고 이슈에서만 뗀다
    async fn label_remove(
        &self,
        repo_name: &str,
        number: i64,
        label: &str,
        host: Option<&str>,
    ) -> Result<()>;

    /// `POST repos/{repo}/issues/{number}/labels` — 여러 라벨을 한 번에 추가
    async fn labels_add(
        &self,
        repo_name: &str,
        number: i64,
        labels: &[String],
        host: Option<&str>,
    ) -> Result<()>;

    /// `GET repos/{repo}/pulls/{number}/files --paginate` — 변경된 파일 경로 목록
    async fn pr_files(&self, repo_name: &str, number: i64, host: Option<&str>)
        -> Result<Vec<String>>;

    /// `GET repos/{repo}/issues/{number}/comments --paginate`
    async fn issue_comments(
        &self,
        repo_name: &str,
        number: i64,
        host: Option<&str>,
    ) -> Result<Vec<IssueComment>>;

    /// `POST repos/{repo}/issues/{number}/comments`
    async fn issue_comment(
        &self,
        repo_name: &str,
        number: i64,
        body: &str,
        host: Option<&str>,
    ) -> Result<()>;
}
