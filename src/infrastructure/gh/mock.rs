use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use super::Gh;
use crate::domain::models::{AuthorKind, IssueComment, Label};

/// 테스트용 Gh 구현체 — 메모리 상의 라벨 저장소 + 호출 기록 + 실패 주입
#[derive(Default)]
pub struct MockGh {
    /// 레포 라벨 정의: name → Label
    repo_labels: Mutex<HashMap<String, Label>>,
    /// 이슈별 현재 라벨
    issue_labels: Mutex<HashMap<i64, Vec<String>>>,
    /// PR별 변경 파일
    pr_files: Mutex<HashMap<i64, Vec<String>>>,
    /// 이슈별 댓글 (게시한 댓글은 Bot 작성으로 추가된다)
    comments: Mutex<HashMap<i64, Vec<IssueComment>>>,

    /// label_get이 실패할 라벨 이름
    pub fail_label_get: Mutex<HashSet<String>>,
    /// label_create가 실패할 라벨 이름
    pub fail_label_create: Mutex<HashSet<String>>,
    /// label_remove가 실패할 라벨 이름
    pub fail_label_remove: Mutex<HashSet<String>>,
    pub labels_add_should_fail: Mutex<bool>,
    pub pr_files_should_fail: Mutex<bool>,
    pub comments_should_fail: Mutex<bool>,
    pub comment_should_fail: Mutex<bool>,

    /// label_get 호출 기록: name
    pub label_queries: Mutex<Vec<String>>,
    /// 생성 성공한 라벨
    pub created_labels: Mutex<Vec<Label>>,
    /// 제거 기록: (repo_name, number, label)
    pub removed_labels: Mutex<Vec<(String, i64, String)>>,
    /// 배치 추가 기록: (repo_name, number, labels)
    pub added_labels: Mutex<Vec<(String, i64, Vec<String>)>>,
    /// 게시된 댓글 기록: (repo_name, number, body)
    pub posted_comments: Mutex<Vec<(String, i64, String)>>,
}

impl MockGh {
    pub fn new() -> Self {
        Self::default()
    }

    /// 레포에 이미 존재하는 라벨 등록
    pub fn set_repo_label(&self, name: &str, color: &str) {
        self.repo_labels.lock().unwrap().insert(
            name.to_string(),
            Label {
                name: name.to_string(),
                color: color.to_string(),
                description: String::new(),
            },
        );
    }

    pub fn has_repo_label(&self, name: &str) -> bool {
        self.repo_labels.lock().unwrap().contains_key(name)
    }

    pub fn set_issue_labels(&self, number: i64, labels: &[&str]) {
        self.issue_labels
            .lock()
            .unwrap()
            .insert(number, labels.iter().map(|l| l.to_string()).collect());
    }

    /// 현재 이슈에 붙어 있는 라벨 (추가/제거 반영)
    pub fn issue_labels(&self, number: i64) -> Vec<String> {
        self.issue_labels
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_pr_files(&self, number: i64, files: &[&str]) {
        self.pr_files
            .lock()
            .unwrap()
            .insert(number, files.iter().map(|f| f.to_string()).collect());
    }

    pub fn push_comment(&self, number: i64, author_kind: AuthorKind, body: &str) {
        self.comments
            .lock()
            .unwrap()
            .entry(number)
            .or_default()
            .push(IssueComment {
                author_kind,
                body: body.to_string(),
            });
    }
}

#[async_trait]
impl Gh for MockGh {
    async fn label_get(
        &self,
        _repo_name: &str,
        name: &str,
        _host: Option<&str>,
    ) -> Result<Option<Label>> {
        self.label_queries.lock().unwrap().push(name.to_string());
        if self.fail_label_get.lock().unwrap().contains(name) {
            anyhow::bail!("mock: label lookup failed for {name}");
        }
        Ok(self.repo_labels.lock().unwrap().get(name).cloned())
    }

    async fn label_create(
        &self,
        _repo_name: &str,
        label: &Label,
        _host: Option<&str>,
    ) -> Result<()> {
        if self.fail_label_create.lock().unwrap().contains(&label.name) {
            anyhow::bail!("mock: label create failed for {}", label.name);
        }
        self.repo_labels
            .lock()
            .unwrap()
            .insert(label.name.clone(), label.clone());
        self.created_labels.lock().unwrap().push(label.clone());
        Ok(())
    }

    async fn label_remove(
        &self,
        repo_name: &str,
        number: i64,
        label: &str,
        _host: Option<&str>,
    ) -> Result<()> {
        self.removed_labels.lock().unwrap().push((
            repo_name.to_string(),
            number,
            label.to_string(),
        ));
        if self.fail_label_remove.lock().unwrap().contains(label) {
            anyhow::bail!("mock: label remove failed for {label}");
        }
        if let Some(labels) = self.issue_labels.lock().unwrap().get_mut(&number) {
            labels.retain(|l| l != label);
        }
        Ok(())
    }

    async fn labels_add(
        &self,
        repo_name: &str,
        number: i64,
        labels: &[String],
        _host: Option<&str>,
    ) -> Result<()> {
        self.added_labels
            .lock()
            .unwrap()
            .push((repo_name.to_string(), number, labels.to_vec()));
        if *self.labels_add_should_fail.lock().unwrap() {
            anyhow::bail!("mock: labels add failed");
        }
        let mut issues = self.issue_labels.lock().unwrap();
        let current = issues.entry(number).or_default();
        for label in labels {
            if !current.contains(label) {
                current.push(label.clone());
            }
        }
        Ok(())
    }

    async fn pr_files(
        &self,
        _repo_name: &str,
        number: i64,
        _host: Option<&str>,
    ) -> Result<Vec<String>> {
        if *self.pr_files_should_fail.lock().unwrap() {
            anyhow::bail!("mock: pr files failed");
        }
        Ok(self
            .pr_files
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .unwrap_or_default())
    }

    async fn issue_comments(
        &self,
        _repo_name: &str,
        number: i64,
        _host: Option<&str>,
    ) -> Result<Vec<IssueComment>> {
        if *self.comments_should_fail.lock().unwrap() {
            anyhow::bail!("mock: list comments failed");
        }
        Ok(self
            .comments
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .unwrap_or_default())
    }

    async fn issue_comment(
        &self,
        repo_name: &str,
        number: i64,
        body: &str,
        _host: Option<&str>,
    ) -> Result<()> {
        if *self.comment_should_fail.lock().unwrap() {
            anyhow::bail!("mock: comment failed");
        }
        self.posted_comments.lock().unwrap().push((
            repo_name.to_string(),
            number,
            body.to_string(),
        ));
        self.push_comment(number, AuthorKind::Bot, body);
        Ok(())
    }
}
