use serde::{Deserialize, Serialize};

// ─── Label ───

/// 레포 라벨 정의. 이름이 식별자이며 대소문자를 구분한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    /// `#` 없는 6자리 hex
    pub color: String,
    #[serde(default)]
    pub description: String,
}

// ─── Pre-fetched Value Objects ───

/// 이슈/PR 스냅샷. 실행 시작 시 한 번 읽고 이후 변경하지 않는다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueContext {
    pub number: i64,
    pub title: String,
    /// 본문이 없으면 빈 문자열
    pub body: String,
    pub labels: Vec<String>,
}

impl IssueContext {
    /// GitHub webhook의 issue / pull_request 객체로부터 생성.
    /// 라벨은 문자열 또는 `{ "name": ... }` 객체 모두 허용한다.
    pub fn from_json(v: &serde_json::Value) -> Option<Self> {
        Some(Self {
            number: v["number"].as_i64().filter(|n| *n > 0)?,
            title: v["title"].as_str().unwrap_or("").to_string(),
            body: v["body"].as_str().unwrap_or("").to_string(),
            labels: v["labels"]
                .as_array()
                .map(|arr| {
                    arr.iter()
                        .filter_map(|l| l.as_str().or_else(|| l["name"].as_str()))
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// 트리아지 대상. PR의 변경 파일 목록은 파이프라인이 따로 조회한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageTarget {
    Issue(IssueContext),
    PullRequest(IssueContext),
}

impl TriageTarget {
    /// 이벤트 payload에서 대상 추출. issue도 PR도 아니면 None.
    pub fn from_event(payload: &serde_json::Value) -> Option<Self> {
        if let Some(issue) = payload.get("issue") {
            return IssueContext::from_json(issue).map(TriageTarget::Issue);
        }
        if let Some(pr) = payload.get("pull_request") {
            return IssueContext::from_json(pr).map(TriageTarget::PullRequest);
        }
        None
    }

    pub fn context(&self) -> &IssueContext {
        match self {
            TriageTarget::Issue(ctx) | TriageTarget::PullRequest(ctx) => ctx,
        }
    }

    pub fn is_pull_request(&self) -> bool {
        matches!(self, TriageTarget::PullRequest(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TriageTarget::Issue(_) => "issue",
            TriageTarget::PullRequest(_) => "pull request",
        }
    }
}

// ─── Comments ───

/// 댓글 작성자 유형 (GitHub `user.type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorKind {
    User,
    Bot,
    Organization,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueComment {
    #[serde(rename = "type")]
    pub author_kind: AuthorKind,
    #[serde(default)]
    pub body: String,
}

// ─── LabelDiff ───

/// 라벨 변경 계획. 결정 로직은 diff만 만들고, 적용은 호출자가 따로 한다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelDiff {
    pub remove: Vec<String>,
    pub add: Vec<String>,
}

impl LabelDiff {
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.add.is_empty()
    }

    /// 현재 라벨 목록에 diff 반영 (제거 후 추가, 중복 추가 없음)
    pub fn apply_to(&self, labels: &mut Vec<String>) {
        labels.retain(|l| !self.remove.contains(l));
        for label in &self.add {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }
    }
}
