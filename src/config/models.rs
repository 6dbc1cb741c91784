use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ─── 카테고리 / 영역 ───

/// 본문 키워드로 판별하는 카테고리. 순서가 곧 라벨 출력 순서다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Bug,
    Feature,
    Docs,
    Priority,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Bug,
        Category::Feature,
        Category::Docs,
        Category::Priority,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Bug => "bug",
            Category::Feature => "feature",
            Category::Docs => "docs",
            Category::Priority => "priority",
        }
    }
}

/// 변경 파일 경로로 판별하는 영역
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Backend,
    Frontend,
    Infra,
}

impl Area {
    pub const ALL: [Area; 3] = [Area::Backend, Area::Frontend, Area::Infra];

    pub fn key(self) -> &'static str {
        match self {
            Area::Backend => "backend",
            Area::Frontend => "frontend",
            Area::Infra => "infra",
        }
    }
}

/// `labels` 섹션에서 needs-info 라벨을 가리키는 키
pub const NEEDS_INFO_KEY: &str = "needsInfo";

// ─── 설정 ───

/// `.issuesheriff.yml`의 전체 스키마.
///
/// 네 섹션 모두 평면 맵이다. 키가 없으면 해당 규칙이 비활성화될 뿐 에러가 아니다.
/// `Default`는 내장 기본값이며, 호출할 때마다 독립된 값을 새로 만든다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    pub keywords: BTreeMap<String, Vec<String>>,
    pub labels: BTreeMap<String, String>,
    pub paths: BTreeMap<String, Vec<String>>,
    #[serde(rename = "areaLabels")]
    pub area_labels: BTreeMap<String, String>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            keywords: list_map(&[
                ("bug", &["bug", "error", "crash", "exception"]),
                ("feature", &["feature", "enhancement", "request"]),
                ("docs", &["docs", "readme", "documentation"]),
                ("priority", &["urgent", "priority"]),
            ]),
            labels: scalar_map(&[
                ("bug", "bug"),
                ("feature", "feature"),
                ("docs", "docs"),
                ("priority", "priority: high"),
                (NEEDS_INFO_KEY, "needs-info"),
            ]),
            paths: list_map(&[
                ("backend", &["backend"]),
                ("frontend", &["frontend"]),
                ("infra", &["infra"]),
            ]),
            area_labels: scalar_map(&[
                ("backend", "area: backend"),
                ("frontend", "area: frontend"),
                ("infra", "area: infra"),
            ]),
        }
    }
}

impl TriageConfig {
    /// 섹션별 얕은 머지: overlay 키가 같은 이름의 기본 키를 덮어쓰고,
    /// overlay에 없는 기본 키는 유지되며, 새 키는 추가된다.
    pub fn merge(mut self, overlay: ConfigOverlay) -> Self {
        self.keywords.extend(overlay.keywords);
        self.labels.extend(overlay.labels);
        self.paths.extend(overlay.paths);
        self.area_labels.extend(overlay.area_labels);
        self
    }

    pub fn keywords_for(&self, category: Category) -> &[String] {
        self.keywords
            .get(category.key())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 빈 문자열 라벨은 미설정으로 취급한다.
    pub fn label_for(&self, category: Category) -> Option<&str> {
        non_empty(self.labels.get(category.key()))
    }

    pub fn paths_for(&self, area: Area) -> &[String] {
        self.paths
            .get(area.key())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn area_label_for(&self, area: Area) -> Option<&str> {
        non_empty(self.area_labels.get(area.key()))
    }

    pub fn needs_info_label(&self) -> Option<&str> {
        non_empty(self.labels.get(NEEDS_INFO_KEY))
    }
}

/// 설정 파일에서 읽어낸 사용자 지정 값. 비어 있으면 기본값 그대로가 된다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverlay {
    pub keywords: BTreeMap<String, Vec<String>>,
    pub labels: BTreeMap<String, String>,
    pub paths: BTreeMap<String, Vec<String>>,
    pub area_labels: BTreeMap<String, String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

fn list_map(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
        .collect()
}

fn scalar_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
