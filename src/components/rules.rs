use std::sync::LazyLock;

use regex::Regex;

use crate::config::models::{Area, Category, TriageConfig};

/// needs-info 댓글 식별용 문구. 템플릿 제목에 그대로 들어가야 한다.
pub const BRAND_MARKER: &str = "Missing Information";

const NEEDS_INFO_COMMENT: &str = "## 📋 Missing Information

It looks like this issue might be missing some key information that would help us address it more effectively. Could you please add:

- [ ] **Reproduction steps** - How can we reproduce this issue?
- [ ] **Expected behavior** - What should happen?
- [ ] **Actual behavior** - What actually happens?

Once you've added this information, we'll be able to help you faster! 🚀";

const REPRO_PHRASES: &[&str] = &["steps to reproduce", "reproduction steps", "how to reproduce"];

/// 본문 맨 앞의 번호 목록 ("1. ", "2) ")
static NUMBERED_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s").expect("valid numbered list pattern"));

fn combined_text(title: &str, body: &str) -> String {
    format!("{title} {body}").to_lowercase()
}

/// 제목 + 본문 키워드로 카테고리 라벨 판별.
///
/// 카테고리마다 최대 한 개, 항상 bug → feature → docs → priority 순서.
pub fn detect_content_labels(title: &str, body: &str, config: &TriageConfig) -> Vec<String> {
    let text = combined_text(title, body);

    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let label = config.label_for(category)?;
            let hit = config
                .keywords_for(category)
                .iter()
                .any(|keyword| text.contains(&keyword.to_lowercase()));
            hit.then(|| label.to_string())
        })
        .collect()
}

/// 변경 파일 경로로 영역 라벨 판별 (backend → frontend → infra).
///
/// 경로 구분자를 고려하지 않는 단순 prefix 비교다: `backendx/a.rs`도 `backend`에 걸린다.
pub fn detect_area_labels<S: AsRef<str>>(files: &[S], config: &TriageConfig) -> Vec<String> {
    if files.is_empty() {
        return Vec::new();
    }

    Area::ALL
        .into_iter()
        .filter_map(|area| {
            let label = config.area_label_for(area)?;
            let prefixes = config.paths_for(area);
            let hit = files.iter().any(|file| {
                prefixes
                    .iter()
                    .any(|prefix| file.as_ref().starts_with(prefix.as_str()))
            });
            hit.then(|| label.to_string())
        })
        .collect()
}

/// 재현 절차나 기대/실제 동작 설명이 빠졌으면 true.
pub fn needs_info(title: &str, body: &str) -> bool {
    let text = combined_text(title, body);
    let has = |word: &str| text.contains(word);

    let has_repro_steps =
        REPRO_PHRASES.iter().any(|&phrase| has(phrase)) || NUMBERED_LIST.is_match(body);

    let has_expected = (has("expected") && has("behavior"))
        || (has("expected") && has("result"))
        || (has("should") && has("but"));

    let has_actual =
        (has("actual") && has("behavior")) || (has("actual") && has("result")) || has("instead");

    !has_repro_steps || (!has_expected && !has_actual)
}

/// needs-info 안내 댓글. 매 호출 동일한 문자열을 반환한다.
pub fn needs_info_comment() -> &'static str {
    NEEDS_INFO_COMMENT
}
