// ─── 알려진 라벨 색상 / 설명 ───

use super::models::Label;

/// 표에 없는 라벨의 색상 (neutral gray)
pub const FALLBACK_COLOR: &str = "ededed";

const KNOWN_LABELS: &[(&str, &str, &str)] = &[
    ("bug", "d73a4a", "Something isn't working"),
    ("feature", "0e8a16", "New feature or request"),
    ("docs", "0075ca", "Documentation improvements"),
    ("needs-info", "fbca04", "Missing information needed to proceed"),
    ("priority: high", "b60205", "High priority issue or PR"),
    ("area: backend", "1d76db", "Changes to backend code"),
    ("area: frontend", "0e8a16", "Changes to frontend code"),
    ("area: infra", "5319e7", "Changes to infrastructure"),
];

// ─── 레거시 라벨 매핑 (old → canonical) ───

const LEGACY_LABELS: &[(&str, &str)] = &[
    ("priority:high", "priority: high"),
    ("area:backend", "area: backend"),
    ("area:frontend", "area: frontend"),
    ("area:infra", "area: infra"),
];

/// 라벨 생성 시 사용할 정의. 표에 없으면 회색 + 빈 설명.
pub fn label_definition(name: &str) -> Label {
    let (color, description) = KNOWN_LABELS
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, c, d)| (*c, *d))
        .unwrap_or((FALLBACK_COLOR, ""));

    Label {
        name: name.to_string(),
        color: color.trim_start_matches('#').to_string(),
        description: description.to_string(),
    }
}

/// 레거시 라벨이면 canonical 이름 반환
pub fn legacy_target(name: &str) -> Option<&'static str> {
    LEGACY_LABELS
        .iter()
        .find(|(old, _)| *old == name)
        .map(|(_, new)| *new)
}

pub fn legacy_mappings() -> &'static [(&'static str, &'static str)] {
    LEGACY_LABELS
}
