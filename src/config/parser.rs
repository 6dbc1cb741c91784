//! `.issuesheriff.yml` 전용 2단계 라인 스캐너.
//!
//! 범용 YAML이 아니다. `:`로 끝나는 헤더, `-` 리스트 항목, `key: value` 스칼라만 인식하고
//! 들여쓰기는 무시한다. 인식하지 못한 줄은 조용히 건너뛴다.

use super::models::ConfigOverlay;

/// 최상위 섹션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Keywords,
    Labels,
    Paths,
    AreaLabels,
}

impl Section {
    fn from_header(name: &str) -> Option<Self> {
        match name {
            "keywords" => Some(Section::Keywords),
            "labels" => Some(Section::Labels),
            "paths" => Some(Section::Paths),
            "areaLabels" => Some(Section::AreaLabels),
            _ => None,
        }
    }
}

/// 스캐너 상태: 섹션 밖 / 섹션 안 / 섹션 + 하위 키
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    InSection(Section),
    InEntry(Section, String),
}

impl State {
    fn section(&self) -> Option<Section> {
        match self {
            State::Idle => None,
            State::InSection(s) | State::InEntry(s, _) => Some(*s),
        }
    }
}

/// 설정 텍스트를 overlay로 변환한다.
pub fn parse(content: &str) -> ConfigOverlay {
    let mut overlay = ConfigOverlay::default();
    let mut state = State::Idle;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(header) = trimmed.strip_suffix(':') {
            let header = header.trim();
            state = match Section::from_header(header) {
                Some(section) => State::InSection(section),
                // 알 수 없는 헤더는 현재 섹션의 하위 키가 된다
                None => match state.section() {
                    Some(section) => State::InEntry(section, header.to_string()),
                    None => State::Idle,
                },
            };
            continue;
        }

        if let Some(item) = trimmed.strip_prefix('-') {
            if let State::InEntry(section, key) = &state {
                let value = strip_quotes(item.trim()).to_string();
                let target = match section {
                    Section::Keywords => &mut overlay.keywords,
                    Section::Paths => &mut overlay.paths,
                    Section::Labels | Section::AreaLabels => continue,
                };
                target.entry(key.clone()).or_default().push(value);
            }
            continue;
        }

        if let Some((key, value)) = trimmed.split_once(':') {
            let key = key.trim();
            let value = strip_quotes(value.trim()).to_string();
            let target = match state.section() {
                Some(Section::Labels) => &mut overlay.labels,
                Some(Section::AreaLabels) => &mut overlay.area_labels,
                _ => continue,
            };
            if !key.is_empty() {
                target.insert(key.to_string(), value);
            }
        }
    }

    overlay
}

/// 앞뒤 따옴표를 한 겹만 벗긴다. 앞과 뒤는 서로 독립적으로 처리한다.
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}
