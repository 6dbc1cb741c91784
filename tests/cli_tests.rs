use assert_cmd::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// 외부 환경 변수를 비운 CLI 실행 헬퍼
fn sheriff() -> Command {
    let mut cmd = cargo_bin_cmd!("issue-sheriff");
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("GH_TOKEN")
        .env_remove("GITHUB_EVENT_PATH")
        .env_remove("GITHUB_REPOSITORY")
        .env_remove("ISSUE_SHERIFF_CONFIG");
    cmd
}

// ═══════════════════════════════════════════════
// 1. classify
// ═══════════════════════════════════════════════

#[test]
fn classify_reports_labels_and_needs_info() {
    let repo = TempDir::new().unwrap();
    sheriff()
        .args(["classify", "--title", "App crashes on login"])
        .args(["--body", "no repro steps given"])
        .arg("--repo-path")
        .arg(repo.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("content labels: bug")
                .and(predicate::str::contains("area labels:    (none)"))
                .and(predicate::str::contains("needs info:     yes")),
        );
}

#[test]
fn classify_uses_changed_files_and_repo_config() {
    let repo = TempDir::new().unwrap();
    std::fs::write(
        repo.path().join(".issuesheriff.yml"),
        "areaLabels:\n  frontend: ui\n",
    )
    .unwrap();

    sheriff()
        .args(["classify", "--title", "Tweak"])
        .args(["--file", "frontend/app.tsx", "--file", "infra/k8s.yaml"])
        .arg("--repo-path")
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("area labels:    ui, area: infra"));
}

// ═══════════════════════════════════════════════
// 2. config show
// ═══════════════════════════════════════════════

#[test]
fn config_show_prints_defaults_without_file() {
    let repo = TempDir::new().unwrap();
    sheriff()
        .args(["config", "show", "--repo-path"])
        .arg(repo.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("# source: built-in defaults")
                .and(predicate::str::contains("areaLabels:"))
                .and(predicate::str::contains("needsInfo: needs-info")),
        );
}

#[test]
fn config_show_prints_merged_values() {
    let repo = TempDir::new().unwrap();
    std::fs::write(
        repo.path().join(".issuesheriff.yml"),
        "labels:\n  bug: defect\n",
    )
    .unwrap();

    sheriff()
        .args(["config", "show", "--repo-path"])
        .arg(repo.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("bug: defect")
                .and(predicate::str::contains("feature: feature")),
        );
}

// ═══════════════════════════════════════════════
// 3. run — 치명적 오류
// ═══════════════════════════════════════════════

#[test]
fn run_without_token_fails() {
    sheriff()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing credentials"));
}

#[test]
fn run_without_event_payload_fails() {
    sheriff()
        .arg("run")
        .env("GITHUB_TOKEN", "test-token")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no event payload"));
}

#[test]
fn run_ignores_non_issue_events() {
    let dir = TempDir::new().unwrap();
    let event = dir.path().join("event.json");
    std::fs::write(&event, r#"{"ref": "refs/heads/main", "commits": []}"#).unwrap();

    sheriff()
        .args(["run", "--repo", "org/repo", "--event-path"])
        .arg(&event)
        .env("GITHUB_TOKEN", "test-token")
        .assert()
        .success()
        .stderr(predicate::str::contains("only works on issues and pull requests"));
}
