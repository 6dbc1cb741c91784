use std::sync::Arc;

use issue_sheriff::components::rules::{needs_info_comment, BRAND_MARKER};
use issue_sheriff::config::models::TriageConfig;
use issue_sheriff::domain::models::{AuthorKind, IssueContext, TriageTarget};
use issue_sheriff::infrastructure::gh::{Gh, MockGh};
use issue_sheriff::pipeline::triage;

// ─── Helpers ───

const REPO: &str = "org/repo";

const COMPLETE_BODY: &str =
    "Steps to reproduce:\n1. open app\nExpected behavior: login works\nActual behavior: crash";

fn issue(number: i64, title: &str, body: &str, labels: &[&str]) -> TriageTarget {
    TriageTarget::Issue(IssueContext {
        number,
        title: title.to_string(),
        body: body.to_string(),
        labels: labels.iter().map(|l| l.to_string()).collect(),
    })
}

fn pull_request(number: i64, title: &str, labels: &[&str]) -> TriageTarget {
    TriageTarget::PullRequest(IssueContext {
        number,
        title: title.to_string(),
        body: String::new(),
        labels: labels.iter().map(|l| l.to_string()).collect(),
    })
}

/// 호스트 상태를 다시 읽어 대상 스냅샷을 만든다 (두 번째 실행 시뮬레이션)
fn refetch(gh: &MockGh, target: &TriageTarget) -> TriageTarget {
    let ctx = target.context();
    TriageTarget::Issue(IssueContext {
        labels: gh.issue_labels(ctx.number),
        ..ctx.clone()
    })
}

async fn run(gh: &Arc<MockGh>, target: &TriageTarget) -> triage::TriageReport {
    let dyn_gh: Arc<dyn Gh> = gh.clone();
    triage::run(dyn_gh, &TriageConfig::default(), target, REPO, None).await
}

// ═══════════════════════════════════════════════
// 1. Issue: 내용 라벨 + needs-info
// ═══════════════════════════════════════════════

#[tokio::test]
async fn crash_report_without_details_gets_bug_and_needs_info() {
    let gh = Arc::new(MockGh::new());
    let target = issue(1, "App crashes on login", "no repro steps given", &[]);

    let report = run(&gh, &target).await;

    assert_eq!(report.added, vec!["bug"]);
    assert_eq!(report.needs_info, Some(true));
    assert!(report.comment_posted);
    assert_eq!(gh.issue_labels(1), vec!["bug", "needs-info"]);
    assert!(gh.has_repo_label("bug"));
    assert!(gh.has_repo_label("needs-info"));

    let posted = gh.posted_comments.lock().unwrap();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].2, needs_info_comment());
}

#[tokio::test]
async fn needs_info_comment_posted_once_across_runs() {
    let gh = Arc::new(MockGh::new());
    let target = issue(1, "App crashes on login", "no repro steps given", &[]);

    let first = run(&gh, &target).await;
    let second = run(&gh, &refetch(&gh, &target)).await;

    assert!(first.comment_posted);
    assert!(!second.comment_posted);
    assert!(second.added.is_empty());
    assert_eq!(second.needs_info, Some(true));
    assert_eq!(gh.posted_comments.lock().unwrap().len(), 1);
    // needs-info 라벨은 이미 있으므로 두 번째 실행에서 추가 호출 없음
    assert_eq!(gh.added_labels.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn human_comment_with_marker_does_not_count() {
    let gh = Arc::new(MockGh::new());
    gh.push_comment(3, AuthorKind::User, &format!("quoting: {BRAND_MARKER}"));
    let target = issue(3, "Question", "hello", &[]);

    let report = run(&gh, &target).await;

    assert!(report.comment_posted);
}

#[tokio::test]
async fn bot_comment_without_marker_does_not_count() {
    let gh = Arc::new(MockGh::new());
    gh.push_comment(3, AuthorKind::Bot, "Thanks for the report!");
    let target = issue(3, "Question", "hello", &[]);

    let report = run(&gh, &target).await;

    assert!(report.comment_posted);
}

#[tokio::test]
async fn complete_report_removes_stale_needs_info() {
    let gh = Arc::new(MockGh::new());
    gh.set_issue_labels(4, &["bug", "needs-info"]);
    let target = issue(4, "Crash on login", COMPLETE_BODY, &["bug", "needs-info"]);

    let report = run(&gh, &target).await;

    assert_eq!(report.needs_info, Some(false));
    assert!(report.needs_info_removed);
    assert!(!report.comment_posted);
    assert_eq!(gh.issue_labels(4), vec!["bug"]);
    assert!(gh.added_labels.lock().unwrap().is_empty());
}

#[tokio::test]
async fn complete_report_without_label_makes_no_needs_info_calls() {
    let gh = Arc::new(MockGh::new());
    let target = issue(6, "Login broken", COMPLETE_BODY, &[]);

    let report = run(&gh, &target).await;

    assert_eq!(report.needs_info, Some(false));
    assert!(!report.needs_info_removed);
    assert!(gh.removed_labels.lock().unwrap().is_empty());
    assert!(gh.posted_comments.lock().unwrap().is_empty());
}

#[tokio::test]
async fn needs_info_disabled_when_label_unconfigured() {
    let gh = Arc::new(MockGh::new());
    let mut config = TriageConfig::default();
    config.labels.remove("needsInfo");
    let target = issue(1, "Crash", "", &[]);

    let dyn_gh: Arc<dyn Gh> = gh.clone();
    let report = triage::run(dyn_gh, &config, &target, REPO, None).await;

    assert_eq!(report.needs_info, None);
    assert!(gh.posted_comments.lock().unwrap().is_empty());
}

#[tokio::test]
async fn comment_listing_failure_skips_posting() {
    let gh = Arc::new(MockGh::new());
    *gh.comments_should_fail.lock().unwrap() = true;
    let target = issue(2, "Crash", "", &[]);

    let report = run(&gh, &target).await;

    assert_eq!(report.needs_info, Some(true));
    assert!(!report.comment_posted);
    // 라벨 작업은 계속 진행된다
    assert_eq!(gh.issue_labels(2), vec!["bug", "needs-info"]);
}

#[tokio::test]
async fn label_add_failure_does_not_stop_comment() {
    let gh = Arc::new(MockGh::new());
    *gh.labels_add_should_fail.lock().unwrap() = true;
    let target = issue(2, "Crash", "", &[]);

    let report = run(&gh, &target).await;

    assert!(report.added.is_empty());
    assert!(report.comment_posted);
}

// ═══════════════════════════════════════════════
// 2. Legacy migration 순서
// ═══════════════════════════════════════════════

#[tokio::test]
async fn migration_runs_before_content_labels() {
    let gh = Arc::new(MockGh::new());
    gh.set_issue_labels(7, &["priority:high"]);
    let target = issue(7, "Urgent: crash", COMPLETE_BODY, &["priority:high"]);

    let report = run(&gh, &target).await;

    assert_eq!(report.migrated, vec!["priority: high"]);
    // priority 라벨은 마이그레이션으로 이미 붙었으므로 다시 추가하지 않는다
    assert_eq!(report.added, vec!["bug"]);
    assert_eq!(gh.issue_labels(7), vec!["priority: high", "bug"]);
}

#[tokio::test]
async fn existing_labels_are_not_re_added() {
    let gh = Arc::new(MockGh::new());
    gh.set_issue_labels(8, &["bug"]);
    let target = issue(8, "Crash with error", COMPLETE_BODY, &["bug"]);

    let report = run(&gh, &target).await;

    assert!(report.added.is_empty());
    assert!(gh.added_labels.lock().unwrap().is_empty());
}

// ═══════════════════════════════════════════════
// 3. Pull request: 영역 라벨
// ═══════════════════════════════════════════════

#[tokio::test]
async fn pull_request_gets_area_labels() {
    let gh = Arc::new(MockGh::new());
    gh.set_pr_files(10, &["backend/api.rs", "infra/main.tf", "README.md"]);
    let target = pull_request(10, "Update docs for deploy", &[]);

    let report = run(&gh, &target).await;

    assert_eq!(report.added, vec!["docs", "area: backend", "area: infra"]);
    assert_eq!(report.needs_info, None);
    assert!(gh.posted_comments.lock().unwrap().is_empty());
    let added = gh.added_labels.lock().unwrap();
    assert_eq!(added.len(), 1, "content and area labels go in one batch");
}

#[tokio::test]
async fn pull_request_file_listing_failure_keeps_content_labels() {
    let gh = Arc::new(MockGh::new());
    *gh.pr_files_should_fail.lock().unwrap() = true;
    let target = pull_request(11, "Fix crash", &[]);

    let report = run(&gh, &target).await;

    assert_eq!(report.added, vec!["bug"]);
}

#[tokio::test]
async fn pull_request_without_changes_adds_nothing() {
    let gh = Arc::new(MockGh::new());
    let target = pull_request(12, "Refactor", &[]);

    let report = run(&gh, &target).await;

    assert!(report.added.is_empty());
    assert!(gh.added_labels.lock().unwrap().is_empty());
    assert!(gh.label_queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn pull_request_legacy_area_label_is_migrated_and_not_duplicated() {
    let gh = Arc::new(MockGh::new());
    gh.set_issue_labels(13, &["area:frontend"]);
    gh.set_pr_files(13, &["frontend/app.tsx"]);
    let target = pull_request(13, "Tweak layout", &["area:frontend"]);

    let report = run(&gh, &target).await;

    assert_eq!(report.migrated, vec!["area: frontend"]);
    assert!(report.added.is_empty());
    assert_eq!(gh.issue_labels(13), vec!["area: frontend"]);
}
