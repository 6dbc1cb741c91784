use std::sync::Arc;

use serde::Serialize;

use crate::components::reconciler::{dedup, plan_migration, LabelReconciler};
use crate::components::rules;
use crate::config::models::TriageConfig;
use crate::domain::models::{AuthorKind, IssueContext, TriageTarget};
use crate::infrastructure::gh::Gh;

/// 한 번의 트리아지 실행 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TriageReport {
    pub number: i64,
    /// 레거시 마이그레이션으로 추가하려 한 라벨
    pub migrated: Vec<String>,
    /// 내용/경로 판별로 실제 추가된 라벨
    pub added: Vec<String>,
    /// 이슈에만 해당. PR이거나 needs-info 라벨이 미설정이면 None
    pub needs_info: Option<bool>,
    pub comment_posted: bool,
    pub needs_info_removed: bool,
}

/// 트리아지 파이프라인: 레거시 마이그레이션 → 라벨 추가 → needs-info 처리.
///
/// 단계마다 이전 단계가 바꾼 라벨 집합을 기준으로 판단하므로 순서대로 실행한다.
/// 개별 API 실패는 경고로 남기고 다음 작업을 계속한다.
pub async fn run(
    gh: Arc<dyn Gh>,
    config: &TriageConfig,
    target: &TriageTarget,
    repo_name: &str,
    host: Option<&str>,
) -> TriageReport {
    let ctx = target.context();
    let reconciler = LabelReconciler::new(Arc::clone(&gh), repo_name, host);
    let mut report = TriageReport {
        number: ctx.number,
        ..Default::default()
    };

    tracing::info!("triaging {} #{}: {}", target.kind(), ctx.number, ctx.title);

    // ── 1. Legacy migration ──
    let mut current = ctx.labels.clone();
    report.migrated = reconciler.migrate_old_labels(&current, ctx.number).await;
    plan_migration(&ctx.labels).apply_to(&mut current);

    // ── 2. Content + area labels ──
    let mut detected = rules::detect_content_labels(&ctx.title, &ctx.body, config);
    if target.is_pull_request() {
        match gh.pr_files(repo_name, ctx.number, host).await {
            Ok(files) => detected.extend(rules::detect_area_labels(&files, config)),
            Err(e) => tracing::warn!("failed to fetch PR files: {e:#}"),
        }
    }

    let to_add: Vec<String> = dedup(&detected)
        .into_iter()
        .filter(|l| !current.contains(l))
        .collect();

    if !to_add.is_empty() {
        reconciler.ensure_labels_exist(&to_add).await;
        match gh.labels_add(repo_name, ctx.number, &to_add, host).await {
            Ok(()) => {
                tracing::info!("added labels: {}", to_add.join(", "));
                current.extend(to_add.iter().cloned());
                report.added = to_add;
            }
            Err(e) => tracing::error!("failed to add labels: {e:#}"),
        }
    }

    // ── 3. Needs-info (issues only) ──
    if let (TriageTarget::Issue(issue), Some(label)) = (target, config.needs_info_label()) {
        handle_needs_info(
            &*gh,
            &reconciler,
            issue,
            label,
            &current,
            repo_name,
            host,
            &mut report,
        )
        .await;
    }

    report
}

#[allow(clippy::too_many_arguments)]
async fn handle_needs_info(
    gh: &dyn Gh,
    reconciler: &LabelReconciler,
    issue: &IssueContext,
    label: &str,
    current: &[String],
    repo_name: &str,
    host: Option<&str>,
    report: &mut TriageReport,
) {
    let has_label = current.iter().any(|l| l == label);
    let missing = rules::needs_info(&issue.title, &issue.body);
    report.needs_info = Some(missing);

    if !missing {
        if has_label {
            match gh.label_remove(repo_name, issue.number, label, host).await {
                Ok(()) => {
                    tracing::info!("removed label: {label}");
                    report.needs_info_removed = true;
                }
                Err(e) => tracing::error!("failed to remove needs-info label: {e:#}"),
            }
        }
        return;
    }

    if !has_label {
        reconciler.ensure_label_exists(label).await;
        let labels = [label.to_string()];
        match gh.labels_add(repo_name, issue.number, &labels, host).await {
            Ok(()) => tracing::info!("added label: {label}"),
            Err(e) => tracing::error!("failed to add needs-info label: {e:#}"),
        }
    }

    // 같은 안내 댓글을 두 번 달지 않는다
    let comments = match gh.issue_comments(repo_name, issue.number, host).await {
        Ok(comments) => comments,
        Err(e) => {
            tracing::warn!("failed to list comments, skipping needs-info comment: {e:#}");
            return;
        }
    };

    let already_posted = comments
        .iter()
        .any(|c| c.author_kind == AuthorKind::Bot && c.body.contains(rules::BRAND_MARKER));
    if already_posted {
        tracing::debug!("needs-info comment already present on #{}", issue.number);
        return;
    }

    match gh
        .issue_comment(repo_name, issue.number, rules::needs_info_comment(), host)
        .await
    {
        Ok(()) => {
            tracing::info!("posted needs-info comment");
            report.comment_posted = true;
        }
        Err(e) => tracing::error!("failed to post comment: {e:#}"),
    }
}
