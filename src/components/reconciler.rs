use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::domain::labels;
use crate::domain::models::LabelDiff;
use crate::infrastructure::gh::Gh;

/// 라벨 존재 보장 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOutcome {
    Existing,
    Created,
    Failed,
}

/// 레포 라벨 정의 보장 + 레거시 라벨 마이그레이션 — Gh trait 주입받아 동작.
///
/// 모든 실패는 경고 로그로만 남기고 나머지 작업을 계속한다.
pub struct LabelReconciler {
    gh: Arc<dyn Gh>,
    repo_name: String,
    host: Option<String>,
}

impl LabelReconciler {
    pub fn new(gh: Arc<dyn Gh>, repo_name: &str, host: Option<&str>) -> Self {
        Self {
            gh,
            repo_name: repo_name.to_string(),
            host: host.map(String::from),
        }
    }

    /// 라벨이 없으면 알려진 색상/설명으로 생성 (idempotent upsert)
    pub async fn ensure_label_exists(&self, name: &str) -> LabelOutcome {
        upsert(&*self.gh, &self.repo_name, name, self.host.as_deref()).await
    }

    /// 중복 제거 후 라벨마다 독립적으로 upsert. 하나가 실패해도 나머지는 모두 시도한다.
    ///
    /// 결과는 입력에서 처음 등장한 순서를 따른다.
    pub async fn ensure_labels_exist(&self, names: &[String]) -> Vec<(String, LabelOutcome)> {
        let unique = dedup(names);
        let mut join_set = JoinSet::new();

        for name in &unique {
            let gh = Arc::clone(&self.gh);
            let repo_name = self.repo_name.clone();
            let host = self.host.clone();
            let name = name.clone();
            join_set.spawn(async move {
                let outcome = upsert(&*gh, &repo_name, &name, host.as_deref()).await;
                (name, outcome)
            });
        }

        let mut outcomes = HashMap::new();
        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((name, outcome)) => {
                    outcomes.insert(name, outcome);
                }
                Err(e) => tracing::error!("label upsert task panicked: {e}"),
            }
        }

        unique
            .into_iter()
            .map(|name| {
                let outcome = outcomes.remove(&name).unwrap_or(LabelOutcome::Failed);
                (name, outcome)
            })
            .collect()
    }

    /// 이슈에 붙은 레거시 라벨을 canonical 라벨로 교체.
    ///
    /// 반환값은 추가하려고 한 라벨 목록이다. 추가 실패도 경고로만 남으므로
    /// 실제 부착 여부가 필요하면 호스트에서 라벨을 다시 조회해야 한다.
    pub async fn migrate_old_labels(&self, existing: &[String], number: i64) -> Vec<String> {
        let diff = plan_migration(existing);
        let host = self.host.as_deref();

        for old in &diff.remove {
            match self
                .gh
                .label_remove(&self.repo_name, number, old, host)
                .await
            {
                Ok(()) => tracing::info!("removed old label: {old}"),
                Err(e) => tracing::warn!("failed to remove old label {old}: {e:#}"),
            }
        }

        if diff.add.is_empty() {
            return diff.add;
        }

        self.ensure_labels_exist(&diff.add).await;
        match self
            .gh
            .labels_add(&self.repo_name, number, &diff.add, host)
            .await
        {
            Ok(()) => tracing::info!(
                "migrated labels: {} → {}",
                diff.remove.join(", "),
                diff.add.join(", ")
            ),
            Err(e) => tracing::error!("failed to add migrated labels: {e:#}"),
        }

        diff.add
    }
}

/// 레거시 라벨 교체 계획. canonical 라벨이 이미 있으면 해당 레거시 라벨은 그대로 둔다.
pub fn plan_migration(existing: &[String]) -> LabelDiff {
    let mut diff = LabelDiff::default();
    for old in existing {
        if let Some(new) = labels::legacy_target(old) {
            if !existing.iter().any(|l| l == new) {
                diff.remove.push(old.clone());
                diff.add.push(new.to_string());
            }
        }
    }
    diff
}

/// 순서를 유지하며 정확히 같은 문자열만 제거
pub fn dedup(names: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !unique.contains(name) {
            unique.push(name.clone());
        }
    }
    unique
}

async fn upsert(gh: &dyn Gh, repo_name: &str, name: &str, host: Option<&str>) -> LabelOutcome {
    match gh.label_get(repo_name, name, host).await {
        Ok(Some(_)) => LabelOutcome::Existing,
        Ok(None) => {
            let label = labels::label_definition(name);
            match gh.label_create(repo_name, &label, host).await {
                Ok(()) => {
                    tracing::info!("created label: {name}");
                    LabelOutcome::Created
                }
                Err(e) => {
                    tracing::warn!("failed to create label {name}: {e:#}");
                    LabelOutcome::Failed
                }
            }
        }
        Err(e) => {
            tracing::warn!("failed to check label {name}: {e:#}");
            LabelOutcome::Failed
        }
    }
}
