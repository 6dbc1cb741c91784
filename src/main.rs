use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use issue_sheriff::client;
use issue_sheriff::config::{self, ConfigLoader, Env, RealConfigLoader, RealEnv};
use issue_sheriff::infrastructure::gh::{Gh, RealGh};
use issue_sheriff::pipeline;

#[derive(Parser)]
#[command(name = "issue-sheriff", version, about = "GitHub issue/PR 자동 트리아지")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 이벤트 payload 대상 트리아지 실행
    Run {
        /// webhook payload 경로 (기본: $GITHUB_EVENT_PATH)
        #[arg(long)]
        event_path: Option<PathBuf>,
        /// 레포 이름 owner/repo (기본: $GITHUB_REPOSITORY)
        #[arg(long)]
        repo: Option<String>,
        /// .issuesheriff.yml을 찾을 레포 경로
        #[arg(long, default_value = ".")]
        repo_path: PathBuf,
    },
    /// API 호출 없이 라벨 판별만 수행
    Classify {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        body: String,
        /// 변경 파일 경로 (여러 번 지정 가능)
        #[arg(long = "file")]
        files: Vec<String>,
        #[arg(long, default_value = ".")]
        repo_path: PathBuf,
    },
    /// 설정 관리
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// 현재 설정 표시 (기본값 + 레포 설정 머지 결과)
    Show {
        #[arg(long, default_value = ".")]
        repo_path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("issue_sheriff=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let env = RealEnv;

    match cli.command {
        Commands::Run {
            event_path,
            repo,
            repo_path,
        } => {
            config::require_token(&env)?;

            let event_path = event_path
                .or_else(|| env.var("GITHUB_EVENT_PATH").ok().map(PathBuf::from))
                .ok_or_else(|| {
                    anyhow::anyhow!("no event payload: pass --event-path or set GITHUB_EVENT_PATH")
                })?;
            let repo = repo
                .or_else(|| env.var("GITHUB_REPOSITORY").ok())
                .ok_or_else(|| {
                    anyhow::anyhow!("no repository: pass --repo or set GITHUB_REPOSITORY")
                })?;

            let Some(target) = client::read_event(&event_path)? else {
                tracing::warn!("this action only works on issues and pull requests");
                return Ok(());
            };

            let loader = RealConfigLoader::new(Box::new(RealEnv));
            let cfg = loader.load(&repo_path);
            let host = config::gh_host(&env);
            let gh: Arc<dyn Gh> = Arc::new(RealGh);

            let report = pipeline::triage::run(gh, &cfg, &target, &repo, host.as_deref()).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Classify {
            title,
            body,
            files,
            repo_path,
        } => {
            let loader = RealConfigLoader::new(Box::new(RealEnv));
            let cfg = loader.load(&repo_path);
            print!("{}", client::classify(&cfg, &title, &body, &files));
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { repo_path } => {
                print!("{}", client::config_show(&env, &repo_path)?);
            }
        },
    }

    Ok(())
}
