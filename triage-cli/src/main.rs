use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_client::{
    AnalysisDisplay, DEFAULT_ANALYZE_URL, ResultView, Submission, SubmissionHandler,
    SubmitOutcome,
};
use triage_providers::analyze::{EmailUpload, mime_type_for};
use triage_runtime::config_store::ConfigStore;
use triage_runtime::defaults::default_app_config;
use triage_runtime::history::{AnalysisHistoryStore, HistoryEntry};
use triage_runtime::runtime_engine::{LLM_API_KEY_ENV, build_engine_from_config};
use triage_server::state::AppState;

#[derive(Parser)]
#[command(name = "triage", about = "Classify emails and draft replies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit email content to a running analysis API
    Analyze {
        /// Inline email text
        text: Option<String>,

        /// Email file to upload (.txt or .eml)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Analysis endpoint URL
        #[arg(long, default_value = DEFAULT_ANALYZE_URL)]
        endpoint: String,

        /// Where successful analyses are recorded
        #[arg(long, default_value = "triage-history.json")]
        history: PathBuf,
    },

    /// Run the analysis API server
    Serve {
        /// Listen address
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: String,

        /// Config file (created with defaults on first run)
        #[arg(long, default_value = "triage-config.json")]
        config: PathBuf,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "triage=info,tower_http=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

struct TerminalView;

impl ResultView for TerminalView {
    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }

    fn show_analysis(&self, display: &AnalysisDisplay) {
        println!("Category:   {}", display.category);
        println!("Confidence: {}", display.confidence_pct);
        println!();
        println!("Suggested reply:");
        println!("{}", display.reply);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            text,
            file,
            endpoint,
            history,
        } => analyze(text, file, endpoint, history).await,
        Commands::Serve { addr, config } => serve(addr, config).await,
    }
}

async fn analyze(
    text: Option<String>,
    file: Option<PathBuf>,
    endpoint: String,
    history: PathBuf,
) -> anyhow::Result<()> {
    let upload = match file {
        Some(path) => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("read upload: {}", path.display()))?;
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload")
                .to_string();
            let mime_type = mime_type_for(&filename).to_string();
            Some(EmailUpload {
                filename,
                mime_type,
                bytes,
            })
        }
        None => None,
    };

    let submission = Submission::from_inputs(text.as_deref().unwrap_or_default(), upload);
    let source = submission.source_label();

    let handler = SubmissionHandler::new(endpoint);
    match handler.submit(&submission, &TerminalView).await {
        SubmitOutcome::Analyzed(analysis) => {
            let entry = HistoryEntry {
                ts_unix_ms: unix_ms(),
                source,
                category: analysis.category,
                confidence: analysis.confidence,
            };
            if let Err(e) = AnalysisHistoryStore::at_path(history).append(entry) {
                tracing::warn!("could not record history: {e:#}");
            }
            Ok(())
        }
        SubmitOutcome::Rejected | SubmitOutcome::ServerError(_) | SubmitOutcome::TransportFailed => {
            // The view already explained the problem.
            std::process::exit(1);
        }
    }
}

async fn serve(addr: String, config: PathBuf) -> anyhow::Result<()> {
    let store = ConfigStore::at_path(&config);
    let mut cfg = if store.exists() {
        store.load()?
    } else {
        let cfg = default_app_config();
        store.save(&cfg)?;
        tracing::info!("wrote default config to {}", store.path().display());
        cfg
    };

    if let Ok(v) = std::env::var("LLM_BASE_URL") {
        cfg.analyzer.llm_base_url = v;
    }
    if let Ok(v) = std::env::var("LLM_MODEL") {
        cfg.analyzer.llm_model = v;
    }

    cfg.llm_api_key_present = std::env::var(LLM_API_KEY_ENV)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false);
    if !cfg.llm_api_key_present {
        tracing::warn!("{LLM_API_KEY_ENV} not set; classifying with keyword rules only");
    }

    let engine = build_engine_from_config(cfg);
    triage_server::run_server(AppState::new(Arc::new(engine)), &addr).await
}

fn unix_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
