//! Codecritic CLI - serve the review agent or talk to its store directly

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use codecritic::agent::AgentDirectory;
use codecritic::config::{self, CodecriticConfig};
use codecritic::inference::{HttpInference, InferenceEngine, Unconfigured};
use codecritic::review::ReviewRequest;
use codecritic::server::{self, REVIEWER_NAME};
use codecritic::ui::{self, Spinner};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "codecritic")]
#[command(version)]
#[command(about = "Code review agent backed by a hosted LLM")]
#[command(long_about = r#"
Codecritic forwards code snippets to a hosted LLM for review, keeps the
feedback in a local store, and serves a browser UI to drive it.

Example usage:
  codecritic init
  codecritic serve --port 8787
  codecritic review --file src/main.py --language Python
  codecritic suggest --pattern "unwrap()"
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./codecritic.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service and browser UI
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding the review store
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Review a file and store the feedback
    Review {
        /// File to review
        #[arg(short, long)]
        file: PathBuf,

        /// Language label (guessed from the file extension if omitted)
        #[arg(short, long)]
        language: Option<String>,

        /// Extra context for the reviewer
        #[arg(long)]
        context: Option<String>,

        /// Directory holding the review store
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Show the most recent reviews
    History {
        /// Directory holding the review store
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Synthesize recurring anti-patterns from past reviews of matching code
    Suggest {
        /// Substring the reviewed code must contain (case-sensitive)
        #[arg(short, long)]
        pattern: String,

        /// Directory holding the review store
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Write a starter config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port, data_dir } => {
            let port = port.unwrap_or_else(|| config.port());
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir());

            ui::serving(config.model(), &config::database_path_in(&data_dir, REVIEWER_NAME));

            let agents = AgentDirectory::sqlite(data_dir, inference_engine(&config)?, config.model().to_string());
            server::start_server(port, agents).await?;
        }

        Commands::Review { file, language, context, data_dir } => {
            let code = std::fs::read_to_string(&file)?;
            let language = language.unwrap_or_else(|| guess_language(&file));
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir());

            let agents = AgentDirectory::sqlite(data_dir, inference_engine(&config)?, config.model().to_string());
            let handle = agents.get(REVIEWER_NAME).await?;

            let spinner = Spinner::new(&format!("Reviewing {} ({}) with {}", file.display(), language, handle.agent.model()));
            let record = handle
                .agent
                .submit_review(ReviewRequest { code, language, context })
                .await?;
            spinner.finish_and_clear();

            ui::review(&record);
        }

        Commands::History { data_dir } => {
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir());
            // Listing history never reaches the model, so no endpoint is required
            let agents = AgentDirectory::sqlite(data_dir, Arc::new(Unconfigured), config.model().to_string());
            let handle = agents.get(REVIEWER_NAME).await?;

            ui::history(&handle.agent.history().await);
        }

        Commands::Suggest { pattern, data_dir } => {
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir());
            let agents = AgentDirectory::sqlite(data_dir, inference_engine(&config)?, config.model().to_string());
            let handle = agents.get(REVIEWER_NAME).await?;

            let spinner = Spinner::new(&format!("Looking for reviews of code containing {:?}", pattern));
            let suggestions = handle.agent.suggestions(&pattern).await;
            spinner.finish_and_clear();

            ui::suggestions(&pattern, suggestions.as_deref());
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &CodecriticConfig::starter(), force)?;
            ui::config_written(&path);
        }
    }

    Ok(())
}

fn inference_engine(config: &CodecriticConfig) -> anyhow::Result<Arc<dyn InferenceEngine>> {
    let engine = HttpInference::from_config(&config.inference)
        .map_err(|e| anyhow::anyhow!("{} (run `codecritic init` and edit the [inference] section)", e))?;
    Ok(Arc::new(engine))
}

fn guess_language(path: &Path) -> String {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    let language = match ext {
        "rs" => "Rust",
        "py" => "Python",
        "js" | "mjs" | "cjs" => "JavaScript",
        "ts" | "tsx" => "TypeScript",
        "go" => "Go",
        "java" => "Java",
        "c" | "h" => "C",
        "cc" | "cpp" | "hpp" => "C++",
        "rb" => "Ruby",
        "sql" => "SQL",
        "" => "text",
        other => other,
    };
    language.to_string()
}
