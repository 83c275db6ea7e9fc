use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use papersum_core::SummarizationBackend;
use papersum_llm::{InferenceEndpoint, LocalBatchSummarizer, RemoteModelClient};
use papersum_pipeline::{PaperProcessor, output_path_for, run_batch};

mod output;
mod settings;

use output::ColorMode;
use settings::{BackendKind, Overrides, Settings};

/// Research paper summarizer - extract title, authors and a condensed summary
/// from PDF and Word documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize every PDF and Word document in a folder
    Run {
        /// Folder containing the papers (default: ./input)
        #[arg(short, long)]
        input_dir: Option<PathBuf>,

        /// Folder for the summary files (default: ./output)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        backend: BackendArgs,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Summarize a single PDF or Word document
    Summarize {
        /// Path to the document
        file_path: PathBuf,

        /// Summary file to write (default: <output_dir>/<name>_summary.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        backend: BackendArgs,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Dry run: print inferred metadata and chunk statistics without calling a model
    Inspect {
        /// Path to the document
        file_path: PathBuf,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[derive(Args, Debug, Default)]
struct BackendArgs {
    /// Summarizer backend (default: remote when an API key is set, else local)
    #[arg(long, value_enum)]
    backend: Option<BackendKind>,

    /// API key for the remote model (env: PAPERSUM_API_KEY or XAI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Base URL of the chat-completions API (env: PAPERSUM_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Remote model id (env: PAPERSUM_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Local inference endpoint (env: PAPERSUM_LOCAL_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Local summarization model id
    #[arg(long)]
    local_model: Option<String>,
}

impl BackendArgs {
    fn into_overrides(self, input_dir: Option<PathBuf>, output_dir: Option<PathBuf>) -> Overrides {
        Overrides {
            input_dir,
            output_dir,
            backend: self.backend,
            api_key: self.api_key,
            base_url: self.base_url,
            model: self.model,
            endpoint: self.endpoint,
            local_model: self.local_model,
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_settings(overrides: Overrides) -> Settings {
    let file = papersum_core::config_file::load_config();
    settings::resolve(overrides, &file, |key| std::env::var(key).ok())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            input_dir,
            output_dir,
            backend,
            no_color,
        } => {
            let settings = resolve_settings(backend.into_overrides(input_dir, output_dir));
            run(settings, ColorMode(!no_color)).await
        }
        Command::Summarize {
            file_path,
            output,
            backend,
            no_color,
        } => {
            let settings = resolve_settings(backend.into_overrides(None, None));
            summarize_one(&file_path, output, settings, ColorMode(!no_color)).await
        }
        Command::Inspect {
            file_path,
            no_color,
        } => {
            let settings = resolve_settings(Overrides::default());
            inspect(&file_path, &settings, ColorMode(!no_color))
        }
    }
}

fn build_backend(settings: &Settings) -> anyhow::Result<Arc<dyn SummarizationBackend>> {
    match settings.backend {
        BackendKind::Remote => {
            let remote = &settings.remote;
            let api_key = remote.api_key.clone().context(
                "remote backend needs an API key: set XAI_API_KEY or PAPERSUM_API_KEY, \
                 pass --api-key, or add api_key under [remote] in the config file",
            )?;
            let mut client =
                RemoteModelClient::new(api_key, remote.base_url.clone(), remote.model.clone());
            if let Some(prompt) = &remote.system_prompt {
                client = client.with_system_prompt(prompt.clone());
            }
            if let Some(timeout) = remote.timeout {
                client = client.with_timeout(timeout);
            }
            tracing::info!(model = %remote.model, base_url = %remote.base_url, "using remote backend");
            Ok(Arc::new(client))
        }
        BackendKind::Local => {
            let local = &settings.local;
            let mut endpoint = InferenceEndpoint::new(local.endpoint.clone(), local.model.clone());
            if let Some(timeout) = local.timeout {
                endpoint = endpoint.with_timeout(timeout);
            }
            tracing::info!(model = %local.model, endpoint = %local.endpoint, "using local backend");
            Ok(Arc::new(
                LocalBatchSummarizer::new(endpoint).with_chunker(settings.chunker),
            ))
        }
    }
}

async fn run(settings: Settings, color: ColorMode) -> anyhow::Result<ExitCode> {
    use indicatif::{ProgressBar, ProgressStyle};

    let input_dir = &settings.input_dir;
    let output_dir = &settings.output_dir;

    std::fs::create_dir_all(input_dir)
        .with_context(|| format!("cannot create input folder {}", input_dir.display()))?;
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("cannot create output folder {}", output_dir.display()))?;

    let inputs = papersum_ingest::collect_inputs(input_dir)
        .with_context(|| format!("cannot read input folder {}", input_dir.display()))?;

    let mut stdout = std::io::stdout();
    if inputs.is_empty() {
        output::print_no_inputs(&mut stdout, input_dir, color)?;
        return Ok(ExitCode::SUCCESS);
    }

    let processor = PaperProcessor::new(build_backend(&settings)?);

    let bar = ProgressBar::new(inputs.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:30.green/dim}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let report = run_batch(&processor, &inputs, output_dir, |event| {
        if let papersum_pipeline::BatchEvent::Processing { input, .. } = &event {
            bar.set_message(
                input
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );
        } else {
            bar.inc(1);
        }
        bar.suspend(|| {
            output::emit_event(&mut std::io::stdout(), &event, color);
        });
    })
    .await;
    bar.finish_and_clear();

    output::print_batch_summary(&mut stdout, &report, output_dir, color)?;

    Ok(if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn summarize_one(
    file_path: &Path,
    output: Option<PathBuf>,
    settings: Settings,
    color: ColorMode,
) -> anyhow::Result<ExitCode> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }

    let output = match output {
        Some(path) => path,
        None => {
            std::fs::create_dir_all(&settings.output_dir).with_context(|| {
                format!("cannot create output folder {}", settings.output_dir.display())
            })?;
            output_path_for(file_path, &settings.output_dir)
        }
    };

    let processor = PaperProcessor::new(build_backend(&settings)?);
    let mut stdout = std::io::stdout();

    match processor.process(file_path, &output).await {
        Ok(rendered) => {
            write!(stdout, "{rendered}")?;
            writeln!(stdout)?;
            output::print_event(
                &mut stdout,
                &papersum_pipeline::BatchEvent::Saved {
                    index: 0,
                    total: 1,
                    input: file_path.to_path_buf(),
                    output,
                },
                color,
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            output::print_event(
                &mut stdout,
                &papersum_pipeline::BatchEvent::Failed {
                    index: 0,
                    total: 1,
                    input: file_path.to_path_buf(),
                    reason: e.to_string(),
                },
                color,
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn inspect(file_path: &Path, settings: &Settings, color: ColorMode) -> anyhow::Result<ExitCode> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }

    let doc = papersum_ingest::extract_document(file_path)?;
    let metadata = papersum_parsing::infer_from_document(&doc);
    let chunks = settings.chunker.split(&doc.text());

    let mut stdout = std::io::stdout();
    output::print_inspection(
        &mut stdout,
        &doc,
        &metadata,
        &chunks,
        settings.chunker.min_words,
        color,
    )?;
    Ok(ExitCode::SUCCESS)
}
