mod display;
mod input;

use std::io::Write as _;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use seasaw_core::STANDARD_TAXONOMY;
use seasaw_core::presets::{PRESET_SERVICES, preset};
use seasaw_oracle::{OracleClient, OracleConfig};
use seasaw_session::AnalysisSession;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::Level;

use crate::display::render_lifecycle;
use crate::input::{Input, parse_input};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Parser)]
#[command(
    name = "seasaw",
    version,
    about = "Trust labels for Terms of Service and Privacy Policies"
)]
struct Cli {
    /// Base URL of the analysis backend [default: $BACKEND_URL or http://localhost:8000]
    #[arg(long)]
    backend_url: Option<String>,

    /// Give up on an analysis after this many seconds.
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,

    /// Log requests and state changes to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one service and print its trust label.
    Analyze {
        /// Service name, e.g. "Netflix".
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List the preset service names.
    Presets,
    /// Check that the backend is reachable.
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::INFO } else { Level::WARN })
        .init();
    tracing::info!("seasaw v{}", env!("CARGO_PKG_VERSION"));

    let timeout = Duration::from_secs(cli.timeout_secs);
    let config = match &cli.backend_url {
        Some(url) => OracleConfig::new(url),
        None => OracleConfig::from_env(),
    }
    .with_timeout(timeout);
    tracing::info!(backend = %config.base_url, timeout_secs = cli.timeout_secs, "configured");
    let client = OracleClient::new(config).context("building HTTP client")?;

    match cli.command {
        Some(Command::Presets) => {
            for (i, name) in PRESET_SERVICES.iter().enumerate() {
                println!("{:>2}  {}", i + 1, name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Health) => {
            let health = client
                .health()
                .await
                .with_context(|| format!("backend at {} is not healthy", client.base_url()))?;
            println!("status  {}", health.status);
            if !health.mode.is_empty() {
                println!("mode    {}", health.mode);
            }
            if !health.ollama.is_empty() {
                println!("llm     {}", health.ollama);
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Analyze { query }) => {
            let session = AnalysisSession::with_timeout(Arc::new(client), timeout);
            let query = query.join(" ");
            let handle = session
                .submit(&query)
                .with_context(|| format!("cannot analyze {query:?}"))?;
            wait_with_progress(&session, handle).await?;
            let lc = session.snapshot();
            print!("{}", render_lifecycle(&lc, &STANDARD_TAXONOMY));
            if lc.error().is_some() {
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let session = AnalysisSession::with_timeout(Arc::new(client), timeout);
            interactive(&session).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Prompt loop: search, presets, evidence toggles, reset.
async fn interactive(session: &AnalysisSession) -> anyhow::Result<()> {
    print!("{}", render_lifecycle(&session.snapshot(), &STANDARD_TAXONOMY));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\nseasaw> ");
        std::io::stdout().flush().context("flushing prompt")?;

        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            break;
        };

        match parse_input(&line) {
            Input::Quit => break,
            Input::Empty => {}
            Input::Help => {
                let mut out = String::new();
                let _ = display::write_welcome(&mut out);
                print!("{out}");
            }
            Input::Reset => {
                session.reset();
                print!("{}", render_lifecycle(&session.snapshot(), &STANDARD_TAXONOMY));
            }
            Input::Preset(n) => match preset(n) {
                Some(name) => run_query(session, name).await?,
                None => eprintln!("No preset :{n} (1-{})", PRESET_SERVICES.len()),
            },
            Input::Query(q) => run_query(session, &q).await?,
            Input::ToggleEvidence(id) => {
                session.toggle_evidence(&id);
                let lc = session.snapshot();
                match lc.report().map(|r| r.attribute(&id).is_some()) {
                    Some(false) => eprintln!("No attribute {id:?} in this report"),
                    Some(true) if STANDARD_TAXONOMY.category_of(&id).is_none() => {
                        eprintln!("{id:?} is outside every category and is not displayed")
                    }
                    _ => {}
                }
                print!("{}", render_lifecycle(&lc, &STANDARD_TAXONOMY));
            }
            Input::Unknown(cmd) => eprintln!("Unknown command {cmd:?}; :help lists commands"),
        }
    }

    Ok(())
}

async fn run_query(session: &AnalysisSession, query: &str) -> anyhow::Result<()> {
    match session.submit(query) {
        Ok(handle) => {
            wait_with_progress(session, handle).await?;
            print!("{}", render_lifecycle(&session.snapshot(), &STANDARD_TAXONOMY));
        }
        Err(e) => eprintln!("Nothing to analyze: {e}"),
    }
    Ok(())
}

/// Animate a spinner on stderr until the analysis task finishes.
async fn wait_with_progress(
    session: &AnalysisSession,
    mut handle: JoinHandle<()>,
) -> anyhow::Result<()> {
    let query = session.snapshot().active_query().unwrap_or_default().to_string();
    let mut ticker = tokio::time::interval(Duration::from_millis(100));
    let mut frame = 0usize;

    loop {
        tokio::select! {
            res = &mut handle => {
                eprint!("\r\x1b[2K");
                res.context("analysis task failed")?;
                return Ok(());
            }
            _ = ticker.tick() => {
                eprint!("\r{} Analyzing {query}...", SPINNER[frame % SPINNER.len()]);
                frame += 1;
            }
        }
    }
}
