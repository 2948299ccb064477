//! Quire - extract a webmail conversation from a saved page
//!
//! Reads an HTML snapshot of a rendered conversation view, runs the thread
//! extraction pipeline over it and prints the transcript, the structured
//! thread, or the reply request a backend would receive.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use mailthread::{
    AnalyzeThreadRequest, ExtractorSettings, GenerateReplyRequest, StaticView, ThreadView,
    ViewKey, extract_thread, receiver_email,
};

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Extract a conversation thread from a saved webmail page")]
#[command(version)]
struct Cli {
    /// Saved HTML of the conversation view
    snapshot: PathBuf,

    /// Print the thread-analysis request body instead of the transcript
    #[arg(long, conflicts_with = "reply")]
    json: bool,

    /// Print the reply-generation request body instead of the transcript
    #[arg(long)]
    reply: bool,

    /// Custom instruction sent along with the reply request
    #[arg(long, requires = "reply")]
    prompt: Option<String>,

    /// Milliseconds to wait after expanding collapsed regions
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Location the page was saved from (used to identify the view)
    #[arg(long)]
    location: Option<String>,

    /// Persist the effective settings to the config directory
    #[arg(long)]
    save_settings: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let cli = Cli::parse();

    let mut settings = ExtractorSettings::load()?;
    if let Some(settle_ms) = cli.settle_ms {
        settings.settle_ms = settle_ms;
    }

    if cli.save_settings {
        settings.save()?;
        if let Some(path) = ExtractorSettings::default_settings_path() {
            info!("Saved extractor settings to {}", path.display());
        }
    }

    let html = std::fs::read_to_string(&cli.snapshot)
        .with_context(|| format!("Failed to read snapshot {:?}", cli.snapshot))?;

    let mut view = StaticView::new(&html);
    if let Some(location) = &cli.location {
        view = view.with_location(location);
    }

    let thread = extract_thread(&mut view, &settings).await?;

    let snapshot = view.snapshot()?;
    let view_key = ViewKey::resolve(&snapshot, view.location().as_deref())?;
    info!(
        "Extracted {} message(s) from view {} (\"{}\")",
        thread.message_count(),
        view_key,
        thread.subject
    );

    if cli.reply {
        let receiver = receiver_email(&snapshot)?;
        let request = GenerateReplyRequest::new(&thread, receiver.as_deref(), cli.prompt.as_deref());
        println!("{}", serde_json::to_string_pretty(&request)?);
    } else if cli.json {
        let request = AnalyzeThreadRequest::from_thread(&thread);
        println!("{}", serde_json::to_string_pretty(&request)?);
    } else if thread.is_empty() {
        println!("{}", thread.subject);
        println!("(no messages found)");
    } else {
        println!("{}", thread.subject);
        print!("{}", thread.transcript);
    }

    Ok(())
}
