use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use digest_aggregator::{
    build_client, build_digest, fetch_all_items, load_sent_urls, load_sources, normalize_url,
    require_env, run_pipeline, save_digest_markdown, save_sent_urls, AnthropicLlm, DigestOptions,
    EmailSender, PipelineConfig,
};

/// Assemble and email the periodic AI/ML/DS digest.
#[derive(Debug, Parser)]
#[command(name = "digest-aggregator", version, about)]
struct Cli {
    /// Sources definition: RSS feeds, Hacker News queries, subreddits.
    #[arg(long, default_value = "config/sources.yaml")]
    sources: PathBuf,

    /// Manually curated links, one URL per line.
    #[arg(long, default_value = "config/links.md")]
    links: PathBuf,

    /// Sent-URL history file.
    #[arg(long, default_value = "data/sent-urls.json")]
    history: PathBuf,

    /// Directory for the Markdown copy of each digest.
    #[arg(long, default_value = "data/digests")]
    digests_dir: PathBuf,

    /// Candidate cap ahead of the LLM stage; 0 disables the cap.
    #[arg(long, default_value_t = 30)]
    limit: usize,

    /// Articles in the final digest.
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// Items older than this many days are dropped as stale.
    #[arg(long, default_value_t = 90)]
    max_age_days: i64,

    /// HTTP timeout per request, in seconds.
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    /// Print the candidate list without calling the LLM or sending email.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Digest run failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let sources_config = load_sources(&cli.sources)?;
    let client = build_client(cli.timeout)?;

    let sent_urls = load_sent_urls(&cli.history);
    info!("Loaded {} sent URLs from history", sent_urls.len());

    let raw_items = fetch_all_items(&client, &sources_config, &cli.links).await;
    info!("Fetched {} raw items across all sources", raw_items.len());

    let options = DigestOptions {
        pipeline: PipelineConfig {
            prefilter_limit: (cli.limit > 0).then_some(cli.limit),
            max_age_days: cli.max_age_days,
        },
        top_n: cli.top,
    };

    if cli.dry_run {
        let candidates = run_pipeline(raw_items, &sent_urls, &options.pipeline);
        info!("Dry run: {} candidates", candidates.len());
        for item in &candidates {
            println!("[{}] {} {}", item.source, item.title, item.url);
        }
        return Ok(());
    }

    let to = require_env("DIGEST_EMAIL_TO")?;
    let llm = AnthropicLlm::from_env()?;
    let sender = EmailSender::from_env()?;

    let top_items = build_digest(raw_items, &sent_urls, &llm, &options).await?;
    if top_items.is_empty() {
        info!("No candidates for the digest; skipping send");
        return Ok(());
    }

    sender.send_digest(&to, &top_items).await?;
    info!("Sent digest to {} with {} items", to, top_items.len());

    // History is committed only after a successful send.
    let mut sent_urls = load_sent_urls(&cli.history);
    for entry in &top_items {
        sent_urls.insert(normalize_url(&entry.item.url));
    }
    save_sent_urls(&cli.history, &sent_urls)?;
    info!("History updated at {}", cli.history.display());

    let archive = save_digest_markdown(&top_items, &cli.digests_dir)?;
    info!("Digest archived at {}", archive.display());

    Ok(())
}
