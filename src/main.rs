use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use twitter_video_downloader_lib::downloader::reference::is_valid_post_link;
use twitter_video_downloader_lib::logging::init_logging;
use twitter_video_downloader_lib::{DownloadOptions, Downloader, ExtractorConfig};

/// Download videos from Twitter/X links
#[derive(Debug, Parser)]
#[command(name = "twitter-video-dl", version, about)]
struct Cli {
    /// Twitter/X URL containing video, e.g. https://x.com/user/status/1234567890
    url: String,

    /// Output directory
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Video quality preference. Accepted for compatibility; the best
    /// available variant is always downloaded.
    #[arg(short, long, default_value = "highest")]
    quality: String,

    /// HTTP or SOCKS5 proxy for every request
    #[arg(long)]
    proxy: Option<String>,

    /// Per-request timeout in seconds (0 disables)
    #[arg(long)]
    timeout: Option<u32>,

    /// JSON config file (defaults to the user config dir when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only resolve the video and print its descriptor as JSON
    #[arg(long)]
    info: bool,

    /// Debug logging for this crate
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> Result<ExtractorConfig> {
    let mut config = match &cli.config {
        Some(path) => ExtractorConfig::from_file(path)?,
        None => match ExtractorConfig::default_path().filter(|p| p.exists()) {
            Some(path) => ExtractorConfig::from_file(&path)?,
            None => ExtractorConfig::default(),
        },
    };

    if cli.proxy.is_some() {
        config = config.with_proxy(cli.proxy.clone());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout((secs > 0).then_some(secs));
    }

    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    if !is_valid_post_link(&cli.url) {
        anyhow::bail!("Invalid Twitter/X URL. Please provide a valid tweet URL.");
    }

    if cli.quality != "highest" {
        debug!(quality = %cli.quality, "quality preference ignored, using best available");
    }

    let config = load_config(&cli)?;
    let downloader = Downloader::new(&config)?;

    if cli.info {
        let media = downloader.resolve(&cli.url).await?;
        let json = serde_json::to_string_pretty(&media).context("failed to encode descriptor")?;
        println!("{}", json);
        return Ok(());
    }

    let options = DownloadOptions {
        output_dir: cli.output.clone(),
    };
    let path = downloader.download(&cli.url, &options).await?;
    println!("Download completed: {}", path.display());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
