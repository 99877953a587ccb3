//! blockfetch CLI - resolve a game version and fill the local cache
//!
//! Usage:
//!   blockfetch                       Fetch the latest release client
//!   blockfetch --version snapshot    Fetch the latest snapshot client
//!   blockfetch --version 1.16.4      Fetch a pinned version
//!   blockfetch --server              Fetch the server jar instead of the client

use anyhow::{Context, Result};
use blockfetch::{Acquirer, Config, HttpFetcher, Request, output};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blockfetch")]
#[command(about = "Resolve a game version and materialize its artifacts into a local cache")]
struct Cli {
    /// Wanted version (e.g., release, snapshot, 1.16.4, 20w51a)
    #[arg(long = "version", default_value = "release")]
    version: String,

    /// Fetch the server jar instead of the client jar
    #[arg(long)]
    server: bool,

    /// Cache root (defaults to <config dir>/minecraft)
    #[arg(long, env = "BLOCKFETCH_ROOT")]
    root: Option<PathBuf>,

    /// Version catalog URL
    #[arg(long, env = "BLOCKFETCH_MANIFEST_URL", default_value = blockfetch::config::DEFAULT_MANIFEST_URL)]
    manifest_url: String,

    /// HTTP timeout in seconds (no timeout if unset)
    #[arg(long, env = "BLOCKFETCH_HTTP_TIMEOUT")]
    timeout: Option<u64>,

    /// Check SHA-1 digests of newly downloaded artifacts
    #[arg(long)]
    verify: bool,
}

fn main() {
    if let Err(e) = run() {
        output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let root = match cli.root {
        Some(root) => root,
        None => Config::default_root().context("Could not determine the user config directory")?,
    };
    std::fs::create_dir_all(root.join("versions"))
        .with_context(|| format!("Failed to create cache directory: {}", root.display()))?;

    let config = Config::new(root)
        .with_manifest_url(cli.manifest_url)
        .with_http_timeout_secs(cli.timeout)
        .with_verify_checksums(cli.verify);
    let fetcher = HttpFetcher::new(config.http_timeout);
    let acquirer = Acquirer::new(config, fetcher);

    output::info(&format!("Runtime: natives-{}", acquirer.platform()));

    let request = Request::new(&cli.version).server(cli.server);
    let acquired = acquirer
        .run(&request)
        .with_context(|| format!("Failed to acquire version '{}'", cli.version))?;

    let report = &acquired.report;
    if report.is_noop() {
        output::skip(&format!("{} already cached, nothing to do", acquired.id));
    } else {
        output::success(&format!(
            "{} ready: {} fetched, {} already present",
            acquired.id,
            report.fetched.len(),
            report.skipped
        ));
    }
    for failure in &report.failed_natives {
        output::warning(&format!("missing native library {}", failure.library));
    }
    if !report.unresolved.is_empty() {
        output::detail(&format!(
            "{} libraries have no artifact for this platform",
            report.unresolved.len()
        ));
    }

    Ok(())
}
