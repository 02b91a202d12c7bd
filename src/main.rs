use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use opml2feedlist::cli::Args;
use opml2feedlist::config::Config;
use opml2feedlist::pipeline;

/// Loads the config named on the command line, or the default one.
///
/// An explicitly named file must exist and parse. Problems with the default
/// location only produce a warning.
fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Config::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()));
    }

    let Some(path) = Config::default_path() else {
        return Ok(Config::default());
    };
    match Config::load(&path) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unusable config file");
            eprintln!("Warning: ignoring {}: {}", path.display(), e);
            Ok(Config::default())
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let run = args.into_run_config(&config);
    tracing::debug!(?run, "Starting conversion");

    let summary = pipeline::convert(&run, Path::new(""), |progress| {
        if progress.is_warning() {
            eprintln!("{}", progress);
        } else {
            println!("{}", progress);
        }
    })
    .await?;

    println!(
        "\n✓ Converted {} unique feeds to {}",
        summary.unique_count,
        summary.output_path.display()
    );
    println!("\n✓ Done! Ready to use with rssfeedz.");
    println!("  Copy {} to ~/rssfeedz/feedlist.txt", summary.output_path.display());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        tracing::error!(error = %format!("{:#}", e), "Conversion failed");
        eprintln!("\n✗ Error: {:#}", e);
        std::process::exit(1);
    }
}
