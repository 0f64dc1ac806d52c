use pydocs_parser::cli::Cli;
use pydocs_parser::config::ParserConfig;
use pydocs_parser::http::{Fetcher, ResponseCache};
use pydocs_parser::module::run_mode;
use pydocs_parser::output::control_output;

use anyhow::Result;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = ParserConfig::load_or_default(&cli.config)?;

    // Initialize logging
    let _logging_guard = pydocs_parser::logging::init_logging(
        &config.log_dir,
        "pydocs-parser",
        &config.log_level,
        config.max_log_bytes,
        config.max_log_files,
    )?;

    tracing::info!("Parser started");
    tracing::info!("Command line arguments: {:?}", cli);

    let cache = ResponseCache::open(&config.cache_dir).await?;
    if cli.clear_cache {
        cache.clear().await?;
    }
    let fetcher = Fetcher::new(&config, cache)?;

    let results = match run_mode(cli.mode, &fetcher, &config).await {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("Parser mode '{}' failed: {:#}", cli.mode, e);
            return Err(e);
        }
    };

    if let Some(results) = results {
        control_output(&results, cli.output, cli.mode, &config)?;
    }

    tracing::info!("All jobs done");
    Ok(())
}
