///! Page extractors
///!
///! One extractor per parser mode. Each fetches its page(s) through the
///! shared [`Fetcher`], walks the known HTML structure and returns report
///! rows (header first), or `None` when there is nothing to render.

use anyhow::{Context, Result};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;
use std::fmt;

use crate::config::ParserConfig;
use crate::http::Fetcher;

pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod whats_new;

/// One output record. The first row of every report is its header.
pub type Row = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParserMode {
    /// Change-log articles for every Python release
    WhatsNew,
    /// Documentation links and status of each Python version
    LatestVersions,
    /// Download the PDF (A4) documentation archive
    Download,
    /// Tally PEP statuses and reconcile them with the index
    Pep,
}

impl ParserMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParserMode::WhatsNew => "whats-new",
            ParserMode::LatestVersions => "latest-versions",
            ParserMode::Download => "download",
            ParserMode::Pep => "pep",
        }
    }
}

impl fmt::Display for ParserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run the extractor selected by `mode`.
pub async fn run_mode(mode: ParserMode, fetcher: &Fetcher, config: &ParserConfig) -> Result<Option<Vec<Row>>> {
    match mode {
        ParserMode::WhatsNew => whats_new::whats_new(fetcher, config).await,
        ParserMode::LatestVersions => latest_versions::latest_versions(fetcher, config).await,
        ParserMode::Download => {
            download::download(fetcher, config).await?;
            Ok(None)
        }
        ParserMode::Pep => pep::pep(fetcher, config).await,
    }
}

/// Resolve `href` against `base` the way a browser would.
pub(crate) fn join_url(base: &str, href: &str) -> Result<String> {
    let base = Url::parse(base).with_context(|| format!("Invalid base URL: {}", base))?;
    let joined = base
        .join(href)
        .with_context(|| format!("Cannot resolve {} against {}", href, base))?;
    Ok(joined.to_string())
}

const PROGRESS_TEMPLATE: &str = "{msg} {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}<{eta_precise}]";

/// Console progress bar over `len` items of a long extractor loop.
pub(crate) fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    let style = ProgressStyle::with_template(PROGRESS_TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(len as u64).with_style(style).with_message(message)
}

pub(crate) fn header(cells: &[&str]) -> Row {
    cells.iter().map(|c| c.to_string()).collect()
}
