///! Latest Python versions
///!
///! Reads the "All versions" list from the documentation sidebar.

use anyhow::{Context, Result};
use regex::Regex;
use scraper::Html;

use super::{header, progress_bar, Row};
use crate::config::ParserConfig;
use crate::error::ParserError;
use crate::html::{element_text, find_all, find_tag, AttrFilter, HtmlTag};
use crate::http::Fetcher;

/// Matches "Python X.Y (status)" link captions
pub const VERSION_STATUS_PATTERN: &str = r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)";

const ALL_VERSIONS_MARKER: &str = "All versions";

pub const LATEST_VERSIONS_HEADER: [&str; 3] = ["Ссылка на документацию", "Версия", "Статус"];

/// One entry of the sidebar version list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionLink {
    pub link: String,
    pub version: String,
    pub status: String,
}

pub fn version_status_regex() -> Result<Regex> {
    Regex::new(VERSION_STATUS_PATTERN).context("Failed to compile version/status regex")
}

/// Split a link caption into `(version, status)`.
///
/// Captions that don't follow the "Python X.Y (status)" form are kept whole
/// as the version, with an empty status.
pub fn split_version_status(re: &Regex, text: &str) -> (String, String) {
    match re.captures(text) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (text.to_string(), String::new()),
    }
}

pub fn parse_version_links(html: &str, re: &Regex) -> Result<Vec<VersionLink>> {
    let document = Html::parse_document(html);

    let sidebar = find_tag(
        document.root_element(),
        HtmlTag::Div,
        &AttrFilter::class("sphinxsidebarwrapper"),
    )?;

    let list = find_all(sidebar, HtmlTag::Ul, &AttrFilter::none())
        .into_iter()
        .find(|ul| element_text(*ul).contains(ALL_VERSIONS_MARKER))
        .ok_or_else(|| {
            ParserError::tag_not_found(HtmlTag::Ul, format!("text contains \"{}\"", ALL_VERSIONS_MARKER))
        })?;

    let versions = find_all(list, HtmlTag::A, &AttrFilter::none())
        .into_iter()
        .map(|a| {
            let (version, status) = split_version_status(re, &element_text(a));
            VersionLink {
                link: a.value().attr("href").unwrap_or_default().to_string(),
                version,
                status,
            }
        })
        .collect();

    Ok(versions)
}

pub async fn latest_versions(fetcher: &Fetcher, config: &ParserConfig) -> Result<Option<Vec<Row>>> {
    let Some(response) = fetcher.fetch(&config.main_doc_url).await else {
        return Ok(None);
    };

    tracing::info!("Getting latest versions started");
    let re = version_status_regex()?;
    let versions = parse_version_links(&response.text, &re)?;

    let mut results = vec![header(&LATEST_VERSIONS_HEADER)];
    let progress = progress_bar(versions.len(), "Versions");
    for version in versions {
        results.push(vec![version.link, version.version, version.status]);
        progress.inc(1);
    }
    progress.finish_and_clear();

    tracing::info!("Getting latest versions finished");
    Ok(Some(results))
}
