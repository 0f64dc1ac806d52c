///! Documentation archive download
///!
///! Finds the PDF (A4) archive on the downloads page and saves it under the
///! configured downloads directory.

use anyhow::{Context, Result};
use regex::Regex;
use scraper::Html;
use std::path::PathBuf;
use tokio::fs;

use super::join_url;
use crate::config::ParserConfig;
use crate::html::{find_first_by, find_tag, AttrFilter, HtmlTag};
use crate::http::Fetcher;

const DOWNLOAD_PATH: &str = "download.html";

/// Matches the href of the PDF (A4) archive
pub const PDF_A4_PATTERN: &str = r".+pdf-a4\.zip$";

/// Href of the PDF (A4) archive link inside the downloads table.
pub fn parse_archive_href(html: &str) -> Result<String> {
    let re = Regex::new(PDF_A4_PATTERN).context("Failed to compile archive regex")?;
    let document = Html::parse_document(html);

    let table = find_tag(document.root_element(), HtmlTag::Table, &AttrFilter::class("docutils"))?;
    let link = find_first_by(table, HtmlTag::A, &format!("{{href=~/{}/}}", PDF_A4_PATTERN), |a| {
        a.value().attr("href").is_some_and(|href| re.is_match(href))
    })?;

    Ok(link.value().attr("href").unwrap_or_default().to_string())
}

/// Last path segment of `url`, used as the local file name.
pub fn archive_filename(url: &str) -> Option<&str> {
    url.rsplit('/').next().filter(|name| !name.is_empty())
}

/// Download the archive. Returns where it was saved, or `None` when the
/// downloads page could not be fetched.
pub async fn download(fetcher: &Fetcher, config: &ParserConfig) -> Result<Option<PathBuf>> {
    let downloads_url = join_url(&config.main_doc_url, DOWNLOAD_PATH)?;
    let Some(response) = fetcher.fetch(&downloads_url).await else {
        return Ok(None);
    };

    let href = parse_archive_href(&response.text)?;
    let archive_url = join_url(&downloads_url, &href)?;
    let filename = archive_filename(&archive_url)
        .with_context(|| format!("Archive URL has no file name: {}", archive_url))?;

    fs::create_dir_all(&config.downloads_dir)
        .await
        .with_context(|| format!("Failed to create downloads directory {:?}", config.downloads_dir))?;
    let archive_path = config.downloads_dir.join(filename);

    let content = fetcher.fetch_bytes(&archive_url).await?;
    fs::write(&archive_path, &content)
        .await
        .with_context(|| format!("Failed to write archive {:?}", archive_path))?;

    tracing::info!("Archive downloaded and saved: {:?}", archive_path);
    Ok(Some(archive_path))
}
