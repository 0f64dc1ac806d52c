///! "What's New" articles
///!
///! Walks the what's-new index of the documentation and, for every release
///! listed there, pulls the article title and its editor/author block.

use anyhow::Result;
use scraper::Html;

use super::{header, join_url, progress_bar, Row};
use crate::config::ParserConfig;
use crate::error::ParserError;
use crate::html::{element_text, find_all, find_tag, flatten_lines, AttrFilter, HtmlTag};
use crate::http::Fetcher;

const WHATS_NEW_PATH: &str = "whatsnew/";

pub const WHATS_NEW_HEADER: [&str; 3] = ["Ссылка на статью", "Заголовок", "Редактор, Автор"];

/// Absolute links to every per-release article on the index page.
pub fn parse_version_links(html: &str, page_url: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);

    let main_section = find_tag(
        document.root_element(),
        HtmlTag::Section,
        &AttrFilter::id("what-s-new-in-python"),
    )?;
    let wrapper = find_tag(main_section, HtmlTag::Div, &AttrFilter::class("toctree-wrapper"))?;

    let mut links = Vec::new();
    for item in find_all(wrapper, HtmlTag::Li, &AttrFilter::class("toctree-l1")) {
        let anchor = find_tag(item, HtmlTag::A, &AttrFilter::none())?;
        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| ParserError::tag_not_found(HtmlTag::A, "{href}"))?;
        links.push(join_url(page_url, href)?);
    }
    Ok(links)
}

/// Title (`h1`) and editor/author block (`dl`) of one article.
pub fn parse_article(html: &str) -> Result<(String, String)> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let h1 = find_tag(root, HtmlTag::H1, &AttrFilter::none())?;
    let dl = find_tag(root, HtmlTag::Dl, &AttrFilter::none())?;

    Ok((flatten_lines(&element_text(h1)), flatten_lines(&element_text(dl))))
}

pub async fn whats_new(fetcher: &Fetcher, config: &ParserConfig) -> Result<Option<Vec<Row>>> {
    let whats_new_url = join_url(&config.main_doc_url, WHATS_NEW_PATH)?;
    let Some(response) = fetcher.fetch(&whats_new_url).await else {
        return Ok(None);
    };

    tracing::info!("Parsing news started");
    let links = parse_version_links(&response.text, &whats_new_url)?;
    tracing::info!("Found {} release articles", links.len());

    let mut results = vec![header(&WHATS_NEW_HEADER)];
    let progress = progress_bar(links.len(), "What's New");
    for link in &links {
        tracing::debug!("Reading {}", link);
        let fetched = fetcher.fetch(link).await;
        progress.inc(1);
        let Some(article) = fetched else {
            continue;
        };
        let (title, editors) = parse_article(&article.text)?;
        results.push(vec![link.clone(), title, editors]);
    }
    progress.finish_and_clear();

    tracing::info!("Parsing news finished");
    Ok(Some(results))
}
