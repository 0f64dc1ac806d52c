///! PEP index and PEP page HTML parsing

use anyhow::Result;
use scraper::Html;

use super::types::PepIndexRow;
use crate::html::{element_text, find_all, find_tag, next_element_sibling, AttrFilter, HtmlTag};

const STATUS_TERM: &str = "Status:";

/// Data rows of the numerical index (the header row is dropped).
pub fn parse_index_rows(html: &str) -> Result<Vec<PepIndexRow>> {
    let document = Html::parse_document(html);
    let section = find_tag(document.root_element(), HtmlTag::Section, &AttrFilter::id("numerical-index"))?;

    let mut rows = Vec::new();
    for tr in find_all(section, HtmlTag::Tr, &AttrFilter::none()).into_iter().skip(1) {
        let abbr = find_tag(tr, HtmlTag::Abbr, &AttrFilter::none())?;
        // First letter is the PEP type, the rest is the status
        let short_status: String = element_text(abbr).chars().skip(1).collect();

        let link = find_tag(tr, HtmlTag::A, &AttrFilter::class("pep reference internal"))?;
        let href = link.value().attr("href").unwrap_or_default().to_string();

        rows.push(PepIndexRow { short_status, href });
    }
    Ok(rows)
}

/// Status field of a PEP page's header, or "" when the page has none.
pub fn parse_page_status(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let dl = find_tag(document.root_element(), HtmlTag::Dl, &AttrFilter::none())?;

    let status = find_all(dl, HtmlTag::Dt, &AttrFilter::none())
        .into_iter()
        .find(|dt| element_text(*dt).trim() == STATUS_TERM)
        .and_then(next_element_sibling)
        .map(|dd| element_text(dd).trim().to_string())
        .unwrap_or_default();

    Ok(status)
}
