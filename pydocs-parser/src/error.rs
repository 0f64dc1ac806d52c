use thiserror::Error;

use crate::html::HtmlTag;

/// Structural failures raised while walking a page.
///
/// A missing tag means the target site no longer matches the layout the
/// extractors expect, so it is never recovered locally: it aborts the
/// current extractor run.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("tag <{tag}> not found (filter: {filter})")]
    TagNotFound { tag: HtmlTag, filter: String },
}

impl ParserError {
    pub fn tag_not_found(tag: HtmlTag, filter: impl Into<String>) -> Self {
        let err = ParserError::TagNotFound {
            tag,
            filter: filter.into(),
        };
        tracing::error!("{}", err);
        err
    }
}
