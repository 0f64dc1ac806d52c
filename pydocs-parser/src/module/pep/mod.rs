///! PEP status report
///!
///! Walks the numerical PEP index, reads each PEP's own status field,
///! tallies the statuses and cross-checks them against the index letters.

mod parser;
mod reconciler;
mod types;

pub use parser::{parse_index_rows, parse_page_status};
pub use reconciler::{expected_statuses, reconcile, report_warnings, Reconciliation, StatusReconciler};
pub use types::{PepIndexRow, PepSummary, ResultWarning, StatusTally};

use anyhow::Result;

use super::{header, join_url, progress_bar, Row};
use crate::config::ParserConfig;
use crate::http::Fetcher;

pub const PEP_HEADER: [&str; 2] = ["Статус", "Количество"];
pub const TOTAL_LABEL: &str = "Итого";

/// Full status of one PEP; "" when there is no link or the page can't be fetched.
pub async fn fetch_page_status(fetcher: &Fetcher, url: Option<&str>) -> Result<String> {
    let Some(url) = url else {
        return Ok(String::new());
    };
    match fetcher.fetch(url).await {
        Some(response) => parse_page_status(&response.text),
        None => Ok(String::new()),
    }
}

/// One pass over the index. `None` when the index page can't be fetched.
pub async fn collect_statuses(fetcher: &Fetcher, config: &ParserConfig) -> Result<Option<PepSummary>> {
    let Some(response) = fetcher.fetch(&config.peps_url).await else {
        return Ok(None);
    };

    tracing::info!("Parsing PEP statuses started");
    let rows = parse_index_rows(&response.text)?;
    let processed = rows.len();

    let mut tally = StatusTally::new();
    let mut reconciler = StatusReconciler::new();

    let progress = progress_bar(processed, "PEP");
    for row in &rows {
        let url = if row.href.is_empty() {
            None
        } else {
            Some(join_url(&config.peps_url, &row.href)?)
        };
        tracing::debug!("Checking {}", url.as_deref().unwrap_or("<no link>"));

        let status = fetch_page_status(fetcher, url.as_deref()).await?;
        tally.add(&status);
        reconciler.check(&row.short_status, &status, url.as_deref().unwrap_or_default());
        progress.inc(1);
    }
    progress.finish_and_clear();

    let unknown_codes = reconciler.unknown_codes();
    if unknown_codes > 0 {
        tracing::warn!("{} PEPs had a status letter outside the expected-status table", unknown_codes);
    }

    tracing::info!("Parsing PEP statuses finished");
    Ok(Some(PepSummary {
        tally,
        warnings: reconciler.into_warnings(),
        processed,
        unknown_codes,
    }))
}

impl PepSummary {
    /// Report rows: header, one row per status, then the total.
    ///
    /// The total is the number of index rows processed. It is kept separate
    /// from the tally sum and a disagreement between the two is logged.
    pub fn to_rows(&self) -> Vec<Row> {
        let mut results = vec![header(&PEP_HEADER)];
        results.extend(
            self.tally
                .iter()
                .map(|(status, count)| vec![status.to_string(), count.to_string()]),
        );

        let tallied = self.tally.total();
        if tallied != self.processed {
            tracing::warn!(
                "Tally sum ({}) differs from the number of processed PEPs ({})",
                tallied,
                self.processed
            );
        }
        results.push(vec![TOTAL_LABEL.to_string(), self.processed.to_string()]);
        results
    }
}

pub async fn pep(fetcher: &Fetcher, config: &ParserConfig) -> Result<Option<Vec<Row>>> {
    let Some(summary) = collect_statuses(fetcher, config).await? else {
        return Ok(None);
    };
    report_warnings(&summary.warnings);
    Ok(Some(summary.to_rows()))
}
