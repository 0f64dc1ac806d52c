mod common;

use common::{pep_index, pep_page, whats_new_article, whats_new_index, TestEnv, DEAD_URL};
use pydocs_parser::error::ParserError;
use pydocs_parser::html::HtmlTag;
use pydocs_parser::module::pep::{collect_statuses, ResultWarning};
use pydocs_parser::module::{download, latest_versions, pep, run_mode, whats_new, ParserMode};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn tag_not_found(err: &anyhow::Error) -> Option<HtmlTag> {
    match err.downcast_ref::<ParserError>() {
        Some(ParserError::TagNotFound { tag, .. }) => Some(*tag),
        None => None,
    }
}

// ============ PEP statuses ============

#[tokio::test]
async fn pep_tally_and_single_mismatch() {
    let env = TestEnv::start().await;
    env.page("/peps/", pep_index(&[("PA", "pep-0001/"), ("SD", "pep-0002/")])).await;
    env.page("/peps/pep-0001/", pep_page("Active")).await;
    env.page("/peps/pep-0002/", pep_page("Final")).await;

    let summary = collect_statuses(&env.fetcher, &env.config).await.unwrap().unwrap();
    assert_eq!(summary.processed, 2);
    assert_eq!(
        summary.warnings,
        vec![ResultWarning {
            status: "Final".to_string(),
            short_status: "D".to_string(),
            url: format!("{}/peps/pep-0002/", env.server.uri()),
        }]
    );

    let rows = pep::pep(&env.fetcher, &env.config).await.unwrap().unwrap();
    assert_eq!(
        rows,
        vec![
            row(&["Статус", "Количество"]),
            row(&["Active", "1"]),
            row(&["Final", "1"]),
            row(&["Итого", "2"]),
        ]
    );
}

#[tokio::test]
async fn pep_unknown_letter_is_logged_not_raised() {
    let env = TestEnv::start().await;
    env.page("/peps/", pep_index(&[("PX", "pep-0003/"), ("I", "pep-0004/")])).await;
    env.page("/peps/pep-0003/", pep_page("Final")).await;
    env.page("/peps/pep-0004/", pep_page("Draft")).await;

    let summary = collect_statuses(&env.fetcher, &env.config).await.unwrap().unwrap();
    assert!(summary.warnings.is_empty());
    assert_eq!(summary.tally.iter().collect::<Vec<_>>(), vec![("Final", 1), ("Draft", 1)]);
    assert_eq!(summary.unknown_codes, 1);
    assert_eq!(summary.processed, 2);
}

#[tokio::test]
async fn pep_unreachable_page_counts_as_empty_status() {
    let env = TestEnv::start().await;
    let dead = format!("{}/pep-0005/", DEAD_URL);
    env.page("/peps/", pep_index(&[("SF", dead.as_str()), ("IF", "pep-0006/")])).await;
    env.page("/peps/pep-0006/", pep_page("Final")).await;

    let summary = collect_statuses(&env.fetcher, &env.config).await.unwrap().unwrap();
    assert_eq!(summary.tally.iter().collect::<Vec<_>>(), vec![("", 1), ("Final", 1)]);
    assert_eq!(summary.warnings.len(), 1);
    assert_eq!(summary.warnings[0].url, dead);
}

#[tokio::test]
async fn pep_index_unreachable_yields_nothing() {
    let mut env = TestEnv::start().await;
    env.config.peps_url = format!("{}/", DEAD_URL);

    assert!(pep::pep(&env.fetcher, &env.config).await.unwrap().is_none());
}

#[tokio::test]
async fn pep_index_without_section_aborts() {
    let env = TestEnv::start().await;
    env.page("/peps/", "<html><body><table></table></body></html>").await;

    let err = pep::pep(&env.fetcher, &env.config).await.unwrap_err();
    assert_eq!(tag_not_found(&err), Some(HtmlTag::Section));
}

// ============ What's new ============

#[tokio::test]
async fn whats_new_collects_every_article() {
    let env = TestEnv::start().await;
    env.page("/3/whatsnew/", whats_new_index(&["3.13.html", "3.12.html"])).await;
    env.page("/3/whatsnew/3.13.html", whats_new_article("What's New In Python 3.13", Some("Thomas Wouters"))).await;
    env.page("/3/whatsnew/3.12.html", whats_new_article("What's New\nIn Python 3.12", Some("Adam Turner"))).await;

    let rows = whats_new::whats_new(&env.fetcher, &env.config).await.unwrap().unwrap();
    let base = env.server.uri();
    assert_eq!(
        rows,
        vec![
            row(&["Ссылка на статью", "Заголовок", "Редактор, Автор"]),
            row(&[&format!("{base}/3/whatsnew/3.13.html"), "What's New In Python 3.13", "Editor Thomas Wouters"]),
            row(&[&format!("{base}/3/whatsnew/3.12.html"), "What's New In Python 3.12", "Editor Adam Turner"]),
        ]
    );
}

#[tokio::test]
async fn whats_new_aborts_on_first_missing_dl() {
    let env = TestEnv::start().await;
    env.page("/3/whatsnew/", whats_new_index(&["3.13.html", "3.12.html"])).await;
    env.page_expect("/3/whatsnew/3.13.html", whats_new_article("What's New In Python 3.13", None), 1).await;
    env.page_expect("/3/whatsnew/3.12.html", whats_new_article("What's New In Python 3.12", None), 0).await;

    let err = whats_new::whats_new(&env.fetcher, &env.config).await.unwrap_err();
    assert_eq!(tag_not_found(&err), Some(HtmlTag::Dl));
}

#[tokio::test]
async fn whats_new_skips_unreachable_article() {
    let env = TestEnv::start().await;
    let dead = format!("{}/3.11.html", DEAD_URL);
    env.page("/3/whatsnew/", whats_new_index(&[dead.as_str(), "3.12.html"])).await;
    env.page("/3/whatsnew/3.12.html", whats_new_article("What's New In Python 3.12", Some("Adam Turner"))).await;

    let rows = whats_new::whats_new(&env.fetcher, &env.config).await.unwrap().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][1], "What's New In Python 3.12");
}

// ============ Latest versions ============

#[tokio::test]
async fn latest_versions_reads_sidebar() {
    let env = TestEnv::start().await;
    env.page(
        "/3/",
        r#"<html><body><div class="sphinxsidebarwrapper">
             <ul><li><a href="download.html">Download</a></li></ul>
             <ul><li><a href="https://docs.python.org/3.13/">Python 3.13 (stable)</a></li>
                 <li><a href="https://www.python.org/doc/versions/">All versions</a></li></ul>
           </div></body></html>"#,
    )
    .await;

    let rows = latest_versions::latest_versions(&env.fetcher, &env.config).await.unwrap().unwrap();
    assert_eq!(
        rows,
        vec![
            row(&["Ссылка на документацию", "Версия", "Статус"]),
            row(&["https://docs.python.org/3.13/", "3.13", "stable"]),
            row(&["https://www.python.org/doc/versions/", "All versions", ""]),
        ]
    );
}

#[tokio::test]
async fn latest_versions_without_all_versions_aborts() {
    let env = TestEnv::start().await;
    env.page("/3/", r#"<div class="sphinxsidebarwrapper"><ul><li>nothing</li></ul></div>"#).await;

    let err = latest_versions::latest_versions(&env.fetcher, &env.config).await.unwrap_err();
    assert_eq!(tag_not_found(&err), Some(HtmlTag::Ul));
}

// ============ Download ============

#[tokio::test]
async fn download_saves_pdf_a4_archive() {
    let env = TestEnv::start().await;
    env.page(
        "/3/download.html",
        r#"<table class="docutils"><tr>
             <td><a href="archives/python-3.13-docs-pdf-letter.zip">Letter</a></td>
             <td><a href="archives/python-3.13-docs-pdf-a4.zip">A4</a></td></tr></table>"#,
    )
    .await;
    env.page("/3/archives/python-3.13-docs-pdf-a4.zip", "PK-archive-bytes").await;

    let path = download::download(&env.fetcher, &env.config).await.unwrap().unwrap();
    assert_eq!(path, env.config.downloads_dir.join("python-3.13-docs-pdf-a4.zip"));
    assert_eq!(std::fs::read(&path).unwrap(), b"PK-archive-bytes");
}

#[tokio::test]
async fn download_mode_renders_nothing() {
    let env = TestEnv::start().await;
    env.page("/3/download.html", r#"<table class="docutils"><tr><td><a href="x-pdf-a4.zip">A4</a></td></tr></table>"#)
        .await;
    env.page("/3/x-pdf-a4.zip", "zip").await;

    let rows = run_mode(ParserMode::Download, &env.fetcher, &env.config).await.unwrap();
    assert!(rows.is_none());
    assert!(env.config.downloads_dir.join("x-pdf-a4.zip").exists());
}
