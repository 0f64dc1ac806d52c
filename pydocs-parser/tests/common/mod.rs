//! Shared fixtures for the pipeline tests

#![allow(dead_code)]

use pydocs_parser::config::ParserConfig;
use pydocs_parser::http::{Fetcher, ResponseCache};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Address nothing listens on; requests to it fail at the transport level
pub const DEAD_URL: &str = "http://127.0.0.1:9";

pub struct TestEnv {
    pub server: MockServer,
    pub config: ParserConfig,
    pub fetcher: Fetcher,
    _temp_dir: TempDir,
}

impl TestEnv {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();

        let config = ParserConfig {
            main_doc_url: format!("{}/3/", server.uri()),
            peps_url: format!("{}/peps/", server.uri()),
            cache_dir: temp_dir.path().join("cache"),
            downloads_dir: temp_dir.path().join("downloads"),
            results_dir: temp_dir.path().join("results"),
            request_timeout_secs: 5,
            ..ParserConfig::default()
        };

        let cache = ResponseCache::open(&config.cache_dir).await.unwrap();
        let fetcher = Fetcher::new(&config, cache).unwrap();

        Self {
            server,
            config,
            fetcher,
            _temp_dir: temp_dir,
        }
    }

    pub async fn page(&self, at: &str, body: impl Into<String>) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(200).set_body_string(body.into()))
            .mount(&self.server)
            .await;
    }

    /// Like [`TestEnv::page`] but asserts how often the page is requested.
    pub async fn page_expect(&self, at: &str, body: impl Into<String>, times: u64) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(200).set_body_string(body.into()))
            .expect(times)
            .mount(&self.server)
            .await;
    }
}

pub fn whats_new_index(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .map(|href| format!(r#"<li class="toctree-l1"><a class="reference internal" href="{href}">{href}</a></li>"#))
        .collect();
    format!(
        r#"<html><body><section id="what-s-new-in-python"><h1>What's New in Python</h1>
           <div class="toctree-wrapper compound"><ul>{items}</ul></div></section></body></html>"#
    )
}

pub fn whats_new_article(title: &str, editor: Option<&str>) -> String {
    let dl = editor
        .map(|e| format!("<dl class=\"field-list simple\"><dt>Editor</dt>\n<dd>{e}</dd></dl>"))
        .unwrap_or_default();
    format!("<html><body><section><h1>{title}</h1>{dl}<p>body</p></section></body></html>")
}

/// PEP index with one row per `(abbr, href)`
pub fn pep_index(rows: &[(&str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(abbr, href)| {
            format!(
                r#"<tr><td><abbr>{abbr}</abbr></td><td><a class="pep reference internal" href="{href}">{href}</a></td></tr>"#
            )
        })
        .collect();
    format!(
        r#"<html><body><section id="numerical-index"><table class="pep-zero-table docutils">
           <thead><tr><th>Type</th><th>PEP</th></tr></thead><tbody>{body}</tbody></table></section></body></html>"#
    )
}

pub fn pep_page(status: &str) -> String {
    format!(
        r#"<html><body><dl class="rfc2822 field-list simple">
           <dt class="field-odd">Author<span class="colon">:</span></dt><dd class="field-odd">Someone</dd>
           <dt class="field-even">Status<span class="colon">:</span></dt>
           <dd class="field-even"><abbr>{status}</abbr></dd></dl></body></html>"#
    )
}
