//! Blocking HTTP acquisition of forecast pages.

use anyhow::{Context, Result, anyhow, bail};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

/// Synchronous client for fetching forecast pages.
///
/// Timeouts and the redirect cap are fixed at construction. Transient
/// failures (network errors, HTTP 429 and 5xx) are retried with a short
/// fixed backoff before giving up; other error statuses fail fast.
#[derive(Debug, Clone)]
pub struct PageClient {
    http: HttpClient,
}

impl Default for PageClient {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("wxchart/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self { http }
    }
}

impl PageClient {
    /// Fetch a page and return its body as text.
    pub fn fetch_page(&self, url: &str) -> Result<String> {
        let mut last_err: Option<anyhow::Error> = None;
        for backoff_ms in [100u64, 300, 700] {
            match self.http.get(url).send() {
                Ok(r) if r.status().is_success() => {
                    return r
                        .text()
                        .with_context(|| format!("reading response body from {url}"));
                }
                Ok(r) if r.status().is_server_error() || r.status().as_u16() == 429 => {
                    last_err = Some(anyhow!("HTTP {}", r.status()));
                }
                Ok(r) => bail!("request failed with HTTP {}", r.status()),
                Err(e) => last_err = Some(e.into()),
            }
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        bail!("request failed after retries: {:?}", last_err)
    }
}
