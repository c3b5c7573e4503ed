use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect::Policy, Client};
use tracing::{debug, info};
use url::Url;

use super::{ensure_http, PageRenderer, RenderOptions};
use crate::error::RenderError;
use crate::types::{Cookie, PageSnapshot};

/// Plain HTTP renderer: one GET, no JavaScript.
///
/// Cookies come from the final response's `Set-Cookie` headers, so anything
/// a consent script would set client-side is invisible here.
#[derive(Clone)]
pub struct FetchRenderer {
    http: Client,
}

impl FetchRenderer {
    pub fn new(options: &RenderOptions) -> Result<Self, RenderError> {
        let http = Client::builder()
            .user_agent(options.user_agent.as_str())
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .redirect(Policy::limited(8))
            .timeout(options.load_timeout)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl PageRenderer for FetchRenderer {
    async fn render(&self, url: &Url, options: &RenderOptions) -> Result<PageSnapshot, RenderError> {
        ensure_http(url)?;

        let res = self.http.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                RenderError::Timeout(options.load_timeout.as_secs())
            } else {
                RenderError::Http(e)
            }
        })?;

        let status = res.status();
        if !status.is_success() {
            return Err(RenderError::Status(status.as_u16()));
        }

        let ct = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !ct.to_lowercase().starts_with("text/html") {
            return Err(RenderError::NotHtml(ct));
        }

        let host = res.url().host_str().unwrap_or_default().to_string();
        let cookies: Vec<Cookie> = res
            .cookies()
            .map(|c| Cookie {
                name: c.name().to_string(),
                value: c.value().to_string(),
                domain: c.domain().unwrap_or(&host).trim_start_matches('.').to_string(),
                path: c.path().unwrap_or("/").to_string(),
                secure: c.secure(),
                http_only: c.http_only(),
            })
            .collect();

        // decoded with the charset from Content-Type, utf-8 when absent
        let html = res.text().await?;
        debug!(bytes = html.len(), cookies = cookies.len(), "fetched page");

        if !options.settle_delay.is_zero() {
            tokio::time::sleep(options.settle_delay).await;
        }
        info!(%url, "page fetched");

        Ok(PageSnapshot { cookies, html })
    }
}
