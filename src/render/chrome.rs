use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::Cookie as CdpCookie;
use chromiumoxide::Page;
use futures::StreamExt;
use tracing::{debug, info, warn};
use url::Url;

use super::{ensure_http, PageRenderer, RenderOptions};
use crate::error::RenderError;
use crate::types::{Cookie, PageSnapshot};

/// Headless Chromium over the DevTools protocol.
///
/// Each render launches a fresh browser with an empty profile so the cookie
/// jar only holds what the page set on this visit.
#[derive(Debug, Clone, Default)]
pub struct ChromeRenderer {
    executable: Option<std::path::PathBuf>,
}

impl ChromeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executable(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            executable: Some(path.into()),
        }
    }

    fn browser_config(&self, options: &RenderOptions) -> Result<BrowserConfig, RenderError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(options.load_timeout)
            .args(launch_args(options));
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(RenderError::Launch)
    }

    async fn capture(page: &Page, url: &Url, options: &RenderOptions) -> Result<PageSnapshot, RenderError> {
        let load = async {
            page.goto(url.as_str()).await?;
            page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        };
        match tokio::time::timeout(options.load_timeout, load).await {
            Err(_) => return Err(RenderError::Timeout(options.load_timeout.as_secs())),
            Ok(Err(e)) => {
                return Err(RenderError::Navigation {
                    url: url.to_string(),
                    reason: e.to_string(),
                })
            }
            Ok(Ok(())) => {}
        }

        debug!(delay_ms = options.settle_delay.as_millis() as u64, "waiting for page to settle");
        tokio::time::sleep(options.settle_delay).await;

        let cookies = page.get_cookies().await?.into_iter().map(Cookie::from).collect();
        let html = page.content().await?;
        Ok(PageSnapshot { cookies, html })
    }
}

/// Extra Chromium flags: desktop window size and a realistic user agent so
/// the page renders as it would for a visitor.
fn launch_args(options: &RenderOptions) -> Vec<String> {
    let (width, height) = options.window_size;
    vec![
        "--disable-dev-shm-usage".to_string(),
        format!("--window-size={width},{height}"),
        format!("--user-agent={}", options.user_agent),
    ]
}

impl From<CdpCookie> for Cookie {
    fn from(c: CdpCookie) -> Self {
        Self {
            name: c.name,
            value: c.value,
            domain: c.domain,
            path: c.path,
            secure: c.secure,
            http_only: c.http_only,
        }
    }
}

#[async_trait]
impl PageRenderer for ChromeRenderer {
    async fn render(&self, url: &Url, options: &RenderOptions) -> Result<PageSnapshot, RenderError> {
        ensure_http(url)?;

        let config = self.browser_config(options)?;
        info!("launching headless browser");
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let result = match browser.new_page("about:blank").await {
            Ok(page) => Self::capture(&page, url, options).await,
            Err(e) => Err(RenderError::Session(e.to_string())),
        };

        if let Err(e) = browser.close().await {
            warn!(error = %e, "failed to close browser");
        }
        let _ = browser.wait().await;
        handle.abort();
        info!("browser closed");

        result
    }
}
