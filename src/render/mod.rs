//! Page renderers: the I/O side that produces a [`PageSnapshot`] for a URL.
//!
//! The analyzer never talks to the network. Timeouts, settle delay and
//! browser lifetime all live here.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::RenderError;
use crate::types::PageSnapshot;

mod chrome;
mod fetch;

pub use chrome::ChromeRenderer;
pub use fetch::FetchRenderer;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub load_timeout: Duration,
    /// Wait after load so script-injected consent banners and their cookies appear.
    pub settle_delay: Duration,
    pub user_agent: String,
    pub window_size: (u32, u32),
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            load_timeout: Duration::from_secs(20),
            settle_delay: Duration::from_secs(3),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            window_size: (1920, 1080),
        }
    }
}

#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Load `url` and capture cookies and rendered HTML after the settle delay,
    /// before any interaction with the page.
    async fn render(&self, url: &Url, options: &RenderOptions) -> Result<PageSnapshot, RenderError>;
}

#[async_trait]
impl<T: PageRenderer + ?Sized> PageRenderer for Box<T> {
    async fn render(&self, url: &Url, options: &RenderOptions) -> Result<PageSnapshot, RenderError> {
        (**self).render(url, options).await
    }
}

pub(crate) fn ensure_http(url: &Url) -> Result<(), RenderError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(RenderError::UnsupportedScheme(other.to_string())),
    }
}
