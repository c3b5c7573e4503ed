use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use url::Url;

use crate::keywords::Keywords;
use crate::render::{RenderOptions, DEFAULT_USER_AGENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererKind {
    /// Headless Chromium; sees script-set cookies and injected banners.
    Chrome,
    /// Plain HTTP GET; static HTML and `Set-Cookie` headers only.
    Fetch,
}

/// Heuristic cookie-consent check for a single page.
#[derive(Parser, Debug)]
#[command(name = "consent-scan", version, about)]
pub struct Cli {
    /// Page to inspect.
    pub url: Url,

    #[arg(long, value_enum, env = "CONSENT_SCAN_RENDERER", default_value = "chrome")]
    pub renderer: RendererKind,

    /// Page load timeout in seconds.
    #[arg(long, env = "CONSENT_SCAN_LOAD_TIMEOUT", default_value_t = 20)]
    pub load_timeout: u64,

    /// Seconds to wait after load before reading cookies and the DOM.
    #[arg(long, env = "CONSENT_SCAN_SETTLE_DELAY", default_value_t = 3)]
    pub settle_delay: u64,

    #[arg(long, env = "CONSENT_SCAN_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Path to a Chrome/Chromium binary; autodetected when unset.
    #[arg(long, env = "CONSENT_SCAN_CHROME")]
    pub chrome: Option<PathBuf>,

    /// TOML file replacing the built-in keyword lists.
    #[arg(long, env = "CONSENT_SCAN_KEYWORDS")]
    pub keywords: Option<PathBuf>,

    #[arg(long, env = "CONSENT_SCAN_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Don't print the report to stdout.
    #[arg(long, short)]
    pub quiet: bool,
}

impl Cli {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            load_timeout: Duration::from_secs(self.load_timeout),
            settle_delay: Duration::from_secs(self.settle_delay),
            user_agent: self.user_agent.clone(),
            ..RenderOptions::default()
        }
    }

    pub fn load_keywords(&self) -> Result<Keywords> {
        match &self.keywords {
            Some(path) => Keywords::from_toml_file(path),
            None => Ok(Keywords::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["consent-scan", "https://example.com/"]).unwrap();
        assert_eq!(cli.renderer, RendererKind::Chrome);
        let opts = cli.render_options();
        assert_eq!(opts.load_timeout, Duration::from_secs(20));
        assert_eq!(opts.settle_delay, Duration::from_secs(3));
        assert_eq!(opts.window_size, (1920, 1080));
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "consent-scan",
            "--renderer",
            "fetch",
            "--settle-delay",
            "0",
            "--quiet",
            "https://example.com/",
        ])
        .unwrap();
        assert_eq!(cli.renderer, RendererKind::Fetch);
        assert!(cli.render_options().settle_delay.is_zero());
        assert!(cli.quiet);
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(Cli::try_parse_from(["consent-scan", "not a url"]).is_err());
    }
}
