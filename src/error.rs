use thiserror::Error;

/// Failures a page renderer can hand back instead of a snapshot.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("page load timed out after {0}s")]
    Timeout(u64),

    #[error("browser session error: {0}")]
    Session(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("http status {0}")]
    Status(u16),

    #[error("content-type not html: {0}")]
    NotHtml(String),
}

impl From<chromiumoxide::error::CdpError> for RenderError {
    fn from(e: chromiumoxide::error::CdpError) -> Self {
        Self::Session(e.to_string())
    }
}

/// Terminal conditions for one analysis run. Each check is total over a
/// well-formed document, so there are no per-check variants.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("could not extract the page body; the page may not have loaded correctly")]
    MalformedDocument,
}
