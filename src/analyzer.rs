use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::checks::{self, CheckOutcome, Finding};
use crate::document::Document;
use crate::error::AnalyzeError;
use crate::keywords::Keywords;
use crate::render::{PageRenderer, RenderOptions};
use crate::types::{PageSnapshot, Report, ScanResults};

/// Turns a page snapshot into a compliance report.
///
/// Holds no mutable state; one analyzer can serve any number of pages.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    keywords: Arc<Keywords>,
}

struct ReportBuilder {
    scan_results: ScanResults,
    score: u32,
    summary: Vec<String>,
}

impl ReportBuilder {
    fn new() -> Self {
        Self {
            scan_results: ScanResults::default(),
            score: 0,
            summary: Vec::new(),
        }
    }

    fn record<T>(&mut self, outcome: CheckOutcome<T>) -> T {
        self.score += outcome.points;
        self.summary.extend(outcome.findings.iter().map(Finding::to_string));
        outcome.result
    }

    fn finish(self, url: &Url) -> Report {
        Report {
            url: url.to_string(),
            scan_results: self.scan_results,
            compliance_score: self.score,
            summary: self.summary,
            error: None,
        }
    }
}

impl Analyzer {
    pub fn new(keywords: Keywords) -> Self {
        Self {
            keywords: Arc::new(keywords),
        }
    }

    /// Run all checks in order: cookies, banner, buttons, policy link.
    ///
    /// A malformed document fails the whole run; no partial results survive.
    #[instrument(skip_all, fields(url = %url))]
    pub fn try_analyze(&self, url: &Url, snapshot: &PageSnapshot) -> Result<Report, AnalyzeError> {
        let kw = &*self.keywords;
        let mut report = ReportBuilder::new();

        debug!(cookies = snapshot.cookies.len(), "checking initial cookies");
        let cookies = report.record(checks::initial_cookies(&snapshot.cookies, kw));
        report.scan_results.initial_cookies_check = Some(cookies);

        debug!(bytes = snapshot.html.len(), "parsing rendered page");
        let doc = Document::parse(&snapshot.html)?;

        let banner = report.record(checks::banner(&doc, kw));
        report.scan_results.cookie_banner_found = Some(banner.found);

        let buttons = report.record(checks::buttons(&doc, kw));
        report.scan_results.banner_buttons = Some(buttons);

        let policy = report.record(checks::policy_link(&doc, url, kw));
        report.scan_results.policy_link_found = Some(policy.found);
        report.scan_results.policy_link_url = policy.resolved_url;

        let report = report.finish(url);
        info!(score = report.compliance_score, "analysis complete");
        Ok(report)
    }

    /// Like [`Analyzer::try_analyze`], with failures folded into the
    /// report's `error` field.
    pub fn analyze(&self, url: &Url, snapshot: &PageSnapshot) -> Report {
        self.try_analyze(url, snapshot)
            .unwrap_or_else(|e| fail(url, e))
    }
}

fn fail(url: &Url, error: AnalyzeError) -> Report {
    warn!(%url, error = %error, "analysis failed");
    Report::failed(url.as_str(), error)
}

/// Renders a page and analyzes it.
pub struct Scanner<R> {
    renderer: R,
    analyzer: Analyzer,
    options: RenderOptions,
}

impl<R: PageRenderer> Scanner<R> {
    pub fn new(renderer: R, analyzer: Analyzer, options: RenderOptions) -> Self {
        Self {
            renderer,
            analyzer,
            options,
        }
    }

    pub async fn try_scan(&self, url: &Url) -> Result<Report, AnalyzeError> {
        info!(%url, "rendering page");
        let snapshot = self.renderer.render(url, &self.options).await?;
        self.analyzer.try_analyze(url, &snapshot)
    }

    /// Scan one page. Always returns a report; a failed render or a
    /// malformed page leaves `error` set and the score at zero.
    pub async fn scan(&self, url: &Url) -> Report {
        match self.try_scan(url).await {
            Ok(report) => report,
            Err(e) => fail(url, e),
        }
    }
}
