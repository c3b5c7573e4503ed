//! The four consent checks.
//!
//! Each check is a pure function over already captured data and returns its
//! typed result, the points it earned and the summary lines it contributes.

use std::fmt;

use url::Url;

use crate::document::Document;
use crate::keywords::Keywords;
use crate::types::{BannerCheck, ButtonCheck, Cookie, InitialCookieCheck, PolicyLinkCheck};

pub const COOKIE_POINTS: u32 = 40;
pub const BANNER_POINTS: u32 = 15;
pub const ACCEPT_POINTS: u32 = 10;
pub const REJECT_POINTS: u32 = 25;
pub const POLICY_POINTS: u32 = 10;

pub const MAX_SCORE: u32 = COOKIE_POINTS + BANNER_POINTS + ACCEPT_POINTS + REJECT_POINTS + POLICY_POINTS;

/// Cookie count at or above which the jar is assumed to hold more than
/// strictly necessary session/CSRF cookies.
pub const ESSENTIAL_COOKIE_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Good,
    Info,
    Problem,
}

/// One human-readable line of the report summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn good(message: impl Into<String>) -> Self {
        Self { severity: Severity::Good, message: message.into() }
    }

    fn info(message: impl Into<String>) -> Self {
        Self { severity: Severity::Info, message: message.into() }
    }

    fn problem(message: impl Into<String>) -> Self {
        Self { severity: Severity::Problem, message: message.into() }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Good => "Good",
            Severity::Info => "Info",
            Severity::Problem => "Problem",
        };
        write!(f, "{prefix}: {}", self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome<T> {
    pub result: T,
    pub points: u32,
    pub findings: Vec<Finding>,
}

pub fn initial_cookies(cookies: &[Cookie], keywords: &Keywords) -> CheckOutcome<InitialCookieCheck> {
    let has_non_essential = cookies.iter().any(|c| keywords.is_tracking_cookie(&c.name));
    let count = cookies.len();
    let result = InitialCookieCheck {
        count,
        has_non_essential,
        names: cookies.iter().map(|c| c.name.clone()).collect(),
    };

    if !has_non_essential && count < ESSENTIAL_COOKIE_LIMIT {
        CheckOutcome {
            result,
            points: COOKIE_POINTS,
            findings: vec![Finding::good(
                "Non-essential cookies are likely not set before consent.",
            )],
        }
    } else {
        CheckOutcome {
            result,
            points: 0,
            findings: vec![Finding::problem(format!(
                "Tracking or analytics cookies appear to be set before consent. Found {count} cookies."
            ))],
        }
    }
}

pub fn banner(doc: &Document, keywords: &Keywords) -> CheckOutcome<BannerCheck> {
    let found = keywords.banner.matches(doc.body_text());
    let (points, finding) = if found {
        (BANNER_POINTS, Finding::info("Found a banner or text mentioning cookies."))
    } else {
        (0, Finding::problem("No explicit cookie banner found on the page."))
    };
    CheckOutcome {
        result: BannerCheck { found },
        points,
        findings: vec![finding],
    }
}

pub fn buttons(doc: &Document, keywords: &Keywords) -> CheckOutcome<ButtonCheck> {
    let clickables = doc.clickables();
    let accept_found = clickables.iter().any(|c| keywords.accept.matches(&c.text));
    let reject_found = clickables.iter().any(|c| keywords.reject.matches(&c.text));

    let mut points = 0;
    if accept_found {
        points += ACCEPT_POINTS;
    }
    let finding = if reject_found {
        points += REJECT_POINTS;
        Finding::good("Found a button to refuse or reject cookies.")
    } else {
        Finding::problem("No clear button to refuse non-essential cookies.")
    };

    CheckOutcome {
        result: ButtonCheck { accept_found, reject_found },
        points,
        findings: vec![finding],
    }
}

/// First anchor in document order whose text matches a policy keyword wins.
pub fn policy_link(doc: &Document, page_url: &Url, keywords: &Keywords) -> CheckOutcome<PolicyLinkCheck> {
    let resolved = doc
        .anchors()
        .iter()
        .find(|a| keywords.policy.matches(&a.text))
        .map(|a| resolve_href(page_url, &a.href));

    match resolved {
        Some(url) => CheckOutcome {
            findings: vec![Finding::good(format!("Found a link to the policy: {url}"))],
            result: PolicyLinkCheck { found: true, resolved_url: Some(url) },
            points: POLICY_POINTS,
        },
        None => CheckOutcome {
            result: PolicyLinkCheck { found: false, resolved_url: None },
            points: 0,
            findings: vec![Finding::problem("No link to a privacy or cookie policy found.")],
        },
    }
}

/// Join `href` against the page address; an href that cannot be joined is
/// reported as written.
fn resolve_href(base: &Url, href: &str) -> String {
    match base.join(href) {
        Ok(u) => u.to_string(),
        Err(_) => href.to_string(),
    }
}
