use serde::{Deserialize, Serialize};

/// A cookie as reported by the page renderer. Only `name` feeds the checks;
/// the rest is kept for the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
            path: "/".to_string(),
            secure: false,
            http_only: false,
        }
    }
}

/// What a renderer hands to the analyzer: the cookie jar captured after the
/// settle delay and the rendered HTML.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub cookies: Vec<Cookie>,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialCookieCheck {
    #[serde(rename = "cookies_found_on_load")]
    pub count: usize,
    #[serde(rename = "non_essential_cookies_likely_present")]
    pub has_non_essential: bool,
    #[serde(rename = "details")]
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerCheck {
    pub found: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonCheck {
    #[serde(rename = "accept_button_found")]
    pub accept_found: bool,
    #[serde(rename = "reject_button_found")]
    pub reject_found: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyLinkCheck {
    pub found: bool,
    pub resolved_url: Option<String>,
}

/// Per-check results in check order. Field order is the JSON key order.
/// Every field is `None` for a failed run, which serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_cookies_check: Option<InitialCookieCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_banner_found: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_buttons: Option<ButtonCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_link_found: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_link_url: Option<String>,
}

impl ScanResults {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// The compliance report for one page.
///
/// Substring keyword matching is a heuristic: a keyword such as `ok` also
/// matches inside unrelated words ("book", "token"), so a `true` flag is a
/// signal for a human auditor, not a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub url: String,
    pub scan_results: ScanResults,
    pub compliance_score: u32,
    pub summary: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    /// A report for a run that could not be completed. Nothing from a
    /// partially completed analysis is carried over.
    pub fn failed(url: &str, error: impl std::fmt::Display) -> Self {
        Self {
            url: url.to_string(),
            scan_results: ScanResults::default(),
            compliance_score: 0,
            summary: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
