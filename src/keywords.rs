//! Keyword configuration for the text checks.
//!
//! Matching is plain substring search over lower-cased text, not tokenized,
//! so short terms can hit inside unrelated words. A `Keywords` value is
//! built once and shared read-only by every analysis.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordRole {
    Banner,
    Accept,
    Reject,
    Policy,
}

#[derive(Debug, Clone)]
pub struct KeywordSet {
    role: KeywordRole,
    terms: Vec<String>,
}

impl KeywordSet {
    /// Terms are lower-cased but otherwise kept as written, so padding such
    /// as `" ok "` narrows a match on purpose. Blank terms are dropped.
    pub fn new<I, S>(role: KeywordRole, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().to_lowercase())
            .filter(|t| !t.trim().is_empty())
            .collect();
        Self { role, terms }
    }

    pub fn role(&self) -> KeywordRole {
        self.role
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// `haystack` must already be lower-cased.
    pub fn matches(&self, haystack: &str) -> bool {
        self.terms.iter().any(|t| haystack.contains(t.as_str()))
    }
}

const BANNER: &[&str] = &["cookie", "consent", "privacy", "gdpr", "рекомендації", "файли cookie"];
const ACCEPT: &[&str] = &["accept", "agree", "ok", "allow all", "прийняти", "погоджуюсь", "дозволити всі"];
const REJECT: &[&str] = &["reject", "decline", "deny", "necessary only", "відхилити", "відмовитись"];
const POLICY: &[&str] = &[
    "privacy & cookies",
    "privacy policy",
    "cookie policy",
    "політика приватності",
    "політика конфіденційності",
    "умови використання сайту",
    "політика cookie",
    "угода користувача",
    "персональні дані",
];
const TRACKING_COOKIES: &[&str] = &["ga", "fbp", "analytics"];

/// The full keyword configuration injected into the analyzer.
#[derive(Debug, Clone)]
pub struct Keywords {
    pub banner: KeywordSet,
    pub accept: KeywordSet,
    pub reject: KeywordSet,
    pub policy: KeywordSet,
    /// Cookie-name substrings of analytics and ad-network tools.
    pub tracking_cookies: Vec<String>,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            banner: KeywordSet::new(KeywordRole::Banner, BANNER),
            accept: KeywordSet::new(KeywordRole::Accept, ACCEPT),
            reject: KeywordSet::new(KeywordRole::Reject, REJECT),
            policy: KeywordSet::new(KeywordRole::Policy, POLICY),
            tracking_cookies: lowered(TRACKING_COOKIES),
        }
    }
}

#[derive(Debug, Deserialize)]
struct KeywordsFile {
    banner: Vec<String>,
    accept: Vec<String>,
    reject: Vec<String>,
    policy: Vec<String>,
    tracking_cookies: Option<Vec<String>>,
}

impl Keywords {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let file: KeywordsFile = toml::from_str(src).context("invalid keyword file")?;
        let keywords = Self {
            banner: KeywordSet::new(KeywordRole::Banner, &file.banner),
            accept: KeywordSet::new(KeywordRole::Accept, &file.accept),
            reject: KeywordSet::new(KeywordRole::Reject, &file.reject),
            policy: KeywordSet::new(KeywordRole::Policy, &file.policy),
            tracking_cookies: match file.tracking_cookies {
                Some(t) => lowered(t.as_slice()),
                None => lowered(TRACKING_COOKIES),
            },
        };
        keywords.ensure_disjoint()?;
        Ok(keywords)
    }

    /// Each term may belong to one role only; a shared term would let one
    /// element score in two checks.
    pub fn ensure_disjoint(&self) -> Result<()> {
        let sets = [&self.banner, &self.accept, &self.reject, &self.policy];
        for (i, set) in sets.iter().enumerate() {
            for other in &sets[i + 1..] {
                if let Some(term) = set.terms().iter().find(|t| other.terms().contains(*t)) {
                    bail!(
                        "keyword {term:?} is listed under both {:?} and {:?}",
                        set.role(),
                        other.role()
                    );
                }
            }
        }
        Ok(())
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read keyword file {}", path.display()))?;
        Self::from_toml_str(&src)
    }

    pub fn is_tracking_cookie(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.tracking_cookies.iter().any(|t| name.contains(t.as_str()))
    }
}

fn lowered<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_are_lowercased_and_blank_terms_dropped() {
        let set = KeywordSet::new(KeywordRole::Accept, ["Accept All", "", "  ", "OK"]);
        assert_eq!(set.terms(), &["accept all".to_string(), "ok".to_string()]);
        assert_eq!(set.role(), KeywordRole::Accept);
    }

    #[test]
    fn padded_terms_keep_their_padding() {
        let set = KeywordSet::new(KeywordRole::Accept, [" OK "]);
        assert_eq!(set.terms(), &[" ok ".to_string()]);
        assert!(set.matches("click ok to continue"));
        assert!(!set.matches("book a table"));
    }

    #[test]
    fn default_sets_are_disjoint() {
        Keywords::default().ensure_disjoint().unwrap();
    }

    #[test]
    fn term_shared_between_roles_is_rejected() {
        let err = Keywords::from_toml_str(
            r#"
            banner = ["cookie"]
            accept = ["ok"]
            reject = ["OK"]
            policy = ["policy"]
            "#,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("\"ok\""), "{msg}");
        assert!(msg.contains("Accept") && msg.contains("Reject"), "{msg}");
    }

    #[test]
    fn substring_match_hits_inside_words() {
        let kw = Keywords::default();
        // known weakness: "ok" inside "book"
        assert!(kw.accept.matches("book a table"));
        assert!(!kw.reject.matches("book a table"));
    }

    #[test]
    fn default_sets_cover_ukrainian() {
        let kw = Keywords::default();
        assert!(kw.banner.matches("ми використовуємо файли cookie"));
        assert!(kw.reject.matches("відхилити"));
        assert!(kw.policy.matches("політика конфіденційності"));
    }

    #[test]
    fn tracking_cookie_match_ignores_case() {
        let kw = Keywords::default();
        assert!(kw.is_tracking_cookie("_ga"));
        assert!(kw.is_tracking_cookie("_GID_GA"));
        assert!(kw.is_tracking_cookie("_fbp"));
        assert!(!kw.is_tracking_cookie("session_id"));
    }

    #[test]
    fn toml_override_keeps_default_tracking_list() {
        let kw = Keywords::from_toml_str(
            r#"
            banner = ["Cookies"]
            accept = ["Akzeptieren"]
            reject = ["Ablehnen"]
            policy = ["Datenschutz"]
            "#,
        )
        .unwrap();
        assert!(kw.accept.matches("alle akzeptieren"));
        assert!(!kw.accept.matches("accept"));
        assert_eq!(kw.tracking_cookies, vec!["ga", "fbp", "analytics"]);
    }

    #[test]
    fn toml_missing_set_is_rejected() {
        assert!(Keywords::from_toml_str("banner = [\"x\"]").is_err());
    }
}
