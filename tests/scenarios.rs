use consent_scan::types::{ButtonCheck, InitialCookieCheck};
use consent_scan::{Analyzer, Cookie, PageSnapshot};
use pretty_assertions::assert_eq;
use url::Url;

fn snapshot(names: &[&str], html: &str) -> PageSnapshot {
    PageSnapshot {
        cookies: names
            .iter()
            .map(|n| Cookie::new(*n, "value", "example.com"))
            .collect(),
        html: html.to_string(),
    }
}

#[test]
fn clean_page_without_banner_scores_cookie_check_only() {
    let url = Url::parse("https://example.com/").unwrap();
    let html = r#"<html><body>
        <h1>Welcome</h1>
        <p>Latest news and updates.</p>
        <a href="/about">About us</a>
        <button>Search</button>
    </body></html>"#;

    let report = Analyzer::default().analyze(&url, &snapshot(&["session_id", "csrf_token"], html));

    assert_eq!(report.error, None);
    assert_eq!(report.compliance_score, 40);
    let results = &report.scan_results;
    assert_eq!(
        results.initial_cookies_check,
        Some(InitialCookieCheck {
            count: 2,
            has_non_essential: false,
            names: vec!["session_id".into(), "csrf_token".into()],
        })
    );
    assert_eq!(results.cookie_banner_found, Some(false));
    assert_eq!(
        results.banner_buttons,
        Some(ButtonCheck {
            accept_found: false,
            reject_found: false,
        })
    );
    assert_eq!(results.policy_link_found, Some(false));
    assert_eq!(results.policy_link_url, None);
}

#[test]
fn full_banner_with_tracking_cookies_scores_sixty() {
    let url = Url::parse("https://example.com/").unwrap();
    let html = r#"<html><body>
        <div class="consent">
          <p>This site uses cookie technology.</p>
          <button>Accept All</button>
          <button>Reject All</button>
        </div>
        <footer><a href="/privacy">Privacy Policy</a></footer>
    </body></html>"#;
    let cookies = ["_ga", "_gid", "sid", "lang", "theme", "csrf"];

    let report = Analyzer::default().analyze(&url, &snapshot(&cookies, html));

    assert_eq!(report.compliance_score, 15 + 10 + 25 + 10);
    let results = &report.scan_results;
    let cookie_check = results.initial_cookies_check.as_ref().unwrap();
    assert_eq!(cookie_check.count, 6);
    assert!(cookie_check.has_non_essential);
    assert_eq!(results.cookie_banner_found, Some(true));
    assert_eq!(
        results.banner_buttons,
        Some(ButtonCheck {
            accept_found: true,
            reject_found: true,
        })
    );
    assert_eq!(results.policy_link_found, Some(true));
    assert_eq!(results.policy_link_url.as_deref(), Some("https://example.com/privacy"));
    assert_eq!(
        report.summary,
        vec![
            "Problem: Tracking or analytics cookies appear to be set before consent. Found 6 cookies.",
            "Info: Found a banner or text mentioning cookies.",
            "Good: Found a button to refuse or reject cookies.",
            "Good: Found a link to the policy: https://example.com/privacy",
        ]
    );
}

#[test]
fn page_without_body_content_is_a_failed_run() {
    let url = Url::parse("https://example.com/").unwrap();
    let report = Analyzer::default().analyze(&url, &snapshot(&["sid"], "<html><head></head></html>"));

    assert!(report.error.as_deref().is_some_and(|e| !e.is_empty()));
    assert!(report.scan_results.is_empty());
    assert_eq!(report.compliance_score, 0);
    assert!(report.summary.is_empty());
}

#[test]
fn parent_relative_policy_href_resolves_against_page() {
    let url = Url::parse("https://example.com/en/cookies").unwrap();
    let html = r#"<body><nav><a href="../terms">Privacy &amp; Cookies</a></nav></body>"#;

    let report = Analyzer::default().analyze(&url, &snapshot(&[], html));

    assert_eq!(report.scan_results.policy_link_url.as_deref(), Some("https://example.com/terms"));
}

#[test]
fn ukrainian_page_is_recognised() {
    let url = Url::parse("https://bank.example.ua/").unwrap();
    let html = r#"<body>
        <div>Ми використовуємо файли cookie</div>
        <button>Прийняти</button>
        <button>Відхилити</button>
        <a href="/privacy">Політика конфіденційності</a>
    </body>"#;

    let report = Analyzer::default().analyze(&url, &snapshot(&[], html));

    assert_eq!(report.compliance_score, 100);
    assert_eq!(report.scan_results.policy_link_url.as_deref(), Some("https://bank.example.ua/privacy"));
}

#[test]
fn same_input_gives_identical_json() {
    let url = Url::parse("https://example.com/").unwrap();
    let snap = snapshot(&["_fbp"], "<body><p>cookie</p><a href='/p'>cookie policy</a></body>");
    let analyzer = Analyzer::default();

    let first = consent_scan::report::to_json(&analyzer.analyze(&url, &snap)).unwrap();
    let second = consent_scan::report::to_json(&analyzer.analyze(&url, &snap)).unwrap();
    assert_eq!(first, second);
}
