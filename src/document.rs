//! Parsed view of a rendered page: the text the checks look at and nothing else.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::AnalyzeError;

static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").expect("static selector"));
static CLICKABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a, button").expect("static selector"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector"));

/// An `<a>` or `<button>` element, reduced to its lower-cased text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clickable {
    pub text: String,
}

/// An `<a href>` element. `href` is kept verbatim, `text` is lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    body_text: String,
    clickables: Vec<Clickable>,
    anchors: Vec<Anchor>,
}

impl Document {
    /// Parse rendered HTML.
    ///
    /// HTML5 parsing always synthesizes a `<body>`, so a page whose body is
    /// missing or carries no elements and no text is reported as malformed.
    pub fn parse(html: &str) -> Result<Self, AnalyzeError> {
        let doc = Html::parse_document(html);

        let body = doc.select(&BODY).next().ok_or(AnalyzeError::MalformedDocument)?;
        let has_elements = body.children().any(|c| c.value().is_element());
        let body_text = normalize(body);
        if !has_elements && body_text.is_empty() {
            return Err(AnalyzeError::MalformedDocument);
        }

        let clickables = doc
            .select(&CLICKABLE)
            .map(|el| Clickable { text: normalize(el) })
            .collect();

        let anchors = doc
            .select(&ANCHOR)
            .filter_map(|el| {
                let href = el.value().attr("href")?;
                Some(Anchor {
                    href: href.trim().to_string(),
                    text: normalize(el),
                })
            })
            .collect();

        Ok(Self {
            body_text,
            clickables,
            anchors,
        })
    }

    /// Build a document from already extracted parts. Text is normalized
    /// the same way `parse` does it.
    pub fn from_parts(
        body_text: &str,
        clickables: impl IntoIterator<Item = String>,
        anchors: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            body_text: collapse(body_text),
            clickables: clickables
                .into_iter()
                .map(|t| Clickable { text: collapse(&t) })
                .collect(),
            anchors: anchors
                .into_iter()
                .map(|(href, text)| Anchor {
                    href,
                    text: collapse(&text),
                })
                .collect(),
        }
    }

    pub fn body_text(&self) -> &str {
        &self.body_text
    }

    pub fn clickables(&self) -> &[Clickable] {
        &self.clickables
    }

    /// Anchors in document order.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }
}

fn normalize(el: ElementRef<'_>) -> String {
    collapse(&el.text().collect::<String>())
}

fn collapse(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
