//! Heuristic cookie-consent compliance scanner.
//!
//! A [`render::PageRenderer`] loads one page and captures its cookie jar and
//! rendered HTML; the [`analyzer::Analyzer`] turns that snapshot into a
//! [`types::Report`] with a 0-100 score built from four checks:
//!
//! | check                          | points |
//! |--------------------------------|--------|
//! | no tracking cookies, < 5 total | 40     |
//! | banner text present            | 15     |
//! | accept control                 | 10     |
//! | reject control                 | 25     |
//! | policy link                    | 10     |
//!
//! The score is a signal for an auditor, not a legal determination.

pub mod analyzer;
pub mod checks;
pub mod config;
pub mod document;
pub mod error;
pub mod keywords;
pub mod render;
pub mod report;
pub mod types;

pub use analyzer::{Analyzer, Scanner};
pub use error::{AnalyzeError, RenderError};
pub use keywords::Keywords;
pub use types::{Cookie, PageSnapshot, Report};
