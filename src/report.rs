use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use url::Url;

use crate::types::Report;

/// `report_<host>.json` with dots replaced, e.g. `report_www_example_com.json`.
/// A non-default port is kept as part of the host.
pub fn report_filename(url: &Url) -> String {
    let mut netloc = url.host_str().unwrap_or("unknown").to_string();
    if let Some(port) = url.port() {
        netloc.push_str(&format!(":{port}"));
    }
    format!("report_{}.json", netloc.replace('.', "_"))
}

/// Pretty JSON with 4-space indentation and non-ASCII text left as is.
pub fn to_json(report: &Report) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    report.serialize(&mut ser).context("failed to serialize report")?;
    String::from_utf8(buf).context("report is not valid utf-8")
}

/// Write the report into `dir`, overwriting any earlier report for the same host.
pub fn write_report(dir: &Path, url: &Url, report: &Report) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(report_filename(url));
    let json = to_json(report)?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
