use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::util::SubscriberInitExt; // <- needed for .try_init()
use tracing_subscriber::{fmt, EnvFilter};

use consent_scan::config::{Cli, RendererKind};
use consent_scan::render::{ChromeRenderer, FetchRenderer, PageRenderer};
use consent_scan::{report, Analyzer, Scanner};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logging
    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish()
        .try_init();

    // Config
    let cli = Cli::parse();
    let options = cli.render_options();
    let analyzer = Analyzer::new(cli.load_keywords()?);

    let renderer: Box<dyn PageRenderer> = match cli.renderer {
        RendererKind::Chrome => match &cli.chrome {
            Some(path) => Box::new(ChromeRenderer::with_executable(path)),
            None => Box::new(ChromeRenderer::new()),
        },
        RendererKind::Fetch => Box::new(FetchRenderer::new(&options)?),
    };

    let scanner = Scanner::new(renderer, analyzer, options);
    let result = scanner.scan(&cli.url).await;

    let path = report::write_report(&cli.output_dir, &cli.url, &result)?;
    info!(path = %path.display(), score = result.compliance_score, "report written");

    if !cli.quiet {
        println!("{}", report::to_json(&result)?);
    }

    if result.is_error() {
        error!(error = result.error.as_deref().unwrap_or_default(), "scan failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
