pub mod generate;
pub mod qc;
pub mod scrape;

use crate::config::AppConfig;
use crate::error::Result;

pub use generate::GenerateSummary;
pub use scrape::ScrapeSummary;

/// End state of a command, mapped to the process exit code by the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    QcFailed,
}

/// scrape -> qc -> generate; programs are not generated from data that failed QC
pub fn run_all(config: &AppConfig) -> Result<Outcome> {
    let scraped = scrape::run(config)?;
    if !scraped.failures.is_empty() {
        tracing::warn!("{} source(s) failed during scrape", scraped.failures.len());
    }

    let report = qc::run(config)?;
    if !report.passed() {
        return Ok(Outcome::QcFailed);
    }

    generate::run(config)?;
    Ok(Outcome::Success)
}
