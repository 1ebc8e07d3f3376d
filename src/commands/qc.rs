use crate::config::AppConfig;
use crate::error::Result;
use crate::models::{QcReport, ValidationResult};
use crate::service::Validator;
use crate::store::{read_json, write_json};
use chrono::Utc;
use serde_json::Value;
use std::path::Path;
use tracing::{error, info, warn};

/// An unreadable input is itself a finding: it lands in that document's errors
fn check_file(path: &Path, check: impl Fn(&Value) -> ValidationResult) -> ValidationResult {
    info!("Validating {}...", path.display());
    match read_json(path) {
        Ok(doc) => check(&doc),
        Err(e) => {
            let mut result = ValidationResult::default();
            result.error(e.to_string());
            result
        }
    }
}

fn log_section(name: &str, result: &ValidationResult) {
    if result.errors.is_empty() {
        info!("{} validation: PASSED", name);
    } else {
        error!("{} validation: {} error(s)", name, result.errors.len());
        for e in &result.errors {
            error!("  • {}", e);
        }
    }
    if !result.warnings.is_empty() {
        warn!("{} validation: {} warning(s)", name, result.warnings.len());
        for w in &result.warnings {
            warn!("  • {}", w);
        }
    }
}

/// Validate both inputs, write qc_report.json and return the report (the caller gates on it)
pub fn run(config: &AppConfig) -> Result<QcReport> {
    let validator = Validator::new(config.rules.validation.clone());

    let opportunities = check_file(&config.paths.opportunities(), |doc| {
        validator.validate_opportunities(doc)
    });
    let forecast = check_file(&config.paths.forecast(), |doc| validator.validate_forecast(doc));

    let report = QcReport::new(opportunities, forecast, Utc::now());

    let report_path = config.paths.qc_report();
    write_json(&report_path, &report, "QC report")?;
    info!("QC report saved to {}", report_path.display());

    log_section("Opportunities", &report.opportunities_validation);
    log_section("Forecast", &report.forecast_validation);

    if report.passed() {
        info!("QC STATUS: PASS ({}%)", report.qc_percentage);
        info!("Summary: {}", report.summary);
    } else {
        error!("QC STATUS: FAIL ({}%)", report.qc_percentage);
        error!("Summary: {}", report.summary);
        error!("Data will NOT be published");
    }

    Ok(report)
}
