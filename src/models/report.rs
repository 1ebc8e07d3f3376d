use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Findings for one input document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QcStatus {
    Pass,
    Fail,
}

/// `qc_report.json`; built once per run, never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcReport {
    pub timestamp: String,
    pub qc_status: QcStatus,
    pub qc_percentage: u8,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub opportunities_validation: ValidationResult,
    pub forecast_validation: ValidationResult,
    pub summary: String,
}

impl QcReport {
    /// Binary gate: any error fails the run, warnings never do
    pub fn new(
        opportunities: ValidationResult,
        forecast: ValidationResult,
        at: DateTime<Utc>,
    ) -> Self {
        let total_errors = opportunities.errors.len() + forecast.errors.len();
        let total_warnings = opportunities.warnings.len() + forecast.warnings.len();
        let passed = total_errors == 0;

        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Micros, true),
            qc_status: if passed { QcStatus::Pass } else { QcStatus::Fail },
            qc_percentage: if passed { 100 } else { 0 },
            total_errors,
            total_warnings,
            opportunities_validation: opportunities,
            forecast_validation: forecast,
            summary: format!(
                "QC {} with {} errors and {} warnings",
                if passed { "PASSED" } else { "FAILED" },
                total_errors,
                total_warnings
            ),
        }
    }

    pub fn passed(&self) -> bool {
        self.qc_status == QcStatus::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).single().unwrap()
    }

    #[test]
    fn warnings_do_not_fail_the_gate() {
        let mut opps = ValidationResult::default();
        opps.warn("heads up");
        let report = QcReport::new(opps, ValidationResult::default(), at());

        assert!(report.passed());
        assert_eq!(report.qc_percentage, 100);
        assert_eq!(report.total_warnings, 1);
        assert_eq!(report.summary, "QC PASSED with 0 errors and 1 warnings");
        assert_eq!(report.timestamp, "2026-10-19T08:30:00.000000Z");
    }

    #[test]
    fn one_error_fails_the_gate() {
        let mut forecast = ValidationResult::default();
        forecast.error("cagr_pct must be numeric");
        let report = QcReport::new(ValidationResult::default(), forecast, at());

        assert_eq!(report.qc_status, QcStatus::Fail);
        assert_eq!(report.qc_percentage, 0);
        assert_eq!(report.total_errors, 1);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["qc_status"], "FAIL");
    }
}
