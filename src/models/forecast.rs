use serde::{Deserialize, Serialize};

/// Bill tracked for its market impact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegislativeTarget {
    pub bill: String,
    pub impact: String,
}

/// `forecast.json` as produced by the scrape stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub current_year: i32,
    pub current_value: f64,
    pub forecast_2030: f64,
    pub cagr_pct: f64,
    #[serde(default)]
    pub legislative_targets: Vec<LegislativeTarget>,
}

impl Forecast {
    /// Compound the current market value at the CAGR out to 2030
    pub fn project(current_year: i32, current_value: f64, cagr_pct: f64) -> Self {
        let years = (2030 - current_year).max(0);
        let raw = current_value * (1.0 + cagr_pct / 100.0).powi(years);
        Self {
            current_year,
            current_value,
            forecast_2030: (raw * 100.0).round() / 100.0,
            cagr_pct,
            legislative_targets: Vec::new(),
        }
    }

    pub fn with_targets(mut self, targets: Vec<LegislativeTarget>) -> Self {
        self.legislative_targets = targets;
        self
    }
}
