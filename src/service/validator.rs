use crate::models::ValidationResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field lists and vocabularies checked by the QC gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub meta_fields: Vec<String>,
    pub required_fields: Vec<String>,
    pub valid_categories: Vec<String>,
    pub timeline_fields: Vec<String>,
    pub valid_urgencies: Vec<String>,
    pub topographic_keywords: Vec<String>,
    /// Category that is relevant regardless of title keywords
    pub relevance_exempt_category: String,
    pub forecast_fields: Vec<String>,
    pub target_fields: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            meta_fields: strings(&["market_val", "cagr", "updated", "totalCount"]),
            required_fields: strings(&[
                "id",
                "title",
                "agency",
                "pillar",
                "category",
                "forecast_value",
                "link",
                "deadline",
                "next_action",
                "timeline",
                "funding",
            ]),
            valid_categories: strings(&["DaaS", "R&D", "Platform"]),
            timeline_fields: strings(&["daysUntil", "urgency"]),
            valid_urgencies: strings(&["urgent", "near", "future"]),
            topographic_keywords: strings(&[
                "lidar",
                "topographic",
                "elevation",
                "3dep",
                "dem",
                "mapping",
                "terrain",
            ]),
            relevance_exempt_category: "DaaS".to_string(),
            forecast_fields: strings(&["current_year", "current_value", "forecast_2030", "cagr_pct"]),
            target_fields: strings(&["bill", "impact"]),
        }
    }
}

/// Raw text of a JSON value for messages: strings unquoted, everything else as JSON
fn show(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Structural and semantic checks over the two input documents
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: ValidationRules,
}

impl Validator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Check an opportunities document: `{meta: {...}, opportunities: [...]}`
    pub fn validate_opportunities(&self, doc: &Value) -> ValidationResult {
        let mut result = ValidationResult::default();

        let Some(root) = doc.as_object() else {
            result.error("Document must be a JSON object");
            return result;
        };

        // 1. meta section
        let meta = match root.get("meta") {
            None => {
                result.error("Missing 'meta' section");
                None
            }
            Some(Value::Object(meta)) => {
                for field in &self.rules.meta_fields {
                    if !meta.contains_key(field) {
                        result.error(format!("Missing meta.{}", field));
                    }
                }
                Some(meta)
            }
            Some(_) => {
                result.error("'meta' must be an object");
                None
            }
        };

        // 2. opportunities array
        let Some(opportunities) = root.get("opportunities") else {
            result.error("Missing 'opportunities' array");
            return result;
        };
        let Some(opportunities) = opportunities.as_array() else {
            result.error("'opportunities' must be an array");
            return result;
        };

        if opportunities.is_empty() {
            result.warn("No opportunities found (empty array)");
        }

        // 3. per-record checks
        for (idx, entry) in opportunities.iter().enumerate() {
            match entry.as_object() {
                Some(fields) => self.check_record(idx, fields, &mut result),
                None => result.error(format!("Opportunity {}: must be an object", idx)),
            }
        }

        // 4. declared count must match the array
        if let Some(total) = meta.and_then(|m| m.get("totalCount")) {
            let actual = opportunities.len();
            // numeric comparison: 3.0 counts as 3
            if total.as_f64() != Some(actual as f64) {
                result.error(format!(
                    "meta.totalCount ({}) doesn't match actual count ({})",
                    show(total),
                    actual
                ));
            }
        }

        result
    }

    fn check_record(&self, idx: usize, fields: &Map<String, Value>, result: &mut ValidationResult) {
        let id = match fields.get("id") {
            Some(v) if !v.is_null() => show(v),
            _ => "unknown".to_string(),
        };
        let tag = format!("Opportunity {} ({})", idx, id);
        let category_text = fields.get("category").and_then(Value::as_str).unwrap_or("");

        for field in &self.rules.required_fields {
            if !fields.contains_key(field) {
                result.error(format!("Opportunity {}: Missing required field '{}'", idx, field));
            }
        }

        // Unknown category only warns; bad urgency below is an error
        if let Some(category) = fields.get("category") {
            if !category
                .as_str()
                .is_some_and(|c| self.rules.valid_categories.iter().any(|v| v == c))
            {
                result.warn(format!(
                    "{}: Invalid category '{}' (expected: {})",
                    tag,
                    show(category),
                    self.rules.valid_categories.join(", ")
                ));
            }
        }

        if let Some(timeline) = fields.get("timeline") {
            match timeline.as_object() {
                Some(timeline) => {
                    for field in &self.rules.timeline_fields {
                        if !timeline.contains_key(field) {
                            result.error(format!("{}: Missing timeline.{}", tag, field));
                        }
                    }
                    if let Some(urgency) = timeline.get("urgency") {
                        if !urgency
                            .as_str()
                            .is_some_and(|u| self.rules.valid_urgencies.iter().any(|v| v == u))
                        {
                            result.error(format!(
                                "{}: Invalid urgency '{}' (expected: {})",
                                tag,
                                show(urgency),
                                self.rules.valid_urgencies.join(", ")
                            ));
                        }
                    }
                }
                None => result.error(format!("{}: timeline must be an object", tag)),
            }
        }

        if let Some(funding) = fields.get("funding") {
            match funding.as_object() {
                Some(funding) => match funding.get("amountUSD") {
                    None => result.error(format!("{}: Missing funding.amountUSD", tag)),
                    Some(amount) if !amount.is_number() => {
                        result.error(format!("{}: funding.amountUSD must be numeric", tag))
                    }
                    Some(_) => {}
                },
                None => result.error(format!("{}: funding must be an object", tag)),
            }
        }

        // Relevance heuristic, only when a title exists
        if let Some(title) = fields.get("title") {
            let title = show(title).to_lowercase();
            let relevant = self
                .rules
                .topographic_keywords
                .iter()
                .any(|k| title.contains(&k.to_lowercase()));
            if !relevant && category_text != self.rules.relevance_exempt_category {
                result.warn(format!(
                    "{}: May not be topographic-related (no relevant keywords found)",
                    tag
                ));
            }
        }
    }

    /// Check a forecast document: required numeric headline figures plus optional targets
    pub fn validate_forecast(&self, doc: &Value) -> ValidationResult {
        let mut result = ValidationResult::default();

        let Some(root) = doc.as_object() else {
            result.error("Document must be a JSON object");
            return result;
        };

        for field in &self.rules.forecast_fields {
            match root.get(field) {
                None => result.error(format!("Missing required field '{}'", field)),
                Some(v) if !v.is_number() => result.error(format!("{} must be numeric", field)),
                Some(_) => {}
            }
        }

        if let Some(targets) = root.get("legislative_targets") {
            match targets.as_array() {
                Some(targets) => {
                    for (idx, target) in targets.iter().enumerate() {
                        for field in &self.rules.target_fields {
                            let present = target.as_object().is_some_and(|t| t.contains_key(field));
                            if !present {
                                result.warn(format!(
                                    "legislative_targets[{}]: Missing '{}' field",
                                    idx, field
                                ));
                            }
                        }
                    }
                }
                None => result.error("legislative_targets must be an array"),
            }
        }

        result
    }
}
