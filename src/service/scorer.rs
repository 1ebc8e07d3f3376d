use crate::models::Opportunity;
use crate::service::normalizer;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Highest score under the default rules
pub const STANDARD_CEILING: u32 = 85;

/// Minimum value (inclusive) that earns `points`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTier {
    pub min: f64,
    pub points: u32,
}

/// Weights for the four additive priority factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRules {
    pub urgency: IndexMap<String, u32>,
    pub urgency_default: u32,
    /// Checked in order, first tier whose minimum is met wins
    pub value_tiers: Vec<ValueTier>,
    pub value_floor: u32,
    pub category: IndexMap<String, u32>,
    pub verified_points: u32,
    pub link_fields: Vec<String>,
    pub placeholder_links: Vec<String>,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            urgency: IndexMap::from([
                ("urgent".to_string(), 30),
                ("near".to_string(), 20),
                ("future".to_string(), 10),
            ]),
            urgency_default: 10,
            value_tiers: vec![
                ValueTier { min: 1e8, points: 30 },
                ValueTier { min: 1e7, points: 20 },
            ],
            value_floor: 10,
            category: IndexMap::from([
                ("DaaS".to_string(), 15),
                ("Platform".to_string(), 10),
                ("R&D".to_string(), 5),
            ]),
            verified_points: 10,
            link_fields: vec!["link".into(), "budgetSourceLink".into(), "agencyLink".into()],
            placeholder_links: vec!["#".into(), "".into(), "none".into(), "None".into()],
        }
    }
}

/// Per-factor contributions, kept for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    pub urgency: u32,
    pub value: u32,
    pub category: u32,
    pub verification: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.urgency + self.value + self.category + self.verification
    }
}

#[derive(Debug, Clone, Default)]
pub struct PriorityScorer {
    rules: ScoreRules,
}

impl PriorityScorer {
    pub fn new(rules: ScoreRules) -> Self {
        Self { rules }
    }

    /// Highest score the rule set can award
    pub fn ceiling(&self) -> u32 {
        let r = &self.rules;
        let urgency = r.urgency.values().copied().chain([r.urgency_default]).max().unwrap_or(0);
        let value = r.value_tiers.iter().map(|t| t.points).chain([r.value_floor]).max().unwrap_or(0);
        let category = r.category.values().copied().max().unwrap_or(0);
        urgency + value + category + r.verified_points
    }

    pub fn score(&self, opp: &Opportunity) -> u32 {
        self.breakdown(opp).total()
    }

    pub fn breakdown(&self, opp: &Opportunity) -> ScoreBreakdown {
        ScoreBreakdown {
            urgency: self.urgency_points(opp),
            value: self.value_points(normalizer::value_usd(opp)),
            category: self.category_points(opp),
            verification: self.verification_points(opp),
        }
    }

    fn urgency_points(&self, opp: &Opportunity) -> u32 {
        let label = normalizer::urgency(opp);
        self.rules
            .urgency
            .get(&label)
            .copied()
            .unwrap_or(self.rules.urgency_default)
    }

    fn value_points(&self, value_usd: f64) -> u32 {
        self.rules
            .value_tiers
            .iter()
            .find(|t| value_usd >= t.min)
            .map(|t| t.points)
            .unwrap_or(self.rules.value_floor)
    }

    fn category_points(&self, opp: &Opportunity) -> u32 {
        self.rules.category.get(opp.text("category")).copied().unwrap_or(0)
    }

    fn verification_points(&self, opp: &Opportunity) -> u32 {
        let flagged = matches!(opp.get("source_verified"), Some(Value::Bool(true)));
        if flagged || self.rules.link_fields.iter().any(|f| self.is_valid_link(opp.get(f))) {
            self.rules.verified_points
        } else {
            0
        }
    }

    fn is_valid_link(&self, value: Option<&Value>) -> bool {
        match value.and_then(Value::as_str) {
            Some(url) => !url.is_empty() && !self.rules.placeholder_links.iter().any(|p| p == url),
            None => false,
        }
    }
}
