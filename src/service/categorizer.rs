use crate::models::{Bucket, Opportunity};
use serde::{Deserialize, Serialize};

/// Keyword sets driving bucket assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRules {
    pub space_keywords: Vec<String>,
    pub lidar_keywords: Vec<String>,
    pub platform_keywords: Vec<String>,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            space_keywords: vec!["space".into(), "satellite".into(), "orbital".into()],
            lidar_keywords: vec!["lidar".into()],
            platform_keywords: vec!["platform".into()],
        }
    }
}

/// Assigns each opportunity to exactly one bucket
#[derive(Debug, Clone)]
pub struct Categorizer {
    space: Vec<String>,
    lidar: Vec<String>,
    platform: Vec<String>,
}

/// Lower-cased title and description of one record
struct Haystack {
    title: String,
    description: String,
}

impl Haystack {
    fn of(opp: &Opportunity) -> Self {
        Self {
            title: opp.text("title").to_lowercase(),
            description: opp.text("description").to_lowercase(),
        }
    }

    /// Unanchored substring match: "platformer" still hits "platform"
    fn contains_any(&self, keywords: &[String]) -> bool {
        keywords
            .iter()
            .any(|k| self.title.contains(k.as_str()) || self.description.contains(k.as_str()))
    }
}

fn lowered(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| k.to_lowercase())
        .collect()
}

impl Categorizer {
    pub fn new(rules: &CategoryRules) -> Self {
        Self {
            space: lowered(&rules.space_keywords),
            lidar: lowered(&rules.lidar_keywords),
            platform: lowered(&rules.platform_keywords),
        }
    }

    /// Ordered rules, first match wins
    pub fn categorize(&self, opp: &Opportunity) -> Bucket {
        let text = Haystack::of(opp);

        match opp.text("category") {
            "Platform" => Bucket::Platform,
            "DaaS" => {
                if text.contains_any(&self.space) || text.contains_any(&self.platform) {
                    Bucket::SpaceSystems
                } else if text.contains_any(&self.lidar) {
                    Bucket::Lidar
                } else {
                    Bucket::Funding
                }
            }
            "R&D" => {
                if text.contains_any(&self.space) {
                    Bucket::SpaceSystems
                } else if text.contains_any(&self.lidar) {
                    Bucket::Lidar
                } else {
                    Bucket::Funding
                }
            }
            // unknown or missing category: keywords alone, lidar first
            _ => {
                if text.contains_any(&self.lidar) {
                    Bucket::Lidar
                } else if text.contains_any(&self.space) || text.contains_any(&self.platform) {
                    Bucket::SpaceSystems
                } else {
                    Bucket::Funding
                }
            }
        }
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(&CategoryRules::default())
    }
}
