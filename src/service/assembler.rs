use crate::config::RuleSet;
use crate::models::{Bucket, Opportunity, PriorityRow, Program, ProgramsDocument, ProgramsMeta};
use crate::service::{normalizer, Categorizer, PriorityScorer};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

pub const GENERATED_FROM: &str = "opportunities.json";
pub const GENERATOR_VERSION: &str = "1.0.0";

/// Programs grouped per bucket plus the flat priority ranking
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub buckets: IndexMap<Bucket, Vec<Program>>,
    pub ranked: Vec<Program>,
}

impl Assembly {
    pub fn total(&self) -> usize {
        self.ranked.len()
    }

    pub fn count(&self, bucket: Bucket) -> usize {
        self.buckets.get(&bucket).map_or(0, Vec::len)
    }

    /// CSV rows, rank assigned 1.. after sorting
    pub fn priority_rows(&self) -> Vec<PriorityRow> {
        self.ranked
            .iter()
            .enumerate()
            .map(|(idx, p)| PriorityRow::from_program(idx + 1, p))
            .collect()
    }

    pub fn into_document(self, updated: DateTime<Utc>) -> ProgramsDocument {
        ProgramsDocument {
            meta: ProgramsMeta {
                updated: updated.to_rfc3339(),
                total_programs: self.total(),
                categories: Bucket::ALL.iter().map(|b| b.display_name().to_string()).collect(),
                generated_from: GENERATED_FROM.to_string(),
                generator_version: GENERATOR_VERSION.to_string(),
            },
            programs: self.buckets,
        }
    }
}

/// Categorize, score, group and rank a batch of opportunities
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    categorizer: Categorizer,
    scorer: PriorityScorer,
}

impl ReportAssembler {
    pub fn new(categorizer: Categorizer, scorer: PriorityScorer) -> Self {
        Self { categorizer, scorer }
    }

    pub fn from_rules(rules: &RuleSet) -> Self {
        Self::new(
            Categorizer::new(&rules.categories),
            PriorityScorer::new(rules.scoring.clone()),
        )
    }

    /// Highest priority score the active rules can award
    pub fn score_ceiling(&self) -> u32 {
        self.scorer.ceiling()
    }

    pub fn assemble(&self, opportunities: &[Opportunity]) -> Assembly {
        let mut buckets: IndexMap<Bucket, Vec<Program>> =
            Bucket::ALL.iter().map(|b| (*b, Vec::new())).collect();
        let mut ranked = Vec::with_capacity(opportunities.len());

        for opp in opportunities {
            let bucket = self.categorizer.categorize(opp);
            let breakdown = self.scorer.breakdown(opp);
            let program = normalizer::to_program(opp, breakdown.total());
            tracing::debug!(
                "{} -> {:?}, score {} ({:?})",
                program.title,
                bucket,
                program.priority_score,
                breakdown
            );

            ranked.push(program.clone());
            buckets.entry(bucket).or_default().push(program);
        }

        // stable sorts: ties keep input order
        for programs in buckets.values_mut() {
            programs.sort_by(|a, b| b.value_usd.total_cmp(&a.value_usd));
        }
        ranked.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));

        Assembly { buckets, ranked }
    }
}
