pub mod merge;
pub mod placeholder;

use crate::models::Opportunity;
use rayon::prelude::*;

pub use merge::{determine_pillar, merge};
pub use placeholder::{group_counts, registry, PlaceholderSource, SourceGroup, EXPECTED_SOURCE_COUNT};

/// Producer of raw opportunity records
pub trait OpportunitySource: Send + Sync {
    fn name(&self) -> &str;

    fn fetch(&self) -> anyhow::Result<Vec<Opportunity>>;
}

/// A source that failed during an aggregate run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: String,
    pub reason: String,
}

/// Concatenated output of all sources, in registration order
#[derive(Debug, Default)]
pub struct AggregateRun {
    pub records: Vec<Opportunity>,
    pub succeeded: usize,
    pub failures: Vec<SourceFailure>,
}

/// Fans out over every registered source; one failing source never aborts the run
pub struct SourceAggregator {
    sources: Vec<Box<dyn OpportunitySource>>,
}

impl SourceAggregator {
    pub fn new(sources: Vec<Box<dyn OpportunitySource>>) -> Self {
        Self { sources }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn run(&self) -> AggregateRun {
        // par_iter + collect keeps registration order
        let results: Vec<(&str, anyhow::Result<Vec<Opportunity>>)> = self
            .sources
            .par_iter()
            .map(|s| (s.name(), s.fetch()))
            .collect();

        let mut run = AggregateRun::default();
        for (name, result) in results {
            match result {
                Ok(records) => {
                    tracing::debug!("Source {} yielded {} records", name, records.len());
                    run.succeeded += 1;
                    run.records.extend(records);
                }
                Err(e) => {
                    tracing::warn!("Source {} failed, skipping: {:#}", name, e);
                    run.failures.push(SourceFailure {
                        source: name.to_string(),
                        reason: format!("{:#}", e),
                    });
                }
            }
        }

        tracing::info!(
            "Sources finished: {} ok, {} failed, {} records",
            run.succeeded,
            run.failures.len(),
            run.records.len()
        );
        run
    }
}
