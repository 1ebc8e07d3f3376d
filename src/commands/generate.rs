use crate::config::AppConfig;
use crate::error::Result;
use crate::models::{Bucket, Opportunity};
use crate::service::{ReportAssembler, STANDARD_CEILING};
use crate::store::{priority_matrix_bytes, read_json, to_json_bytes, write_all};
use chrono::Utc;
use tracing::{debug, error, info, warn};

/// Per-bucket counts of a generate run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub total: usize,
    pub per_bucket: Vec<(Bucket, usize)>,
}

/// opportunities.json -> programs.json + priority_matrix.csv
pub fn run(config: &AppConfig) -> Result<GenerateSummary> {
    let input = config.paths.opportunities();
    info!("Generating programs from {}", input.display());

    // 1. load; a missing or malformed input aborts before anything is written
    let doc = read_json(&input).map_err(|e| {
        error!("{}", e);
        e
    })?;
    let opportunities = Opportunity::list_from(&doc);
    info!("Loaded {} opportunities", opportunities.len());

    // 2. categorize, score, group, rank
    let assembler = ReportAssembler::from_rules(&config.rules);
    let ceiling = assembler.score_ceiling();
    if ceiling > STANDARD_CEILING {
        warn!(
            "Scoring rules allow up to {} points (standard maximum {})",
            ceiling, STANDARD_CEILING
        );
    } else {
        debug!("Priority scores range 0-{}", ceiling);
    }
    let assembly = assembler.assemble(&opportunities);
    let summary = GenerateSummary {
        total: assembly.total(),
        per_bucket: Bucket::ALL.iter().map(|b| (*b, assembly.count(*b))).collect(),
    };

    info!("Program distribution:");
    for (bucket, count) in &summary.per_bucket {
        info!("  • {} programs: {}", bucket.display_name(), count);
    }
    info!("  • Total: {}", summary.total);

    // 3. render everything in memory, then stage and swap both files together
    let matrix = priority_matrix_bytes(&assembly.priority_rows())?;
    let programs = to_json_bytes(&assembly.into_document(Utc::now()), "programs document")?;

    let programs_path = config.paths.programs();
    let matrix_path = config.paths.priority_matrix();
    write_all(&[
        (programs_path.as_path(), programs.as_slice()),
        (matrix_path.as_path(), matrix.as_slice()),
    ])?;

    info!("Generated {}", programs_path.display());
    info!("Generated {}", matrix_path.display());
    Ok(summary)
}
