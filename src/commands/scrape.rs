use crate::config::AppConfig;
use crate::error::Result;
use crate::models::{Forecast, LegislativeTarget, OpportunitiesDocument, OpportunitiesMeta};
use crate::sources::{self, SourceAggregator, SourceFailure, EXPECTED_SOURCE_COUNT};
use crate::store::write_json;
use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use tracing::{info, warn};

/// What a scrape run produced
#[derive(Debug)]
pub struct ScrapeSummary {
    pub records: usize,
    pub failures: Vec<SourceFailure>,
}

fn legislative_targets() -> Vec<LegislativeTarget> {
    vec![LegislativeTarget {
        bill: "H.R. 187: MAPWaters Act".to_string(),
        impact: "Federal waterway and shoreline mapping data mandate".to_string(),
    }]
}

/// Run every registered source and write opportunities.json + forecast.json
pub fn run(config: &AppConfig) -> Result<ScrapeSummary> {
    let now = Utc::now();
    let aggregator = SourceAggregator::new(sources::registry(now.date_naive()));
    run_with(config, &aggregator, now)
}

pub fn run_with(
    config: &AppConfig,
    aggregator: &SourceAggregator,
    now: DateTime<Utc>,
) -> Result<ScrapeSummary> {
    info!("Running {} opportunity sources", aggregator.len());
    if aggregator.len() != EXPECTED_SOURCE_COUNT {
        warn!(
            "Expected {} sources, found {}",
            EXPECTED_SOURCE_COUNT,
            aggregator.len()
        );
    }
    for (group, count) in sources::group_counts() {
        info!("  {}: {}", group.label(), count);
    }

    // 1. fan out, failures isolated per source
    let run = aggregator.run();

    // 2. merge: deadline order, ids, pillars
    let opportunities = sources::merge(run.records);
    let total = opportunities.len();

    let document = OpportunitiesDocument {
        opportunities,
        meta: OpportunitiesMeta {
            updated: now.to_rfc3339_opts(SecondsFormat::Micros, true),
            market_val: config.market.market_val,
            cagr: config.market.cagr_pct,
            total_count: total,
        },
    };
    let forecast = Forecast::project(now.year(), config.market.market_val, config.market.cagr_pct)
        .with_targets(legislative_targets());

    // 3. write both documents
    write_json(&config.paths.opportunities(), &document, "opportunities document")?;
    write_json(&config.paths.forecast(), &forecast, "forecast document")?;

    info!(
        "Pipeline updated: {} opportunities saved to {}",
        total,
        config.paths.opportunities().display()
    );

    Ok(ScrapeSummary {
        records: total,
        failures: run.failures,
    })
}
