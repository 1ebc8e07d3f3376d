pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod sources;
pub mod store;

pub use config::AppConfig;
pub use error::PipelineError;
pub use service::{Categorizer, PriorityScorer, ReportAssembler, Validator};
pub use sources::{OpportunitySource, SourceAggregator};
