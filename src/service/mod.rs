pub mod assembler;
pub mod categorizer;
pub mod normalizer;
pub mod scorer;
pub mod validator;

pub use assembler::{Assembly, ReportAssembler};
pub use categorizer::{CategoryRules, Categorizer};
pub use scorer::{PriorityScorer, ScoreBreakdown, ScoreRules, ValueTier, STANDARD_CEILING};
pub use validator::{ValidationRules, Validator};
