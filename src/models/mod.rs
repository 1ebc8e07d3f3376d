pub mod forecast;
pub mod opportunity;
pub mod program;
pub mod report;

pub use forecast::{Forecast, LegislativeTarget};
pub use opportunity::{first_defined, FieldPath, OpportunitiesDocument, OpportunitiesMeta, Opportunity};
pub use program::{Bucket, PriorityRow, Program, ProgramsDocument, ProgramsMeta};
pub use report::{QcReport, QcStatus, ValidationResult};
