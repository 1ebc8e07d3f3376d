use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// Dashboard bucket; every opportunity lands in exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Funding,
    Lidar,
    SpaceSystems,
    Platform,
}

impl Bucket {
    /// Output order of the `programs` object
    pub const ALL: [Bucket; 4] = [
        Bucket::Funding,
        Bucket::Lidar,
        Bucket::SpaceSystems,
        Bucket::Platform,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Bucket::Funding => "Funding",
            Bucket::Lidar => "LiDAR",
            Bucket::SpaceSystems => "Space Systems",
            Bucket::Platform => "Platform",
        }
    }
}

/// Whole-dollar amounts serialize as integers, everything else as floats
pub fn serialize_amount<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Opportunity projected into the fixed dashboard shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub title: String,
    pub agency: String,
    pub category: String,
    pub pillar: String,
    pub value: String,
    #[serde(rename = "valueUSD", serialize_with = "serialize_amount")]
    pub value_usd: f64,
    pub deadline: String,
    pub days_until: i64,
    pub urgency: String,
    pub next_action: String,
    pub description: String,
    pub link: String,
    pub agency_link: String,
    pub budget_source_link: String,
    pub priority_score: u32,
}

/// `programs.json` header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramsMeta {
    pub updated: String,
    pub total_programs: usize,
    pub categories: Vec<String>,
    #[serde(rename = "generated_from")]
    pub generated_from: String,
    #[serde(rename = "generator_version")]
    pub generator_version: String,
}

/// `programs.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramsDocument {
    pub meta: ProgramsMeta,
    pub programs: IndexMap<Bucket, Vec<Program>>,
}

/// One line of `priority_matrix.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityRow {
    pub rank: usize,
    pub title: String,
    pub agency: String,
    pub pillar: String,
    pub category: String,
    pub value: String,
    #[serde(rename = "valueUSD", serialize_with = "serialize_amount")]
    pub value_usd: f64,
    pub priority_score: u32,
    pub urgency: String,
    pub days_until: i64,
    pub deadline: String,
    pub next_action: String,
}

impl PriorityRow {
    pub fn from_program(rank: usize, program: &Program) -> Self {
        Self {
            rank,
            title: program.title.clone(),
            agency: program.agency.clone(),
            pillar: program.pillar.clone(),
            category: program.category.clone(),
            value: program.value.clone(),
            value_usd: program.value_usd,
            priority_score: program.priority_score,
            urgency: program.urgency.clone(),
            days_until: program.days_until,
            deadline: program.deadline.clone(),
            next_action: program.next_action.clone(),
        }
    }
}
