use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Dotted path into a loosely-typed record, e.g. `funding.amountUSD`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static [&'static str]);

impl FieldPath {
    /// Walk the path; a missing key, a non-mapping hop or a JSON null all resolve to None
    pub fn resolve<'a>(&self, fields: &'a Map<String, Value>) -> Option<&'a Value> {
        let (last, parents) = self.0.split_last()?;
        let mut current = fields;
        for key in parents {
            current = current.get(*key)?.as_object()?;
        }
        current.get(*last).filter(|v| !v.is_null())
    }
}

/// Ordered fallback chain: the first path that resolves wins
pub fn first_defined<'a>(fields: &'a Map<String, Value>, paths: &[FieldPath]) -> Option<&'a Value> {
    paths.iter().find_map(|p| p.resolve(fields))
}

/// Raw funding opportunity as supplied by a source; no field is guaranteed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Opportunity {
    fields: Map<String, Value>,
}

impl Opportunity {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Non-object JSON yields an empty record
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Records of an opportunities document; a missing or non-array list is empty
    pub fn list_from(doc: &Value) -> Vec<Opportunity> {
        doc.get("opportunities")
            .and_then(Value::as_array)
            .map(|items| items.iter().cloned().map(Opportunity::from_value).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn first_defined(&self, paths: &[FieldPath]) -> Option<&Value> {
        first_defined(&self.fields, paths)
    }

    /// String field, or "" when absent or not a string
    pub fn text(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Scalar rendered as display text; absent, null and composite values use the default
    pub fn display_or(&self, paths: &[FieldPath], default: &str) -> String {
        render_scalar(self.first_defined(paths), default)
    }

    /// Top-level counterpart of `display_or`
    pub fn field_or(&self, key: &str, default: &str) -> String {
        render_scalar(self.get(key), default)
    }

    /// Identifier used in validation messages
    pub fn label(&self) -> String {
        self.field_or("id", "unknown")
    }
}

/// `opportunities.json` header written by the scrape stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunitiesMeta {
    pub updated: String,
    pub market_val: f64,
    pub cagr: f64,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
}

/// `opportunities.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunitiesDocument {
    pub opportunities: Vec<Opportunity>,
    pub meta: OpportunitiesMeta,
}

fn render_scalar(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

impl From<Map<String, Value>> for Opportunity {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}
