use crate::models::{FieldPath, Opportunity, Program};
use serde_json::Value;

/// Where a record's dollar value may live, in lookup order
pub const VALUE_PATHS: [FieldPath; 3] = [
    FieldPath(&["amountUSD"]),
    FieldPath(&["valueUSD"]),
    FieldPath(&["funding", "amountUSD"]),
];

pub const URGENCY_PATHS: [FieldPath; 2] = [FieldPath(&["timeline", "urgency"]), FieldPath(&["urgency"])];

pub const DAYS_UNTIL_PATHS: [FieldPath; 2] = [
    FieldPath(&["timeline", "daysUntil"]),
    FieldPath(&["daysUntilDeadline"]),
];

const DEFAULT_URGENCY: &str = "future";

/// Canonical USD value; never fails, 0 when the value is absent, non-numeric or negative
pub fn value_usd(opp: &Opportunity) -> f64 {
    opp.first_defined(&VALUE_PATHS)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// Urgency label as recorded on the opportunity (unvalidated)
pub fn urgency(opp: &Opportunity) -> String {
    opp.display_or(&URGENCY_PATHS, DEFAULT_URGENCY)
}

pub fn days_until(opp: &Opportunity) -> i64 {
    match opp.first_defined(&DAYS_UNTIL_PATHS) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn round_half_up(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}

/// Human-readable amount for display: $1.23B, $4.5M, $60.0K, $950
pub fn format_value(amount: f64) -> String {
    if amount >= 1e9 {
        format!("${:.2}B", round_half_up(amount / 1e9, 2))
    } else if amount >= 1e6 {
        format!("${:.1}M", round_half_up(amount / 1e6, 1))
    } else if amount >= 1e3 {
        format!("${:.1}K", round_half_up(amount / 1e3, 1))
    } else {
        format!("${}", group_thousands(amount.max(0.0).round() as u64))
    }
}

/// Project a raw opportunity into the fully-populated dashboard shape
pub fn to_program(opp: &Opportunity, priority_score: u32) -> Program {
    let value_usd = value_usd(opp);
    Program {
        id: opp.field_or("id", ""),
        title: opp.field_or("title", ""),
        agency: opp.field_or("agency", ""),
        category: opp.field_or("category", "Funding"),
        pillar: opp.field_or("pillar", "Federal"),
        value: format_value(value_usd),
        value_usd,
        deadline: opp.field_or("deadline", ""),
        days_until: days_until(opp),
        urgency: urgency(opp),
        next_action: opp.field_or("next_action", "Review"),
        description: opp.field_or("description", ""),
        link: opp.field_or("link", ""),
        agency_link: opp.field_or("agencyLink", ""),
        budget_source_link: opp.field_or("budgetSourceLink", ""),
        priority_score,
    }
}
