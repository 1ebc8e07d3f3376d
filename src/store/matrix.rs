use crate::error::{PipelineError, Result};
use crate::models::PriorityRow;
use csv::Writer;

/// Render the priority matrix (header + one row per ranked program)
pub fn priority_matrix_bytes(rows: &[PriorityRow]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());

    if rows.is_empty() {
        // serde only emits headers alongside the first record
        writer.write_record([
            "rank",
            "title",
            "agency",
            "pillar",
            "category",
            "value",
            "valueUSD",
            "priorityScore",
            "urgency",
            "daysUntil",
            "deadline",
            "nextAction",
        ])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush().map_err(csv::Error::from)?;
    writer
        .into_inner()
        .map_err(|e| PipelineError::Csv(csv::Error::from(e.into_error())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rank: usize, title: &str, score: u32) -> PriorityRow {
        PriorityRow {
            rank,
            title: title.to_string(),
            agency: "USGS".to_string(),
            pillar: "Federal".to_string(),
            category: "R&D".to_string(),
            value: "$5.0M".to_string(),
            value_usd: 5_000_000.0,
            priority_score: score,
            urgency: "near".to_string(),
            days_until: 57,
            deadline: "2026-12-15".to_string(),
            next_action: "Prime Outreach".to_string(),
        }
    }

    const HEADER: &str =
        "rank,title,agency,pillar,category,value,valueUSD,priorityScore,urgency,daysUntil,deadline,nextAction";

    #[test]
    fn header_and_rows() {
        let bytes = priority_matrix_bytes(&[row(1, "GPSC, High-Revisit", 45)]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "1,\"GPSC, High-Revisit\",USGS,Federal,R&D,$5.0M,5000000,45,near,57,2026-12-15,Prime Outreach"
        );
    }

    #[test]
    fn empty_matrix_still_has_header() {
        let text = String::from_utf8(priority_matrix_bytes(&[]).unwrap()).unwrap();
        assert_eq!(text.trim_end(), HEADER);
    }
}
