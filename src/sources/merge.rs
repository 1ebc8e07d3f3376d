use crate::models::Opportunity;
use serde_json::Value;

const PILLARS: [(&str, &[&str]); 4] = [
    ("Defense", &["dod", "navy", "army", "diu", "nga", "defense"]),
    ("Federal", &["nasa", "usgs", "noaa", "doe", "federal", "bill"]),
    ("State/Local", &["state", "dot", "california", "florida", "texas"]),
    ("International", &["esa", "world bank", "global", "jaxa", "wgic"]),
];

const DEFAULT_PILLAR: &str = "Commercial";

/// Strategic pillar from title + agency keywords, first pillar matched wins
pub fn determine_pillar(title: &str, agency: &str) -> &'static str {
    let text = format!("{} {}", title, agency).to_lowercase();
    PILLARS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(pillar, _)| *pillar)
        .unwrap_or(DEFAULT_PILLAR)
}

/// Merge step after fan-out: order by deadline, then fill in ids and pillars
pub fn merge(mut records: Vec<Opportunity>) -> Vec<Opportunity> {
    records.sort_by(|a, b| a.text("deadline").cmp(b.text("deadline")));

    records
        .into_iter()
        .enumerate()
        .map(|(idx, opp)| {
            let pillar = determine_pillar(opp.text("title"), opp.text("agency"));
            let mut fields = opp.into_fields();
            if fields.get("id").map_or(true, Value::is_null) {
                fields.insert("id".into(), Value::String(format!("OPP-{:04}", idx + 1)));
            }
            if fields.get("pillar").map_or(true, Value::is_null) {
                fields.insert("pillar".into(), Value::String(pillar.to_string()));
            }
            Opportunity::new(fields)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pillars() {
        assert_eq!(determine_pillar("DIU — Project DRM-3", "DOD/DIU"), "Defense");
        assert_eq!(determine_pillar("H.R. 187: MAPWaters Act", "Federal"), "Federal");
        assert_eq!(determine_pillar("California Statewide LiDAR Refresh", "CalTrans"), "State/Local");
        assert_eq!(determine_pillar("ESA Living Planet Fellowship", "ESA"), "International");
        assert_eq!(determine_pillar("Mining — Stockpile Volumetrics POC", "Commercial"), "Commercial");
    }

    #[test]
    fn merge_sorts_and_fills() {
        let records = vec![
            Opportunity::from_value(json!({"title": "Later", "agency": "NASA", "deadline": "2026-12-31"})),
            Opportunity::from_value(json!({"title": "Budget", "agency": "Congress", "deadline": "FY2026"})),
            Opportunity::from_value(json!({"id": "keep", "title": "Sooner", "pillar": "Defense", "deadline": "2025-11-16"})),
        ];
        let merged = merge(records);

        let order: Vec<&str> = merged.iter().map(|o| o.text("title")).collect();
        assert_eq!(order, vec!["Sooner", "Later", "Budget"]);
        assert_eq!(merged[0].text("id"), "keep");
        assert_eq!(merged[0].text("pillar"), "Defense");
        assert_eq!(merged[1].text("id"), "OPP-0002");
        assert_eq!(merged[1].text("pillar"), "Federal");
        assert_eq!(merged[2].text("pillar"), "Commercial");
    }
}
