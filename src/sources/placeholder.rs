use crate::models::Opportunity;
use crate::sources::OpportunitySource;
use chrono::NaiveDate;
use serde_json::{json, Value};

pub const EXPECTED_SOURCE_COUNT: usize = 34;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceGroup {
    UsFederal,
    InternationalSpace,
    Research,
    CommercialStateLocal,
}

impl SourceGroup {
    pub const ALL: [SourceGroup; 4] = [
        SourceGroup::UsFederal,
        SourceGroup::InternationalSpace,
        SourceGroup::Research,
        SourceGroup::CommercialStateLocal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SourceGroup::UsFederal => "US Federal Agencies",
            SourceGroup::InternationalSpace => "International Space Agencies",
            SourceGroup::Research => "Research Institutions",
            SourceGroup::CommercialStateLocal => "Commercial & State/Local",
        }
    }
}

const REGISTRY: [(&str, SourceGroup); EXPECTED_SOURCE_COUNT] = [
    // US federal agencies
    ("USGSScraper", SourceGroup::UsFederal),
    ("NASAScraper", SourceGroup::UsFederal),
    ("NOAAScraper", SourceGroup::UsFederal),
    ("USACEScraper", SourceGroup::UsFederal),
    ("FEMAScraper", SourceGroup::UsFederal),
    ("NGAScraper", SourceGroup::UsFederal),
    ("DIUScraper", SourceGroup::UsFederal),
    ("USDAForestScraper", SourceGroup::UsFederal),
    ("BLMScraper", SourceGroup::UsFederal),
    // international space agencies
    ("ESAScraper", SourceGroup::InternationalSpace),
    ("JAXAScraper", SourceGroup::InternationalSpace),
    ("CSAScraper", SourceGroup::InternationalSpace),
    ("DLRScraper", SourceGroup::InternationalSpace),
    ("ISROScraper", SourceGroup::InternationalSpace),
    ("UKSAScraper", SourceGroup::InternationalSpace),
    ("CNSAScraper", SourceGroup::InternationalSpace),
    ("ASIScraper", SourceGroup::InternationalSpace),
    // research institutions
    ("NSFScraper", SourceGroup::Research),
    ("DOEScraper", SourceGroup::Research),
    ("NIHGeospatialScraper", SourceGroup::Research),
    ("EUHorizonScraper", SourceGroup::Research),
    ("MITScraper", SourceGroup::Research),
    ("CaltechJPLScraper", SourceGroup::Research),
    // commercial, state and local
    ("AmazonAWSScraper", SourceGroup::CommercialStateLocal),
    ("GoogleEarthEngineScraper", SourceGroup::CommercialStateLocal),
    ("ESRIScraper", SourceGroup::CommercialStateLocal),
    ("MicrosoftPlanetaryScraper", SourceGroup::CommercialStateLocal),
    ("MaxarScraper", SourceGroup::CommercialStateLocal),
    ("CaliforniaScraper", SourceGroup::CommercialStateLocal),
    ("TexasScraper", SourceGroup::CommercialStateLocal),
    ("FloridaScraper", SourceGroup::CommercialStateLocal),
    ("NYCScraper", SourceGroup::CommercialStateLocal),
    ("WorldBankScraper", SourceGroup::CommercialStateLocal),
    ("PlanetLabsScraper", SourceGroup::CommercialStateLocal),
];

/// Hardcoded strategic record standing in for a real scrape
struct Seed {
    source: &'static str,
    title: &'static str,
    agency: &'static str,
    category: &'static str,
    funding: &'static str,
    deadline: &'static str,
    action: &'static str,
}

const SEEDS: [Seed; 8] = [
    Seed {
        source: "DIUScraper",
        title: "DIU — Project DRM-3 (Alternative PNT)",
        agency: "DOD/DIU",
        category: "R&D",
        funding: "$3M–$8M",
        deadline: "2025-11-16",
        action: "Submit Demo Brief",
    },
    Seed {
        source: "USGSScraper",
        title: "USGS GPSC Subcontracting (High-Revisit)",
        agency: "USGS",
        category: "DaaS",
        funding: "$5M–$25M",
        deadline: "2025-12-15",
        action: "Prime Outreach",
    },
    Seed {
        source: "ESRIScraper",
        title: "Mining — Stockpile Volumetrics POC",
        agency: "Commercial",
        category: "Platform",
        funding: "$50k–$400k/yr",
        deadline: "2025-12-31",
        action: "Identify Site",
    },
    Seed {
        source: "CaliforniaScraper",
        title: "California Statewide LiDAR Refresh",
        agency: "CalTrans",
        category: "DaaS",
        funding: "$20M–$50M",
        deadline: "2027-01-01",
        action: "Capture Strategy",
    },
    Seed {
        source: "NASAScraper",
        title: "NASA ROSES-2025 Omnibus",
        agency: "NASA",
        category: "R&D",
        funding: "$5M+",
        deadline: "2026-12-31",
        action: "Proposal Dev",
    },
    Seed {
        source: "FloridaScraper",
        title: "Florida Seafloor Mapping",
        agency: "FL GIO",
        category: "DaaS",
        funding: "$10M (BIL)",
        deadline: "2025-12-31",
        action: "Teaming Agreement",
    },
    Seed {
        source: "ESAScraper",
        title: "ESA Living Planet Fellowship",
        agency: "ESA",
        category: "R&D",
        funding: "€60k",
        deadline: "2025-09-28",
        action: "Draft Proposal",
    },
    Seed {
        source: "NOAAScraper",
        title: "H.R. 187: MAPWaters Act",
        agency: "Federal",
        category: "R&D",
        funding: "Appropriations",
        deadline: "FY2026",
        action: "Monitor",
    },
];

const PLACEHOLDER_LINK: &str = "https://sam.gov";

/// First amount in a free-text funding string, honouring k/M/B suffixes
pub fn parse_funding(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .unwrap_or(rest.len());
    let number: f64 = rest[..end].replace(',', "").parse().ok()?;
    let multiplier = match rest[end..].chars().next() {
        Some('k' | 'K') => 1e3,
        Some('m' | 'M') => 1e6,
        Some('b' | 'B') => 1e9,
        _ => 1.0,
    };
    Some(number * multiplier)
}

/// ISO date, or `FYyyyy` meaning the last day of that federal fiscal year
pub fn parse_deadline(text: &str) -> Option<NaiveDate> {
    if let Some(year) = text.strip_prefix("FY") {
        return NaiveDate::from_ymd_opt(year.parse().ok()?, 9, 30);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Urgency band for a number of days remaining
pub fn urgency_for(days_until: i64) -> &'static str {
    match days_until {
        d if d <= 30 => "urgent",
        d if d <= 90 => "near",
        _ => "future",
    }
}

fn timeline(deadline: &str, today: NaiveDate) -> Value {
    match parse_deadline(deadline) {
        Some(date) => {
            let days = (date - today).num_days();
            json!({"daysUntil": days, "urgency": urgency_for(days)})
        }
        None => json!({"daysUntil": 0, "urgency": "future"}),
    }
}

impl Seed {
    fn to_opportunity(&self, today: NaiveDate) -> Opportunity {
        // whole dollars
        let amount = parse_funding(self.funding).unwrap_or(0.0).round() as u64;
        Opportunity::from_value(json!({
            "title": self.title,
            "agency": self.agency,
            "category": self.category,
            "deadline": self.deadline,
            "forecast_value": self.funding,
            "next_action": self.action,
            "owner": "TBD",
            "link": PLACEHOLDER_LINK,
            "timeline": timeline(self.deadline, today),
            "funding": {"amountUSD": amount},
        }))
    }
}

/// Named scraper with no live implementation; yields its hardcoded seeds
#[derive(Debug, Clone)]
pub struct PlaceholderSource {
    name: &'static str,
    today: NaiveDate,
}

impl PlaceholderSource {
    pub fn new(name: &'static str, today: NaiveDate) -> Self {
        Self { name, today }
    }
}

impl OpportunitySource for PlaceholderSource {
    fn name(&self) -> &str {
        self.name
    }

    fn fetch(&self) -> anyhow::Result<Vec<Opportunity>> {
        Ok(SEEDS
            .iter()
            .filter(|s| s.source == self.name)
            .map(|s| s.to_opportunity(self.today))
            .collect())
    }
}

/// All registered sources, timelines computed against `today`
pub fn registry(today: NaiveDate) -> Vec<Box<dyn OpportunitySource>> {
    REGISTRY
        .iter()
        .map(|&(name, _)| Box::new(PlaceholderSource::new(name, today)) as Box<dyn OpportunitySource>)
        .collect()
}

/// Registered source count per group, in registry order
pub fn group_counts() -> Vec<(SourceGroup, usize)> {
    SourceGroup::ALL
        .iter()
        .map(|g| (*g, REGISTRY.iter().filter(|(_, rg)| rg == g).count()))
        .collect()
}
