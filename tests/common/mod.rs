#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    tmp: TempDir,
    pub data: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let data = tmp.path().join("data");
        fs::create_dir_all(&data).expect("create data dir");
        Self { tmp, data }
    }

    /// Binary pointed at this env's data dir, run from the temp root so no stray config is read
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("nuview-pipeline").expect("binary built");
        cmd.current_dir(self.tmp.path())
            .env_remove("RUST_LOG")
            .arg("--data-dir")
            .arg(&self.data);
        cmd
    }

    pub fn write(&self, name: &str, value: &Value) {
        fs::write(self.data.join(name), serde_json::to_string_pretty(value).unwrap())
            .expect("write fixture");
    }

    /// TOML config placed beside (not inside) the data dir
    pub fn write_config(&self, body: &str) -> PathBuf {
        let path = self.tmp.path().join("pipeline.toml");
        fs::write(&path, body).expect("write config");
        path
    }

    pub fn processed(&self, name: &str) -> PathBuf {
        self.data.join("processed").join(name)
    }

    pub fn read_json(&self, path: &Path) -> Value {
        let text = fs::read_to_string(path).expect("output exists");
        serde_json::from_str(&text).expect("valid json output")
    }
}

pub fn opportunity(id: &str, title: &str, category: &str, amount: u64, urgency: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "agency": "USGS",
        "pillar": "Federal",
        "category": category,
        "forecast_value": "see funding",
        "link": "https://sam.gov",
        "deadline": "2026-12-15",
        "next_action": "Prime Outreach",
        "timeline": {"daysUntil": 57, "urgency": urgency},
        "funding": {"amountUSD": amount}
    })
}

pub fn opportunities_doc(opps: Vec<Value>) -> Value {
    let count = opps.len();
    json!({
        "meta": {"market_val": 14.13, "cagr": 19.43, "updated": "2026-10-19T00:00:00Z", "totalCount": count},
        "opportunities": opps
    })
}

pub fn forecast_doc() -> Value {
    json!({
        "current_year": 2026,
        "current_value": 14.13,
        "forecast_2030": 28.75,
        "cagr_pct": 19.43,
        "legislative_targets": [{"bill": "H.R. 187", "impact": "mapping mandate"}]
    })
}
