use crate::error::Result;
use crate::service::{CategoryRules, ScoreRules, ValidationRules};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "nuview.toml";

const ENV_PREFIX: &str = "NUVIEW";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
    pub market: MarketConfig,
    pub rules: RuleSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    pub processed_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// Headline market figures stamped into the scrape outputs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Current market value, USD billions
    pub market_val: f64,
    pub cagr_pct: f64,
}

/// Keyword sets and score tables handed to the categorizer, scorer and validator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub categories: CategoryRules,
    pub scoring: ScoreRules,
    pub validation: ValidationRules,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            processed_dir: PathBuf::from("data").join("processed"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            market_val: 14.13,
            cagr_pct: 19.43,
        }
    }
}

impl PathsConfig {
    /// Point both input and output locations at a new data directory
    pub fn rebase(&mut self, data_dir: &Path) {
        self.data_dir = data_dir.to_path_buf();
        self.processed_dir = data_dir.join("processed");
    }

    pub fn opportunities(&self) -> PathBuf {
        self.data_dir.join("opportunities.json")
    }

    pub fn forecast(&self) -> PathBuf {
        self.data_dir.join("forecast.json")
    }

    pub fn programs(&self) -> PathBuf {
        self.processed_dir.join("programs.json")
    }

    pub fn priority_matrix(&self) -> PathBuf {
        self.processed_dir.join("priority_matrix.csv")
    }

    pub fn qc_report(&self) -> PathBuf {
        self.processed_dir.join("qc_report.json")
    }
}

/// `NUVIEW_PATHS__DATA_DIR` -> `paths.data_dir`
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

impl AppConfig {
    /// Layered load: defaults -> TOML file (optional) -> NUVIEW_* environment
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_layers(file, environment())
    }

    fn load_layers(file: Option<&Path>, env: Environment) -> Result<Self> {
        let (path, required) = match file {
            Some(p) => (p.to_string_lossy().into_owned(), true),
            None => (DEFAULT_CONFIG_FILE.to_string(), false),
        };

        let settings = Config::builder()
            .add_source(File::new(&path, FileFormat::Toml).required(required))
            .add_source(env)
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_data_dir() {
        let config = AppConfig::default();
        assert_eq!(config.paths.opportunities(), PathBuf::from("data/opportunities.json"));
        assert_eq!(
            config.paths.qc_report(),
            PathBuf::from("data/processed/qc_report.json")
        );
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn rebase_moves_processed_dir() {
        let mut paths = PathsConfig::default();
        paths.rebase(Path::new("/tmp/run"));
        assert_eq!(paths.forecast(), PathBuf::from("/tmp/run/forecast.json"));
        assert_eq!(
            paths.priority_matrix(),
            PathBuf::from("/tmp/run/processed/priority_matrix.csv")
        );
    }

    fn env_with(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.toml");
        std::fs::write(&file, "[paths]\ndata_dir = \"elsewhere\"\n").unwrap();

        let env = env_with(&[
            ("NUVIEW_PATHS__DATA_DIR", "from_env"),
            ("NUVIEW_LOGGING__LEVEL", "debug"),
        ]);
        let config = AppConfig::load_layers(Some(&file), env).unwrap();
        assert_eq!(config.paths.data_dir, PathBuf::from("from_env"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn env_ignores_other_prefixes() {
        let env = env_with(&[("OTHER_PATHS__DATA_DIR", "nope")]);
        let (_dir, file) = write_empty_toml();
        let config = AppConfig::load_layers(Some(&file), env).unwrap();
        assert_eq!(config.paths.data_dir, PathBuf::from("data"));
    }

    fn write_empty_toml() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("empty.toml");
        std::fs::write(&file, "").unwrap();
        (dir, file)
    }

    #[test]
    fn toml_file_overrides_rules() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.toml");
        std::fs::write(
            &file,
            r#"
[paths]
data_dir = "elsewhere"

[rules.categories]
lidar_keywords = ["lidar", "point cloud"]
"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&file)).unwrap();
        assert_eq!(config.paths.data_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.rules.categories.lidar_keywords.len(), 2);
        // untouched sections keep their defaults
        assert_eq!(config.rules.categories.space_keywords.len(), 3);
        assert_eq!(config.rules.scoring.verified_points, 10);
    }
}
