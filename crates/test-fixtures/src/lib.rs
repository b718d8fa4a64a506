//! Test fixture loader for Stockwatch golden scenarios, plus report builders
//! shared by integration tests across crates.

use std::path::PathBuf;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use stockwatch_core::models::{EntityKey, Report, StockStatus};

/// Root directory of the golden fixtures.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// List all golden scenario files, sorted by name.
pub fn list_scenarios() -> Vec<PathBuf> {
    let dir = fixtures_root();
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to list {}: {}", dir.display(), e))
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    paths
}

/// Load every golden scenario.
pub fn load_scenarios() -> Vec<GoldenScenario> {
    list_scenarios()
        .iter()
        .map(|p| {
            let name = p
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_else(|| panic!("non-utf8 fixture name {}", p.display()));
            load_fixture(name)
        })
        .collect()
}

/// Fixed origin for scenario time offsets: 2025-01-01T00:00:00Z.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("scenario epoch is ambiguous"))
}

/// `epoch() + hours`, with millisecond resolution.
pub fn at(hours: f64) -> DateTime<Utc> {
    epoch() + Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

pub fn key(location_id: &str, item_id: &str) -> EntityKey {
    EntityKey::new(location_id, item_id)
}

/// A full-confidence report for `p1/m1` at `hours` after the epoch.
pub fn report(status: StockStatus, hours: f64, token: &str) -> Report {
    report_for(key("p1", "m1"), status, 1.0, hours, token)
}

pub fn report_for(
    entity_key: EntityKey,
    status: StockStatus,
    base_confidence: f64,
    hours: f64,
    token: &str,
) -> Report {
    Report::new(entity_key, status, base_confidence, at(hours), token)
}

/// A scripted sequence of submissions and queries with expected outcomes.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// TOML overrides applied on top of the default configuration.
    #[serde(default)]
    pub config_toml: String,
    pub steps: Vec<ScenarioStep>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScenarioStep {
    Submit {
        location_id: String,
        item_id: String,
        status: String,
        #[serde(default = "full_confidence")]
        base_confidence: f64,
        at_hours: f64,
        #[serde(default)]
        token: String,
        #[serde(default)]
        expect: SubmitExpectation,
    },
    Query {
        location_id: String,
        item_id: String,
        at_hours: f64,
        expect: QueryExpectation,
    },
}

fn full_confidence() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitExpectation {
    /// `"invalid"` or `"duplicate"` when the submission must be rejected.
    pub error: Option<String>,
    pub status: Option<String>,
    pub confidence: Option<f64>,
    pub changed: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryExpectation {
    pub status: String,
    pub confidence: f64,
    pub visible: bool,
}
