//! Typed configuration for the tunables named in the external interface: the
//! area/crossing search bounds, the retry knobs of the four-way path, and the
//! method/priority selectors. The core's `partition` entry point itself takes
//! plain arguments; this struct is the convenience a caller loads from TOML.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{FloorplanError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartitionMethod {
    FourWayPartition,
    EightWayPartition,
}

impl FromStr for PartitionMethod {
    type Err = FloorplanError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "FOUR_WAY_PARTITION" => Ok(PartitionMethod::FourWayPartition),
            "EIGHT_WAY_PARTITION" => Ok(PartitionMethod::EightWayPartition),
            other => Err(FloorplanError::UnknownPartitionMethod(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptPriority {
    AreaPrioritized,
    SlrCrossingPrioritized,
}

impl FromStr for OptPriority {
    type Err = FloorplanError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "AREA_PRIORITIZED" => Ok(OptPriority::AreaPrioritized),
            "SLR_CROSSING_PRIORITIZED" => Ok(OptPriority::SlrCrossingPrioritized),
            other => Err(FloorplanError::UnknownOptPriority(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FloorplanConfig {
    pub min_area: f64,
    pub max_area: f64,
    pub min_crossing: f64,
    pub max_crossing: f64,
    pub max_search_time_secs: u64,
    pub partition_method: PartitionMethod,
    pub floorplan_opt_priority: OptPriority,
    /// Step added to the area cap on each retry-loop failure (§4.4).
    pub retry_delta: f64,
    /// Retry loop gives up once the area cap would reach this ratio (§4.4).
    pub retry_hard_limit: f64,
}

impl Default for FloorplanConfig {
    fn default() -> Self {
        Self {
            min_area: 0.65,
            max_area: 0.85,
            min_crossing: 10_000.0,
            max_crossing: 15_000.0,
            max_search_time_secs: 600,
            partition_method: PartitionMethod::EightWayPartition,
            floorplan_opt_priority: OptPriority::AreaPrioritized,
            retry_delta: 0.02,
            retry_hard_limit: 2.0,
        }
    }
}

impl FloorplanConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_defaults() {
        let cfg = FloorplanConfig::default();
        assert_eq!(cfg.min_area, 0.65);
        assert_eq!(cfg.max_area, 0.85);
        assert_eq!(cfg.min_crossing, 10_000.0);
        assert_eq!(cfg.max_crossing, 15_000.0);
        assert_eq!(cfg.max_search_time_secs, 600);
    }

    #[test]
    fn parses_overrides_from_toml() {
        let cfg = FloorplanConfig::from_toml_str(
            r#"
            min_area = 0.5
            max_area = 0.9
            min_crossing = 0.0
            max_crossing = 1000.0
            max_search_time_secs = 30
            partition_method = "FOUR_WAY_PARTITION"
            floorplan_opt_priority = "SLR_CROSSING_PRIORITIZED"
            retry_delta = 0.02
            retry_hard_limit = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.partition_method, PartitionMethod::FourWayPartition);
        assert_eq!(cfg.floorplan_opt_priority, OptPriority::SlrCrossingPrioritized);
    }

    #[test]
    fn rejects_unknown_partition_method_string() {
        assert!(matches!(
            "SIXTEEN_WAY_PARTITION".parse::<PartitionMethod>(),
            Err(FloorplanError::UnknownPartitionMethod(_))
        ));
    }
}
