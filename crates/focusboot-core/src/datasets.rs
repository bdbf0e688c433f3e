//! Static datasets
//!
//! Names and base focus points are bundled into the binary at build time.
//! Their schema belongs to the data-preparation pipeline, so records are kept
//! as opaque JSON values.

use crate::error::BootError;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// File name of the names dataset
pub const NAMES_FILE: &str = "names.json";

/// File name of the base focus-point dataset
pub const FOCUS_POINTS_FILE: &str = "focus-points.json";

const BUNDLED_NAMES: &str = include_str!("../data/names.json");
const BUNDLED_FOCUS_POINTS: &str = include_str!("../data/focus-points.json");

/// One record of the names dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameEntry(pub Value);

/// One point of interest, from the base dataset or an override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FocusPoint(pub Value);

impl From<Value> for FocusPoint {
    fn from(value: Value) -> Self {
        FocusPoint(value)
    }
}

impl From<Value> for NameEntry {
    fn from(value: Value) -> Self {
        NameEntry(value)
    }
}

/// The two build-time datasets, read-only after load
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticDatasets {
    pub names: Vec<NameEntry>,
    pub focus_points: Vec<FocusPoint>,
}

impl StaticDatasets {
    pub fn new(names: Vec<NameEntry>, focus_points: Vec<FocusPoint>) -> Self {
        StaticDatasets {
            names,
            focus_points,
        }
    }

    /// Datasets embedded at build time.
    ///
    /// The embedded files are checked by the test suite, so this only fails
    /// if a broken file was shipped.
    pub fn bundled() -> Result<Self> {
        let names = parse_dataset(NAMES_FILE, BUNDLED_NAMES)?;
        let focus_points = parse_dataset(FOCUS_POINTS_FILE, BUNDLED_FOCUS_POINTS)?;
        debug!(
            names = names.len(),
            focus_points = focus_points.len(),
            "Loaded bundled datasets"
        );
        Ok(StaticDatasets::new(names, focus_points))
    }

    /// Load `names.json` and `focus-points.json` from a directory.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let names = std::fs::read_to_string(dir.join(NAMES_FILE))?;
        let focus_points = std::fs::read_to_string(dir.join(FOCUS_POINTS_FILE))?;
        let datasets = StaticDatasets::new(
            parse_dataset(NAMES_FILE, &names)?,
            parse_dataset(FOCUS_POINTS_FILE, &focus_points)?,
        );
        debug!(dir = %dir.display(), "Loaded datasets from directory");
        Ok(datasets)
    }
}

fn parse_dataset<T: DeserializeOwned>(name: &str, raw: &str) -> Result<Vec<T>> {
    serde_json::from_str(raw).map_err(|source| BootError::InvalidDataset {
        name: name.to_string(),
        source,
    })
}
