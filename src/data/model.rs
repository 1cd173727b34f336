use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Column names of the source table
// ---------------------------------------------------------------------------

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_CATEGORY_COLUMN: &str = "Booster Version Category";
pub const FLIGHT_NUMBER_COLUMN: &str = "Flight Number";
pub const BOOSTER_VERSION_COLUMN: &str = "Booster Version";

// ---------------------------------------------------------------------------
// Outcome – the binary `class` flag
// ---------------------------------------------------------------------------

/// Launch outcome as recorded in the `class` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// The numeric flag: success = 1, failure = 0.
    pub fn flag(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Parse a `class` cell. Accepts `0`/`1` and their real-valued spellings.
    pub fn from_flag_str(s: &str) -> Option<Self> {
        let v: f64 = s.trim().parse().ok()?;
        Self::from_flag(v)
    }

    pub fn from_flag(v: f64) -> Option<Self> {
        if v == 0.0 {
            Some(Outcome::Failure)
        } else if v == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flag())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Only used for colouring the scatter chart.
    pub booster_category: String,
    pub flight_number: Option<u32>,
    pub booster_version: Option<String>,
}

impl LaunchRecord {
    pub fn new(site: &str, payload_mass_kg: f64, outcome: Outcome, booster_category: &str) -> Self {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg,
            outcome,
            booster_category: booster_category.to_string(),
            flight_number: None,
            booster_version: None,
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the immutable store
// ---------------------------------------------------------------------------

/// The loaded launch table with values derived once at construction.
///
/// There are no mutating methods: once built, the dataset is shared
/// read-only for the rest of the process.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    sites: Vec<String>,
    booster_categories: Vec<String>,
    min_payload: f64,
    max_payload: f64,
}

impl LaunchDataset {
    /// Build the derived values from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let sites = distinct_in_order(records.iter().map(|r| r.site.as_str()));
        let booster_categories =
            distinct_in_order(records.iter().map(|r| r.booster_category.as_str()));

        let (min_payload, max_payload) = if records.is_empty() {
            (0.0, 0.0)
        } else {
            records.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
                (lo.min(r.payload_mass_kg), hi.max(r.payload_mass_kg))
            })
        };

        LaunchDataset {
            records,
            sites,
            booster_categories,
            min_payload,
            max_payload,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// Site identifiers in order of first appearance.
    pub fn distinct_sites(&self) -> &[String] {
        &self.sites
    }

    /// Booster categories in order of first appearance.
    pub fn distinct_booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
