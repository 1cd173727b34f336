use std::fmt;

use serde::Serialize;

use super::model::{LaunchDataset, LaunchRecord};

// ---------------------------------------------------------------------------
// Selection: which site and which payload band are chosen
// ---------------------------------------------------------------------------

/// Value of the site dropdown that means "every site".
pub const ALL_SITES: &str = "ALL";

/// Site part of a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SiteSelector {
    All,
    Site(String),
}

impl SiteSelector {
    /// Interpret a dropdown value; `ALL` is the sentinel for every site.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelector::All
        } else {
            SiteSelector::Site(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SiteSelector::All)
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::All => write!(f, "{ALL_SITES}"),
            SiteSelector::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Closed payload interval `[low, high]` from the range slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    /// Build a range, swapping the ends if they arrive reversed.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            PayloadRange { low: a, high: b }
        } else {
            PayloadRange { low: b, high: a }
        }
    }

    /// Strict test: values equal to either end are outside.
    pub fn contains_strict(&self, value: f64) -> bool {
        self.low < value && value < self.high
    }
}

/// The user's current filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub site: SiteSelector,
    pub payload_range: PayloadRange,
}

impl Selection {
    pub fn new(site: SiteSelector, payload_range: PayloadRange) -> Self {
        Selection { site, payload_range }
    }

    /// Whether a record passes both the site and the strict payload test.
    ///
    /// A site that is not in the dataset simply matches nothing.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        let site_ok = match &self.site {
            SiteSelector::All => true,
            SiteSelector::Site(site) => record.site == *site,
        };
        site_ok && self.payload_range.contains_strict(record.payload_mass_kg)
    }
}

// ---------------------------------------------------------------------------
// FilteredSubset
// ---------------------------------------------------------------------------

/// Records matching a selection, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSubset<'a> {
    records: Vec<&'a LaunchRecord>,
}

impl<'a> FilteredSubset<'a> {
    /// Keep the records of `records` that match `selection`.
    pub fn from_records<I>(records: I, selection: &Selection) -> Self
    where
        I: IntoIterator<Item = &'a LaunchRecord>,
    {
        FilteredSubset {
            records: records
                .into_iter()
                .filter(|r| selection.matches(r))
                .collect(),
        }
    }

    /// Subset made of the given rows of `dataset`, in the given order.
    pub fn from_indices(dataset: &'a LaunchDataset, indices: &[usize]) -> Self {
        let records = dataset.records();
        FilteredSubset {
            records: indices.iter().map(|&i| &records[i]).collect(),
        }
    }

    /// Apply a selection again to this subset.
    pub fn refilter(&self, selection: &Selection) -> Self {
        Self::from_records(self.records.iter().copied(), selection)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a LaunchRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Return the subset of `dataset` matching `selection`.
pub fn filter<'a>(dataset: &'a LaunchDataset, selection: &Selection) -> FilteredSubset<'a> {
    FilteredSubset::from_records(dataset.records(), selection)
}

/// Return indices of records that pass the selection.
pub fn filtered_indices(dataset: &LaunchDataset, selection: &Selection) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.matches(r))
        .map(|(i, _)| i)
        .collect()
}
