use std::collections::HashMap;

use serde::Serialize;

use super::filter::{FilteredSubset, Selection, SiteSelector};
use super::model::{
    LaunchDataset, Outcome, BOOSTER_CATEGORY_COLUMN, CLASS_COLUMN, PAYLOAD_COLUMN, SITE_COLUMN,
};

// ---------------------------------------------------------------------------
// ChartSpec – declarative, renderer-independent chart description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Scatter,
}

/// Which source columns feed which visual channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldBindings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<&'static str>,
    /// Column providing the slice labels of a pie.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<&'static str>,
    /// Column summed per slice; `None` means one per record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
}

/// One pie slice: category label and its non-negative total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: u8,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartData {
    Slices(Vec<Slice>),
    Points(Vec<ScatterPoint>),
}

/// A chart ready to hand to a renderer. Built fresh for every selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub bindings: FieldBindings,
    /// Every colour category, in the order colours should be assigned.
    pub color_domain: Vec<String>,
    pub data: ChartData,
}

impl ChartSpec {
    pub fn slices(&self) -> &[Slice] {
        match &self.data {
            ChartData::Slices(s) => s,
            ChartData::Points(_) => &[],
        }
    }

    pub fn points(&self) -> &[ScatterPoint] {
        match &self.data {
            ChartData::Points(p) => p,
            ChartData::Slices(_) => &[],
        }
    }

    /// Total of all slice counts (zero for scatter charts).
    pub fn total(&self) -> u64 {
        self.slices().iter().map(|s| s.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        match &self.data {
            ChartData::Slices(s) => s.is_empty(),
            ChartData::Points(p) => p.is_empty(),
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Pie chart of launch outcomes.
///
/// With every site selected the slices are per-site success totals over the
/// whole dataset; the payload range does not apply. With one site selected
/// the slices count the subset's records per outcome value.
pub fn build_outcome_chart(
    dataset: &LaunchDataset,
    subset: &FilteredSubset<'_>,
    selection: &Selection,
) -> ChartSpec {
    match &selection.site {
        SiteSelector::All => {
            let slices = group_in_order(
                dataset
                    .records()
                    .iter()
                    .map(|r| (r.site.clone(), u64::from(r.outcome.flag()))),
            );
            ChartSpec {
                kind: ChartKind::Pie,
                title: "Total Success Launches By Site".to_string(),
                bindings: FieldBindings {
                    names: Some(SITE_COLUMN),
                    values: Some(CLASS_COLUMN),
                    color: Some(SITE_COLUMN),
                    ..Default::default()
                },
                color_domain: dataset.distinct_sites().to_vec(),
                data: ChartData::Slices(slices),
            }
        }
        SiteSelector::Site(site) => {
            let slices = group_in_order(subset.iter().map(|r| (r.outcome.to_string(), 1)));
            ChartSpec {
                kind: ChartKind::Pie,
                title: format!("Total Success Launches for site {site}"),
                bindings: FieldBindings {
                    names: Some(CLASS_COLUMN),
                    color: Some(CLASS_COLUMN),
                    ..Default::default()
                },
                color_domain: [Outcome::Failure, Outcome::Success]
                    .iter()
                    .map(|o| o.to_string())
                    .collect(),
                data: ChartData::Slices(slices),
            }
        }
    }
}

/// Scatter chart of payload mass against outcome, one point per subset record.
pub fn build_scatter_chart(
    dataset: &LaunchDataset,
    subset: &FilteredSubset<'_>,
    selection: &Selection,
) -> ChartSpec {
    let scope = match &selection.site {
        SiteSelector::All => "all sites".to_string(),
        SiteSelector::Site(site) => site.clone(),
    };

    let points = subset
        .iter()
        .map(|r| ScatterPoint {
            x: r.payload_mass_kg,
            y: r.outcome.flag(),
            color: r.booster_category.clone(),
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Scatter,
        title: format!("Correlation between Payload (kg) and Launch Success for {scope}"),
        bindings: FieldBindings {
            x: Some(PAYLOAD_COLUMN),
            y: Some(CLASS_COLUMN),
            color: Some(BOOSTER_CATEGORY_COLUMN),
            ..Default::default()
        },
        color_domain: dataset.distinct_booster_categories().to_vec(),
        data: ChartData::Points(points),
    }
}

/// Sum weights per key, keeping keys in order of first appearance.
fn group_in_order(items: impl Iterator<Item = (String, u64)>) -> Vec<Slice> {
    let mut slices: Vec<Slice> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (label, weight) in items {
        match index.get(&label) {
            Some(&i) => slices[i].count += weight,
            None => {
                index.insert(label.clone(), slices.len());
                slices.push(Slice { label, count: weight });
            }
        }
    }
    slices
}
