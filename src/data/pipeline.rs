use serde::Serialize;

use super::chart::{build_outcome_chart, build_scatter_chart, ChartSpec};
use super::filter::{filtered_indices, FilteredSubset, Selection};
use super::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Selection change → filtered subset → both charts
// ---------------------------------------------------------------------------

/// Everything a renderer needs after one selection change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub selection: Selection,
    /// Size of the filtered subset behind the scatter chart.
    pub matched_records: usize,
    /// Dataset rows of that subset, in order.
    #[serde(skip)]
    pub matched_indices: Vec<usize>,
    pub outcome: ChartSpec,
    pub correlation: ChartSpec,
}

/// Run the filter and both chart builders for one selection.
pub fn refresh(dataset: &LaunchDataset, selection: &Selection) -> DashboardCharts {
    let matched_indices = filtered_indices(dataset, selection);
    let subset = FilteredSubset::from_indices(dataset, &matched_indices);
    let outcome = build_outcome_chart(dataset, &subset, selection);
    let correlation = build_scatter_chart(dataset, &subset, selection);

    log::debug!(
        "site={} range=({}, {}): {} of {} records, {} pie slices",
        selection.site,
        selection.payload_range.low,
        selection.payload_range.high,
        subset.len(),
        dataset.len(),
        outcome.slices().len()
    );

    DashboardCharts {
        selection: selection.clone(),
        matched_records: subset.len(),
        matched_indices,
        outcome,
        correlation,
    }
}

/// Entry point for whatever hosts the dashboard: returns the
/// outcome-distribution and payload-correlation charts.
pub fn on_selection_changed(
    dataset: &LaunchDataset,
    selection: &Selection,
) -> (ChartSpec, ChartSpec) {
    let charts = refresh(dataset, selection);
    (charts.outcome, charts.correlation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::chart::{ScatterPoint, Slice};
    use crate::data::filter::{PayloadRange, SiteSelector};
    use crate::data::model::{LaunchRecord, Outcome};

    fn selection(site: &str, low: f64, high: f64) -> Selection {
        Selection::new(SiteSelector::parse(site), PayloadRange::new(low, high))
    }

    fn two_site_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS", 0.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("KSC", 3000.0, Outcome::Success, "FT"),
            LaunchRecord::new("CCAFS", 4500.0, Outcome::Success, "FT"),
            LaunchRecord::new("KSC", 7000.0, Outcome::Failure, "B4"),
        ])
    }

    #[test]
    fn test_all_sites_groups_full_dataset_and_scatters_strict_range() {
        let ds = two_site_dataset();
        let (pie, scatter) = on_selection_changed(&ds, &selection("ALL", 0.0, 10000.0));

        assert_eq!(
            pie.slices().to_vec(),
            vec![
                Slice { label: "CCAFS".into(), count: 1 },
                Slice { label: "KSC".into(), count: 1 },
            ]
        );
        // 0 kg sits on the lower bound and is dropped from the scatter.
        let xs: Vec<f64> = scatter.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3000.0, 4500.0, 7000.0]);
    }

    #[test]
    fn test_single_site_within_range() {
        let ds = two_site_dataset();
        let charts = refresh(&ds, &selection("KSC", 2000.0, 6000.0));

        assert_eq!(charts.matched_records, 1);
        assert_eq!(
            charts.outcome.slices().to_vec(),
            vec![Slice { label: "1".into(), count: 1 }]
        );
        assert_eq!(
            charts.correlation.points().to_vec(),
            vec![ScatterPoint { x: 3000.0, y: 1, color: "FT".into() }]
        );
    }

    #[test]
    fn test_range_without_records_gives_empty_charts() {
        let ds = two_site_dataset();
        let charts = refresh(&ds, &selection("CCAFS", 9000.0, 9500.0));

        assert_eq!(charts.matched_records, 0);
        assert!(charts.outcome.is_empty());
        assert_eq!(charts.outcome.total(), 0);
        assert!(charts.correlation.is_empty());
    }

    #[test]
    fn test_unknown_site_completes_without_error() {
        let ds = two_site_dataset();
        let charts = refresh(&ds, &selection("XYZ", 0.0, 10000.0));

        assert_eq!(charts.matched_records, 0);
        assert!(charts.outcome.is_empty());
        assert!(charts.correlation.is_empty());
        assert_eq!(charts.outcome.title, "Total Success Launches for site XYZ");
    }

    #[test]
    fn test_matched_indices_are_the_charted_records() {
        let ds = two_site_dataset();
        let charts = refresh(&ds, &selection("ALL", 0.0, 10000.0));

        assert_eq!(charts.matched_indices, vec![1, 2, 3]);
        assert_eq!(charts.matched_records, charts.matched_indices.len());
        let xs: Vec<f64> = charts.correlation.points().iter().map(|p| p.x).collect();
        let row_xs: Vec<f64> = charts
            .matched_indices
            .iter()
            .map(|&i| ds.records()[i].payload_mass_kg)
            .collect();
        assert_eq!(xs, row_xs);
    }

    #[test]
    fn test_refresh_is_repeatable() {
        let ds = two_site_dataset();
        let sel = selection("CCAFS", 100.0, 9000.0);
        assert_eq!(refresh(&ds, &sel), refresh(&ds, &sel));
    }

    #[test]
    fn test_refresh_serializes_selection_and_charts() {
        let ds = two_site_dataset();
        let value = serde_json::to_value(refresh(&ds, &selection("ALL", 0.0, 10000.0))).unwrap();
        assert_eq!(value["matched_records"], 3);
        assert_eq!(value["selection"]["payload_range"]["high"], 10000.0);
        assert_eq!(value["correlation"]["kind"], "scatter");
    }
}
