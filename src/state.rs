use crate::color::ColorMap;
use crate::config::SliderConfig;
use crate::data::filter::{PayloadRange, Selection, SiteSelector};
use crate::data::model::LaunchDataset;
use crate::data::pipeline::{refresh, DashboardCharts};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Launch table, loaded once at startup.
    pub dataset: LaunchDataset,

    /// Payload slider bounds and step.
    pub slider: SliderConfig,

    /// Current site + payload range.
    pub selection: Selection,

    /// Charts for `selection` (rebuilt on every change).
    pub charts: DashboardCharts,

    /// Colours for the pie slices.
    pub outcome_colors: ColorMap,

    /// Colours for booster categories in the scatter chart.
    pub booster_colors: ColorMap,

    /// Status message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: LaunchDataset, slider: SliderConfig, selection: Selection) -> Self {
        let charts = refresh(&dataset, &selection);
        let outcome_colors = ColorMap::new(&charts.outcome.color_domain);
        let booster_colors = ColorMap::new(&charts.correlation.color_domain);

        let mut state = Self {
            dataset,
            slider,
            selection,
            charts,
            outcome_colors,
            booster_colors,
            status_message: None,
        };
        state.update_status();
        state
    }

    /// Recompute charts and visible rows after a selection change.
    pub fn refresh(&mut self) {
        self.charts = refresh(&self.dataset, &self.selection);
        if self.outcome_colors.domain() != self.charts.outcome.color_domain.as_slice() {
            self.outcome_colors = ColorMap::new(&self.charts.outcome.color_domain);
        }
        self.update_status();
    }

    fn update_status(&mut self) {
        self.status_message = self
            .visible_indices()
            .is_empty()
            .then(|| "No launches match the current selection".to_string());
    }

    /// Rows behind the current charts.
    pub fn visible_indices(&self) -> &[usize] {
        &self.charts.matched_indices
    }

    /// Change the selected site. Does nothing if it is already selected.
    pub fn set_site(&mut self, site: SiteSelector) {
        if self.selection.site != site {
            self.selection.site = site;
            self.refresh();
        }
    }

    /// Change the payload range; the ends may arrive in either order.
    pub fn set_payload_range(&mut self, a: f64, b: f64) {
        let range = PayloadRange::new(self.slider.clamp(a), self.slider.clamp(b));
        if self.selection.payload_range != range {
            self.selection.payload_range = range;
            self.refresh();
        }
    }

    /// Back to every site and the dataset's full payload span.
    pub fn reset(&mut self) {
        self.selection = Selection::new(
            SiteSelector::All,
            PayloadRange::new(
                self.slider.clamp(self.dataset.min_payload()),
                self.slider.clamp(self.dataset.max_payload()),
            ),
        );
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn state() -> AppState {
        let dataset = LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS", 500.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("KSC", 3000.0, Outcome::Success, "FT"),
            LaunchRecord::new("KSC", 7000.0, Outcome::Failure, "B4"),
            LaunchRecord::new("CCAFS", 9500.0, Outcome::Success, "B5"),
        ]);
        let selection = Selection::new(SiteSelector::All, PayloadRange::new(0.0, 10000.0));
        AppState::new(dataset, SliderConfig::default(), selection)
    }

    #[test]
    fn test_initial_state() {
        let s = state();
        assert_eq!(s.visible_indices(), vec![0, 1, 2, 3]);
        assert_eq!(s.charts.matched_records, 4);
        assert!(s.status_message.is_none());
    }

    #[test]
    fn test_set_site_refilters() {
        let mut s = state();
        s.set_site(SiteSelector::parse("KSC"));
        assert_eq!(s.visible_indices(), vec![1, 2]);
        assert_eq!(s.charts.outcome.title, "Total Success Launches for site KSC");
        assert_eq!(s.charts.correlation.points().len(), 2);
    }

    #[test]
    fn test_set_payload_range_clamps_and_orders() {
        let mut s = state();
        s.set_payload_range(20000.0, 2000.0);
        assert_eq!(s.selection.payload_range, PayloadRange::new(2000.0, 10000.0));
        assert_eq!(s.visible_indices(), vec![1, 2, 3]);
    }

    #[test]
    fn test_outcome_colours_stay_put_across_sites() {
        let mut s = state();
        s.set_site(SiteSelector::parse("KSC"));
        let success = s.outcome_colors.color_for("1");
        let failure = s.outcome_colors.color_for("0");

        s.set_site(SiteSelector::parse("CCAFS"));
        assert_eq!(s.charts.outcome.slices()[0].label, "0");
        assert_eq!(s.outcome_colors.color_for("1"), success);
        assert_eq!(s.outcome_colors.color_for("0"), failure);
    }

    #[test]
    fn test_empty_selection_sets_status_and_reset_clears_it() {
        let mut s = state();
        s.set_site(SiteSelector::parse("XYZ"));
        assert!(s.visible_indices().is_empty());
        assert!(s.status_message.is_some());

        s.reset();
        assert_eq!(s.selection.site, SiteSelector::All);
        // Dataset bounds are excluded by the strict filter.
        assert_eq!(s.visible_indices(), vec![1, 2]);
        assert!(s.status_message.is_none());
    }
}
