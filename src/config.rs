//! Command-line configuration.
//!
//! ```text
//! launch-dash [DATA] [--site SITE] [--payload LOW HIGH]
//!             [--slider-min N] [--slider-max N] [--slider-step N] [--export]
//! ```
//!
//! The slider defaults to 0 to 10000 kg in steps of 1000.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::data::filter::{PayloadRange, Selection, SiteSelector, ALL_SITES};
use crate::data::model::LaunchDataset;

/// Errors in user-supplied configuration.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("slider minimum ({min}) must be below its maximum ({max})")]
    EmptySliderRange { min: f64, max: f64 },

    #[error("slider step must be positive, got {0}")]
    InvalidStep(f64),
}

/// launch-dash - explore launch outcomes by site and payload mass
#[derive(Parser, Debug)]
#[command(name = "launch-dash", author, version, about, long_about = None)]
pub struct Cli {
    /// Launch table to load (.csv, .json or .parquet)
    #[arg(default_value = "spacex_launch_dash.csv")]
    pub data: PathBuf,

    /// Initially selected launch site (`ALL` for every site)
    #[arg(long, default_value = ALL_SITES)]
    pub site: String,

    /// Initial payload range in kg (default: dataset min and max)
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"])]
    pub payload: Option<Vec<f64>>,

    /// Lower bound of the payload slider
    #[arg(long, default_value_t = 0.0)]
    pub slider_min: f64,

    /// Upper bound of the payload slider
    #[arg(long, default_value_t = 10000.0)]
    pub slider_max: f64,

    /// Step of the payload slider
    #[arg(long, default_value_t = 1000.0)]
    pub slider_step: f64,

    /// Print the charts for the initial selection as JSON and exit
    #[arg(long)]
    pub export: bool,
}

impl Cli {
    pub fn slider(&self) -> Result<SliderConfig, ConfigError> {
        SliderConfig::new(self.slider_min, self.slider_max, self.slider_step)
    }

    /// Selection the dashboard opens with.
    ///
    /// Without `--payload` the range spans the dataset's payload bounds.
    /// Either way both ends are clamped into the slider's bounds.
    pub fn initial_selection(&self, dataset: &LaunchDataset, slider: &SliderConfig) -> Selection {
        let (low, high) = match self.payload.as_deref() {
            Some([low, high]) => (*low, *high),
            _ => (dataset.min_payload(), dataset.max_payload()),
        };
        Selection::new(
            SiteSelector::parse(&self.site),
            PayloadRange::new(slider.clamp(low), slider.clamp(high)),
        )
    }
}

/// Bounds and step of the payload range control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10000.0,
            step: 1000.0,
        }
    }
}

impl SliderConfig {
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, ConfigError> {
        if !(min < max) {
            return Err(ConfigError::EmptySliderRange { min, max });
        }
        if !(step > 0.0) {
            return Err(ConfigError::InvalidStep(step));
        }
        Ok(Self { min, max, step })
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Five labelled tick marks: both ends and the quarter points.
    pub fn marks(&self) -> Vec<f64> {
        let span = self.max - self.min;
        (0..=4).map(|i| self.min + span * i as f64 / 4.0).collect()
    }
}
