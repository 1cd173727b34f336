//! launch-dash: explore launch outcomes by site and payload mass.
//!
//! The [`data`] module holds the filter-and-aggregate pipeline; everything
//! else is the egui shell around it.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
