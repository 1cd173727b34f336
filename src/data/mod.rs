/// Data layer: launch table, loading, filtering and chart specs.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, sites, payload bounds
///   └───────────────┘
///        │   Selection (site, payload range)
///        ▼
///   ┌──────────┐
///   │  filter   │  strict payload test + site match → FilteredSubset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  chart    │  outcome pie + payload scatter → ChartSpec
///   └──────────┘
/// ```
/// `pipeline` ties filter and chart together for one selection change.

pub mod chart;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
