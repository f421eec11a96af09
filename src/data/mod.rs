/// Data layer: core types and the CSV discovery/aggregation pipeline.
///
/// Architecture:
/// ```text
///  results/**/*.csv (glob)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  pick x + first y candidate, drop bad rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ AggregatedSeries │  group by x, median per group, sort by x
///   └──────────────────┘
/// ```

pub mod loader;
pub mod model;
