/// Data layer: core types, loading, reshaping, weighting, and export.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  first sheet → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  Interval | Plain layout → TidyTable
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ weighting  │  a · t^b → WeightedTable
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   view    │  drop last second, positive vs neutral, weight curve
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  CSV / Parquet
///   └──────────┘
/// ```

pub mod export;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod view;
pub mod weighting;
