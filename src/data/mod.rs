/// Data layer: core types, loading, reshaping, joining and filtering.
///
/// Architecture:
/// ```text
///  pop.csv   lex.csv   gni.csv   (or .parquet)
///     │         │         │
///     ▼         ▼         ▼
///   ┌──────────────────────────┐
///   │  loader                   │  file → WideTable (raw cells)
///   └──────────────────────────┘
///     │         │         │
///     ▼         ▼         ▼
///   ┌──────────────────────────┐
///   │  reshape                  │  melt + lenient parse → LongTable
///   └──────────────────────────┘
///                 │
///                 ▼
///   ┌──────────────────────────┐
///   │  join                     │  inner join on (country, year) → UnifiedTable
///   └──────────────────────────┘
///                 │
///                 ▼
///   ┌──────────────────────────┐
///   │  filter / stats           │  selection → FilteredView → describe
///   └──────────────────────────┘
/// ```

pub mod error;
pub mod filter;
pub mod join;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod reshape;
pub mod stats;
