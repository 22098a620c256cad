/// Data layer: table model, loading, row filtering and export.
///
/// Architecture:
/// ```text
///  posts.csv (any encoding)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode + parse → RecordTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RecordTable  │  columns, rows of Value
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  row predicates → kept indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  RecordTable → delimited file
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
