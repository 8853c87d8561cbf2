/// Data layer: core types, parsing, schema detection and cleaning.
///
/// Architecture:
/// ```text
///   raw CSV text
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  split text → Table (headers + rows)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  numeric columns → ColumnSelection (X, Y)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  sample   │  parse X/Y cells, keep finite pairs → Sample
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod sample;
pub mod schema;
