/// Regression layer: scaling, optimisation, training and scoring.
///
/// ```text
///   Sample ──► scale ──► trainer (Adam) ──► predictions ──► metrics
///                 ▲                              │
///                 └──────── invert Y ◄───────────┘
/// ```

pub mod metrics;
pub mod optimizer;
pub mod scale;
pub mod trainer;
