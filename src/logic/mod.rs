pub mod aggregator;
pub mod alerts;
pub mod combiner;
pub mod context;
pub mod engine;
pub mod rules;
pub mod subscores;
pub mod thresholds;

pub use aggregator::FieldSnapshotAggregator;
pub use engine::FieldScoreEngine;
pub use thresholds::ScoringThresholds;
