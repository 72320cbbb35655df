//! Configuration surface of the analysis core.

pub mod model;

pub use model::AnalyzerConfig;
