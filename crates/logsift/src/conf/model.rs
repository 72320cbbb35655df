//! Model — AnalyzerConfig.

use serde::{Deserialize, Serialize};

/// Tuning parameters accepted by the core. These are embedding-level
/// knobs, not user-facing flags; the calling tool decides how (or
/// whether) to expose them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Lines sampled for format classification
    pub classify_sample_size: usize,
    /// Lines handed to the heuristic splitter under the Unknown format
    pub heuristic_sample_size: usize,
    /// Delimiter priority for the heuristic splitter
    pub delimiters: Vec<char>,
    /// Display-only soft-wrap width for long field values
    pub wrap_width: usize,
    /// Cutoff for top-N ranking views
    pub top_n: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            classify_sample_size: 10,
            heuristic_sample_size: 100,
            delimiters: vec!['|', ',', ';', '\t'],
            wrap_width: 60,
            top_n: 5,
        }
    }
}

impl AnalyzerConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.classify_sample_size == 0 {
            return Err("classify_sample_size must be > 0".to_string());
        }
        if self.heuristic_sample_size == 0 {
            return Err("heuristic_sample_size must be > 0".to_string());
        }
        if self.delimiters.is_empty() {
            return Err("delimiters must not be empty".to_string());
        }
        if self.wrap_width == 0 {
            return Err("wrap_width must be > 0".to_string());
        }
        Ok(())
    }
}
