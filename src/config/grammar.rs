use super::traits::ConfigSection;
use crate::engines::generation::grammar::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPANSIONS};
use crate::error::GaCoreError;
use crate::types::MAX_NESTING_DEPTH;
use serde::{Deserialize, Serialize};

/// Limits past which a guided build is treated as runaway recursion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    pub max_depth: usize,
    pub max_expansions: usize,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

impl ConfigSection for GrammarConfig {
    fn section_name() -> &'static str {
        "grammar"
    }

    fn validate(&self) -> Result<(), GaCoreError> {
        if self.max_depth == 0 || self.max_expansions == 0 {
            return Err(GaCoreError::Configuration(
                "Grammar limits must be at least 1".to_string()
            ));
        }
        if self.max_depth > MAX_NESTING_DEPTH {
            return Err(GaCoreError::Configuration(format!(
                "Grammar max_depth must be at most {}, got {}",
                MAX_NESTING_DEPTH, self.max_depth
            )));
        }
        Ok(())
    }
}
