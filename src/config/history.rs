//! History ledger configuration

use serde::{Deserialize, Serialize};

/// How many settled submissions the session keeps for review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 5 }
    }
}
