use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::categories::{Category, ClearMode};

/// 一次成功清理的记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub mode: ClearMode,
    /// 全部清理时为空
    #[serde(rename = "selectedTypes", default)]
    pub categories: Vec<Category>,
    #[serde(rename = "sizeCleared", default)]
    pub size_cleared_mb: u64,
}

impl HistoryRecord {
    pub fn new(mode: ClearMode, categories: Vec<Category>, size_cleared_mb: u64) -> Self {
        let categories = match mode {
            ClearMode::All => Vec::new(),
            ClearMode::Selected => categories,
        };
        Self {
            timestamp: Utc::now(),
            mode,
            categories,
            size_cleared_mb,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
