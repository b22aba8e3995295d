use serde::{Deserialize, Serialize};

use crate::modules::categories::Category;
use crate::modules::ledger::models::HistoryRecord;

/// 单个类别的清理结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOutcome {
    pub category: Category,
    pub success: bool,
    pub error: Option<String>,
    /// 删除或过期的条目数
    pub entries_removed: usize,
}

impl CategoryOutcome {
    pub fn succeeded(category: Category, entries_removed: usize) -> Self {
        Self {
            category,
            success: true,
            error: None,
            entries_removed,
        }
    }

    pub fn failed(category: Category, error: String) -> Self {
        Self {
            category,
            success: false,
            error: Some(error),
            entries_removed: 0,
        }
    }
}

/// 一次成功清理的汇总
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearReport {
    pub record: HistoryRecord,
    pub outcomes: Vec<CategoryOutcome>,
    pub size_after_mb: u64,
}
