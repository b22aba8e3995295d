pub mod cache;
pub mod cookies;
pub mod history;
pub mod models;
pub mod storage;

use crate::modules::categories::{self, Category, ClearMode};
use crate::modules::common::error::SweepError;
use crate::modules::gauge::PER_CATEGORY_MB;
use crate::modules::ledger::{self, models::HistoryRecord};
use crate::modules::state::AppState;
use crate::modules::store::BrowserStore;
use models::{CategoryOutcome, ClearReport};

/// 清理单个类别
pub fn clear_category(
    store: &mut dyn BrowserStore,
    category: Category,
) -> Result<CategoryOutcome, SweepError> {
    let removed = match category {
        Category::Cache => cache::clear_cache_entries(store)?,
        Category::Cookies => cookies::expire_cookies(store)?,
        Category::Storage => storage::wipe_local_storage(store)?,
        Category::History => history::clear_browsing_history(),
    };
    Ok(CategoryOutcome::succeeded(category, removed))
}

/// 执行清理并记录历史
///
/// 每个类别独立执行，一个类别失败不会中断其余类别；只要有失败，
/// 整次清理视为失败，不写历史也不修改缓存大小。历史在清空本地存储
/// 之后写入，因此清理 `storage` 后历史中只剩本次记录。
pub fn execute(
    state: &mut AppState,
    mode: ClearMode,
    selected: &[Category],
) -> Result<ClearReport, SweepError> {
    let targets = categories::applicable(mode, selected);
    let mut outcomes = Vec::with_capacity(targets.len());

    for category in &targets {
        match clear_category(state.store.as_mut(), *category) {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                tracing::error!("清理 {} 失败: {}", category.label(), e);
                outcomes.push(CategoryOutcome::failed(*category, e.to_string()));
            }
        }
    }

    let failures: Vec<String> = outcomes.iter().filter_map(|o| o.error.clone()).collect();
    if !failures.is_empty() {
        return Err(SweepError::Execution(failures.join("; ")));
    }

    let size_cleared_mb = match mode {
        ClearMode::All => state.gauge.current_mb(),
        ClearMode::Selected => PER_CATEGORY_MB * targets.len() as u64,
    };

    let record = HistoryRecord::new(mode, targets.clone(), size_cleared_mb);
    ledger::append(state.store.as_mut(), record.clone())?;

    match mode {
        ClearMode::All => state.gauge.after_clear_all(),
        ClearMode::Selected => state.gauge.after_clear_selected(targets.len()),
    }

    Ok(ClearReport {
        record,
        outcomes,
        size_after_mb: state.gauge.current_mb(),
    })
}
