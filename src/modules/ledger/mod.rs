//! 清理历史
//!
//! 以 JSON 数组保存在本地存储的 `clearHistory` 键下，最新的在最前

pub mod models;

use crate::modules::common::error::SweepError;
use crate::modules::store::KeyValueStore;
use models::HistoryRecord;

pub const HISTORY_KEY: &str = "clearHistory";

/// 读取全部历史，缺失或损坏时视为空
///
/// 单条无法识别的记录会被跳过，其余记录照常返回
pub fn read_all<S>(store: &S) -> Result<Vec<HistoryRecord>, SweepError>
where
    S: KeyValueStore + ?Sized,
{
    let records = read_raw(store)?
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("跳过无法识别的清理历史第 {} 条: {}", index, e);
                None
            }
        })
        .collect();
    Ok(records)
}

/// 追加记录到最前
///
/// 已有条目按原样写回，包括无法识别的条目
pub fn append<S>(store: &mut S, record: HistoryRecord) -> Result<(), SweepError>
where
    S: KeyValueStore + ?Sized,
{
    let mut history = read_raw(&*store)?;
    history.insert(0, serde_json::to_value(&record)?);

    let content = serde_json::to_string(&history)?;
    store.set(HISTORY_KEY, &content)?;

    tracing::debug!("清理历史已更新，共 {} 条", history.len());
    Ok(())
}

pub fn most_recent<S>(store: &S) -> Result<Option<HistoryRecord>, SweepError>
where
    S: KeyValueStore + ?Sized,
{
    Ok(read_all(store)?.into_iter().next())
}

fn read_raw<S>(store: &S) -> Result<Vec<serde_json::Value>, SweepError>
where
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(HISTORY_KEY)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
        Ok(values) => Ok(values),
        Err(e) => {
            tracing::warn!("清理历史已损坏，按空历史处理: {}", e);
            Ok(Vec::new())
        }
    }
}
