use crate::modules::common::error::SweepError;
use crate::modules::store::{BrowserStore, KeyValueStore};

/// 清空整个本地存储（清理历史也在其中）
pub fn wipe_local_storage(store: &mut dyn BrowserStore) -> Result<usize, SweepError> {
    let count = store.keys()?.len();
    store.clear()?;
    tracing::info!("已清空本地存储: {} 项", count);
    Ok(count)
}
