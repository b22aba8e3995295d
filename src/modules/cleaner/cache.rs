use crate::modules::common::error::SweepError;
use crate::modules::store::{BrowserStore, KeyValueStore};

/// 视为缓存/临时数据的键前缀
pub const CACHE_KEY_PREFIXES: &[&str] = &["cache_", "temp_"];

pub fn is_cache_key(key: &str) -> bool {
    CACHE_KEY_PREFIXES.iter().any(|prefix| key.starts_with(prefix))
}

/// 删除带缓存前缀的本地存储条目
pub fn clear_cache_entries(store: &mut dyn BrowserStore) -> Result<usize, SweepError> {
    let cache_keys: Vec<String> = store
        .keys()?
        .into_iter()
        .filter(|key| is_cache_key(key))
        .collect();

    for key in &cache_keys {
        store.remove(key)?;
    }

    tracing::info!("已清理浏览器缓存: {} 项", cache_keys.len());
    Ok(cache_keys.len())
}
