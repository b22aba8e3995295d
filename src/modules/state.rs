use crate::modules::gauge::CacheSizeGauge;
use crate::modules::store::BrowserStore;

/// 应用状态：本地存储与缓存大小
pub struct AppState {
    pub store: Box<dyn BrowserStore>,
    pub gauge: CacheSizeGauge,
}

impl AppState {
    pub fn new(store: Box<dyn BrowserStore>, gauge: CacheSizeGauge) -> Self {
        Self { store, gauge }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("gauge", &self.gauge)
            .finish_non_exhaustive()
    }
}
