//! 缓存占用估算
//!
//! 显示用的模拟数值，不对应真实磁盘占用

use rand::Rng;
use serde::{Deserialize, Serialize};

/// 进度条满刻度
pub const NOMINAL_MAX_MB: u64 = 500;

/// 每个选中类别清理后扣减的大小
pub const PER_CATEGORY_MB: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSizeGauge {
    current_mb: u64,
}

impl CacheSizeGauge {
    pub fn new(current_mb: u64) -> Self {
        Self { current_mb }
    }

    /// 启动时随机生成 [100, 600) 的初始值
    pub fn random() -> Self {
        Self::new(rand::rng().random_range(100..600))
    }

    pub fn current_mb(&self) -> u64 {
        self.current_mb
    }

    /// 未做截断，超过满刻度时大于 100
    pub fn percent(&self) -> f64 {
        self.current_mb as f64 * 100.0 / NOMINAL_MAX_MB as f64
    }

    pub fn set_size(&mut self, new_size_mb: u64) {
        tracing::debug!("缓存大小: {} MB -> {} MB", self.current_mb, new_size_mb);
        self.current_mb = new_size_mb;
    }

    pub fn after_clear_all(&mut self) {
        self.set_size(0);
    }

    pub fn after_clear_selected(&mut self, category_count: usize) {
        let freed = PER_CATEGORY_MB.saturating_mul(category_count as u64);
        self.set_size(self.current_mb.saturating_sub(freed));
    }
}
