//! 运行参数
//!
//! 进度节奏与存储位置都可以通过命令行或环境变量覆盖

use std::path::PathBuf;
use std::time::Duration;

use super::error::SweepError;

pub const DEFAULT_TICK_STEP: u8 = 5;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;

const APP_DIR: &str = "cache-sweep";

#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// 每次进度推进的百分比
    pub tick_step: u8,
    pub tick_interval: Duration,
    /// 清理完成后的收尾延迟
    pub settle_delay: Duration,
    /// 为空时启动时随机生成
    pub initial_size_mb: Option<u64>,
    pub storage_dir: Option<PathBuf>,
    /// 全局互斥：任一清理进行中时拒绝另一个命令
    pub exclusive_operations: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            tick_step: DEFAULT_TICK_STEP,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            initial_size_mb: None,
            storage_dir: None,
            exclusive_operations: true,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.tick_step == 0 || self.tick_step > 100 {
            return Err(SweepError::InvalidInput(format!(
                "进度步长必须在 1-100 之间: {}",
                self.tick_step
            )));
        }
        if self.tick_interval.is_zero() {
            return Err(SweepError::InvalidInput("进度间隔不能为 0".to_string()));
        }
        Ok(())
    }

    /// 存储目录，未指定时使用本地数据目录
    pub fn resolve_storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.resolve_storage_dir().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SweepConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_or_oversized_step_is_rejected() {
        let zero = SweepConfig {
            tick_step: 0,
            ..SweepConfig::default()
        };
        assert!(matches!(zero.validate(), Err(SweepError::InvalidInput(_))));

        let oversized = SweepConfig {
            tick_step: 101,
            ..SweepConfig::default()
        };
        assert!(oversized.validate().is_err());

        let zero_interval = SweepConfig {
            tick_interval: Duration::ZERO,
            ..SweepConfig::default()
        };
        assert!(zero_interval.validate().is_err());
    }

    #[test]
    fn explicit_storage_dir_wins() {
        let config = SweepConfig {
            storage_dir: Some(PathBuf::from("/tmp/sweep")),
            ..SweepConfig::default()
        };
        assert_eq!(config.resolve_storage_dir(), PathBuf::from("/tmp/sweep"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/sweep/logs"));
    }
}
