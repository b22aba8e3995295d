pub mod clear;
pub mod history;
pub mod interactive;
pub mod status;
pub mod store;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Subcommand};
use tokio::sync::Mutex;

use crate::modules::common::config::{
    SweepConfig, DEFAULT_SETTLE_DELAY_MS, DEFAULT_TICK_INTERVAL_MS, DEFAULT_TICK_STEP,
};
use crate::modules::dispatcher::Dispatcher;
use crate::modules::gauge::CacheSizeGauge;
use crate::modules::presenter::ConsolePresenter;
use crate::modules::state::AppState;
use crate::modules::store::SqliteStore;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 清理所有缓存数据
    ClearAll(clear::ClearAllCommand),

    /// 清理选中的类别
    Clear(clear::ClearSelectedCommand),

    /// 查看清理历史
    History(history::HistoryCommand),

    /// 查看缓存大小与上次清理时间
    Status(status::StatusCommand),

    /// 查看或写入本地存储与 Cookies
    Store(store::StoreCommand),

    /// 交互模式，支持快捷键
    Interactive(interactive::InteractiveCommand),
}

/// 全局运行参数
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// 本地存储目录
    #[arg(long, global = true, env = "CACHE_SWEEP_STORAGE_DIR")]
    pub storage_dir: Option<PathBuf>,

    /// 进度推进间隔 (毫秒)
    #[arg(
        long,
        global = true,
        env = "CACHE_SWEEP_TICK_MS",
        default_value_t = DEFAULT_TICK_INTERVAL_MS
    )]
    pub tick_ms: u64,

    /// 每次推进的百分比
    #[arg(long, global = true, env = "CACHE_SWEEP_STEP", default_value_t = DEFAULT_TICK_STEP)]
    pub step: u8,

    /// 清理完成后的收尾延迟 (毫秒)
    #[arg(
        long,
        global = true,
        env = "CACHE_SWEEP_SETTLE_MS",
        default_value_t = DEFAULT_SETTLE_DELAY_MS
    )]
    pub settle_ms: u64,

    /// 初始缓存大小 (MB)，不指定则随机
    #[arg(long, global = true, env = "CACHE_SWEEP_INITIAL_SIZE")]
    pub initial_size: Option<u64>,

    /// 允许两个清理命令同时进行
    #[arg(long, global = true)]
    pub allow_overlap: bool,
}

impl GlobalArgs {
    pub fn to_config(&self) -> SweepConfig {
        SweepConfig {
            tick_step: self.step,
            tick_interval: Duration::from_millis(self.tick_ms),
            settle_delay: Duration::from_millis(self.settle_ms),
            initial_size_mb: self.initial_size,
            storage_dir: self.storage_dir.clone(),
            exclusive_operations: !self.allow_overlap,
        }
    }
}

/// 打开本地存储并初始化缓存大小
pub fn open_state(config: &SweepConfig) -> Result<Arc<Mutex<AppState>>> {
    let store = SqliteStore::open(&config.resolve_storage_dir())?;
    let gauge = config
        .initial_size_mb
        .map(CacheSizeGauge::new)
        .unwrap_or_else(CacheSizeGauge::random);
    Ok(Arc::new(Mutex::new(AppState::new(Box::new(store), gauge))))
}

/// 构造输出到终端的分发器
pub fn console_dispatcher(config: &SweepConfig, show_controls: bool) -> Result<Arc<Dispatcher>> {
    let state = open_state(config)?;
    let presenter = Arc::new(ConsolePresenter { show_controls });
    Ok(Arc::new(Dispatcher::new(state, presenter, config)))
}
