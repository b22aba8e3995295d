use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use crate::modules::cleaner::cache;
use crate::modules::common::config::SweepConfig;
use crate::modules::dispatcher::Dispatcher;
use crate::modules::presenter::ConsolePresenter;
use crate::modules::store::{CookieJar, KeyValueStore};

#[derive(Parser, Debug)]
pub struct StatusCommand {
    /// 同时显示本地存储统计
    #[arg(long)]
    pub detail: bool,
}

pub async fn execute(cmd: StatusCommand, config: &SweepConfig) -> Result<()> {
    let state = super::open_state(config)?;
    let dispatcher = Dispatcher::new(state.clone(), Arc::new(ConsolePresenter::default()), config);
    dispatcher.initialize().await;

    if cmd.detail {
        let guard = state.lock().await;
        let keys = guard.store.keys()?;
        let cache_keys = keys.iter().filter(|k| cache::is_cache_key(k)).count();
        let cookies = guard.store.live_cookies()?.len();

        println!("\n本地存储: {} 项 (缓存 {} 项)", keys.len(), cache_keys);
        println!("Cookies: {} 项", cookies);
        println!("存储目录: {}", config.resolve_storage_dir().display());
    }

    Ok(())
}
