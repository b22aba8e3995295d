use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::modules::common::config::SweepConfig;
use crate::modules::common::utils;
use crate::modules::store::cookies::format_http_date;
use crate::modules::store::{CookieJar, KeyValueStore};

#[derive(Parser, Debug)]
pub struct StoreCommand {
    #[command(subcommand)]
    pub action: StoreAction,
}

#[derive(Subcommand, Debug)]
pub enum StoreAction {
    /// 写入本地存储条目 (cache_/temp_ 前缀视为缓存)
    Set { key: String, value: String },

    /// 删除本地存储条目
    Remove { key: String },

    /// 按 `name=value; expires=...; path=/` 写入 Cookie
    Cookie { assignment: String },

    /// 列出本地存储与 Cookies
    List {
        /// 包括已过期的 Cookie
        #[arg(long)]
        all: bool,
    },
}

pub async fn execute(cmd: StoreCommand, config: &SweepConfig) -> Result<()> {
    let state = super::open_state(config)?;
    let mut guard = state.lock().await;
    let store = guard.store.as_mut();

    match cmd.action {
        StoreAction::Set { key, value } => {
            store.set(&key, &value)?;
            tracing::info!("已写入本地存储: {}", key);
        }
        StoreAction::Remove { key } => {
            store.remove(&key)?;
            tracing::info!("已删除本地存储: {}", key);
        }
        StoreAction::Cookie { assignment } => {
            store.assign_cookie(&assignment)?;
            tracing::info!("已写入 Cookie: {}", assignment);
        }
        StoreAction::List { all } => {
            println!("本地存储:");
            for key in store.keys()? {
                let value = store.get(&key)?.unwrap_or_default();
                println!("  {:<30} {}", key, utils::truncate_string(&value, 40));
            }

            println!("\nCookies:");
            let cookies = if all {
                store.cookies()?
            } else {
                store.live_cookies()?
            };
            for cookie in cookies {
                println!(
                    "  {:<20} {:<20} path={} expires={}",
                    cookie.name,
                    utils::truncate_string(&cookie.value, 18),
                    cookie.path,
                    cookie
                        .expires
                        .map(|e| format_http_date(&e))
                        .unwrap_or_else(|| "会话".to_string())
                );
            }
        }
    }

    Ok(())
}
