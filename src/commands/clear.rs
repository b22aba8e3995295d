use anyhow::Result;
use clap::Parser;

use crate::modules::categories::selection::SelectionState;
use crate::modules::categories::Category;
use crate::modules::cleaner::models::ClearReport;
use crate::modules::common::config::SweepConfig;
use crate::modules::common::utils;
use crate::modules::dispatcher::DispatchOutcome;

#[derive(Parser, Debug)]
pub struct ClearAllCommand {
    /// 以 JSON 输出清理结果
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ClearSelectedCommand {
    /// 浏览器缓存
    #[arg(long)]
    pub cache: bool,

    /// Cookies
    #[arg(long)]
    pub cookies: bool,

    /// 本地存储（会同时清空清理历史）
    #[arg(long)]
    pub storage: bool,

    /// 浏览历史
    #[arg(long)]
    pub history: bool,

    /// 以逗号分隔的类别 (cache,cookies,storage,history)
    #[arg(long, value_delimiter = ',')]
    pub types: Vec<Category>,

    /// 以 JSON 输出清理结果
    #[arg(long)]
    pub json: bool,
}

impl ClearSelectedCommand {
    pub fn selection(&self) -> SelectionState {
        let mut selection = SelectionState {
            cache: self.cache,
            cookies: self.cookies,
            storage: self.storage,
            history: self.history,
        };
        for category in &self.types {
            selection.set(*category, true);
        }
        selection
    }
}

pub async fn execute_all(cmd: ClearAllCommand, config: &SweepConfig) -> Result<()> {
    let dispatcher = super::console_dispatcher(config, false)?;
    dispatcher.initialize().await;

    let outcome = dispatcher.clear_all().await;
    finish(outcome, cmd.json)
}

pub async fn execute_selected(cmd: ClearSelectedCommand, config: &SweepConfig) -> Result<()> {
    let dispatcher = super::console_dispatcher(config, false)?;
    dispatcher.set_selection(cmd.selection());
    dispatcher.initialize().await;

    let outcome = dispatcher.clear_selected().await;
    finish(outcome, cmd.json)
}

fn finish(outcome: DispatchOutcome, json: bool) -> Result<()> {
    match outcome {
        DispatchOutcome::Succeeded(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(())
        }
        // 状态行已经输出过，这里只决定退出码
        DispatchOutcome::Failed(message) | DispatchOutcome::Rejected(message) => {
            anyhow::bail!(message)
        }
        DispatchOutcome::Ignored => Ok(()),
    }
}

fn print_report(report: &ClearReport) {
    println!("\n--- 清理完成 ---");
    for outcome in &report.outcomes {
        println!(
            "  {:<10} {}",
            outcome.category.label(),
            if outcome.success {
                format!("{} 项", outcome.entries_removed)
            } else {
                outcome.error.clone().unwrap_or_default()
            }
        );
    }
    println!("  释放空间: {}", utils::format_size_mb(report.record.size_cleared_mb));
    println!("  剩余缓存: {}", utils::format_size_mb(report.size_after_mb));
}
