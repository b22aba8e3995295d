use anyhow::Result;
use clap::Parser;

use crate::modules::categories::ClearMode;
use crate::modules::common::config::SweepConfig;
use crate::modules::common::utils;
use crate::modules::ledger::{self, models::HistoryRecord};

#[derive(Parser, Debug)]
pub struct HistoryCommand {
    /// 输出格式 (table/json)
    #[arg(long, default_value = "table")]
    pub format: String,

    /// 只显示最近 N 条
    #[arg(short, long)]
    pub limit: Option<usize>,
}

pub async fn execute(cmd: HistoryCommand, config: &SweepConfig) -> Result<()> {
    let state = super::open_state(config)?;
    let mut records = {
        let guard = state.lock().await;
        ledger::read_all(guard.store.as_ref())?
    };

    if let Some(limit) = cmd.limit {
        records.truncate(limit);
    }

    match cmd.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&records)?),
        _ => print_table(&records),
    }

    Ok(())
}

fn print_table(records: &[HistoryRecord]) {
    if records.is_empty() {
        println!("暂无清理记录");
        return;
    }

    println!("\n{}", "=".repeat(80));
    println!("{:<22} {:<8} {:<36} {:<10}", "时间", "方式", "类别", "释放");
    println!("{}", "=".repeat(80));

    for record in records {
        let mode = match record.mode {
            ClearMode::All => "全部",
            ClearMode::Selected => "选择",
        };
        let categories = if record.categories.is_empty() {
            "所有类别".to_string()
        } else {
            crate::modules::categories::join_labels(&record.categories)
        };

        println!(
            "{:<22} {:<8} {:<36} {:<10}",
            utils::format_local_time(&record.timestamp),
            mode,
            utils::truncate_string(&categories, 34),
            utils::format_size_mb(record.size_cleared_mb)
        );
    }

    println!("{}", "=".repeat(80));
    println!("总计: {} 条记录\n", records.len());
}
