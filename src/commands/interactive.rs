//! 交互模式
//!
//! 从标准输入读取组合键或勾选指令，清理任务在后台进行，
//! 进行中仍可继续输入

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::modules::categories::Category;
use crate::modules::common::config::SweepConfig;
use crate::modules::dispatcher::KeyEvent;

#[derive(Parser, Debug)]
pub struct InteractiveCommand {
    /// 预先勾选的类别
    #[arg(long, value_delimiter = ',')]
    pub check: Vec<Category>,
}

const HELP: &str = "\
可用输入:
  ctrl+shift+c          清理所有缓存
  ctrl+shift+x          清理选中项
  check <类别>          勾选 (cache/cookies/storage/history)
  uncheck <类别>        取消勾选
  selection             查看当前勾选
  quit                  退出";

pub async fn execute(cmd: InteractiveCommand, config: &SweepConfig) -> Result<()> {
    let dispatcher = super::console_dispatcher(config, true)?;
    for category in &cmd.check {
        dispatcher.set_checked(*category, true);
    }
    dispatcher.initialize().await;
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        let mut words = input.split_whitespace();

        match (words.next(), words.next()) {
            (None, _) => continue,
            (Some("quit" | "exit"), _) => break,
            (Some("help"), _) => println!("{}", HELP),
            (Some("selection"), _) => {
                let selected = dispatcher.selection().selected();
                if selected.is_empty() {
                    println!("未勾选任何类别");
                } else {
                    println!("已勾选: {}", crate::modules::categories::join_labels(&selected));
                }
            }
            (Some(verb @ ("check" | "uncheck")), Some(raw)) => match raw.parse::<Category>() {
                Ok(category) => dispatcher.set_checked(category, verb == "check"),
                Err(e) => println!("{}", e),
            },
            _ => match KeyEvent::parse(input) {
                Ok(mut event) => {
                    let dispatcher = dispatcher.clone();
                    tasks.push(tokio::spawn(async move {
                        if dispatcher.handle_key(&mut event).await.is_none() {
                            println!("未绑定的快捷键: {}", event.key);
                        }
                    }));
                }
                Err(e) => println!("{}", e),
            },
        }

        tasks.retain(|task| !task.is_finished());
    }

    // 等待进行中的清理结束
    for task in tasks {
        let _ = task.await;
    }

    Ok(())
}
