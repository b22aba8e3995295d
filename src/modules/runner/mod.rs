//! 模拟进度的清理任务
//!
//! 按固定间隔推进进度并发布状态文本，到 100% 时执行实际清理，
//! 再经过一小段收尾延迟后结束。等待只发生在两次推进之间。

pub mod models;

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::modules::categories::{self, Category, ClearMode};
use crate::modules::cleaner::{self, models::ClearReport};
use crate::modules::common::config::SweepConfig;
use crate::modules::common::error::SweepError;
use crate::modules::presenter::{Presenter, UiEvent};
use crate::modules::state::AppState;
use models::{ClearOperation, OperationState};

pub const PREPARING_MESSAGE: &str = "正在准备清理...";

/// 推进间隔下限，`interval_at` 不接受 0
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
pub struct ProgressRunner {
    tick_step: u8,
    tick_interval: Duration,
    settle_delay: Duration,
}

impl ProgressRunner {
    pub fn new(config: &SweepConfig) -> Self {
        Self {
            tick_step: config.tick_step.clamp(1, 100),
            tick_interval: config.tick_interval.max(MIN_TICK_INTERVAL),
            settle_delay: config.settle_delay,
        }
    }

    /// 运行一次清理任务
    ///
    /// `categories` 在 Selected 模式下必须已通过校验
    pub async fn run(
        &self,
        state: &Mutex<AppState>,
        presenter: &dyn Presenter,
        mode: ClearMode,
        categories: Vec<Category>,
    ) -> Result<ClearReport, SweepError> {
        let mut operation = ClearOperation::new(mode, categories);
        operation.transition(OperationState::Running)?;
        tracing::info!(
            "开始清理任务 {} ({}, {:?})",
            operation.id,
            operation.mode,
            operation.categories
        );

        presenter.info(PREPARING_MESSAGE.to_string());

        let start = Instant::now() + self.tick_interval;
        let mut ticker = time::interval_at(start, self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !operation.is_complete() {
            ticker.tick().await;
            let percent = operation.advance(self.tick_step);
            tracing::debug!("清理任务 {} 进度 {}%", operation.id, percent);
            presenter.info(progress_message(mode, &operation.categories, percent));
        }

        let result = {
            let mut guard = state.lock().await;
            cleaner::execute(&mut guard, mode, &operation.categories)
        };

        let report = match result {
            Ok(report) => report,
            Err(e) => {
                operation.transition(OperationState::Failed)?;
                tracing::error!("清理任务 {} 失败: {}", operation.id, e);
                return Err(e);
            }
        };

        let gauge = state.lock().await.gauge;
        presenter.present(UiEvent::Gauge {
            size_mb: gauge.current_mb(),
            percent: gauge.percent(),
        });

        time::sleep(self.settle_delay).await;
        operation.transition(OperationState::Succeeded)?;
        tracing::info!(
            "清理任务 {} 完成，释放 {} MB",
            operation.id,
            report.record.size_cleared_mb
        );

        Ok(report)
    }
}

pub fn progress_message(mode: ClearMode, categories: &[Category], percent: u8) -> String {
    match mode {
        ClearMode::All => format!("正在清理所有缓存数据... {}%", percent),
        ClearMode::Selected => format!(
            "正在清理 {}... {}%",
            categories::join_labels(categories),
            percent
        ),
    }
}
