use serde::{Deserialize, Serialize};

use crate::modules::categories::{Category, ClearMode};
use crate::modules::common::error::SweepError;
use crate::modules::common::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl OperationState {
    fn can_move_to(self, next: OperationState) -> bool {
        matches!(
            (self, next),
            (OperationState::Idle, OperationState::Running)
                | (OperationState::Running, OperationState::Succeeded)
                | (OperationState::Running, OperationState::Failed)
        )
    }

    pub fn is_settled(self) -> bool {
        matches!(self, OperationState::Succeeded | OperationState::Failed)
    }
}

/// 进行中的一次清理
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearOperation {
    pub id: String,
    pub mode: ClearMode,
    /// 全部清理时为空
    pub categories: Vec<Category>,
    progress: u8,
    state: OperationState,
}

impl ClearOperation {
    pub fn new(mode: ClearMode, categories: Vec<Category>) -> Self {
        Self {
            id: utils::generate_id(),
            mode,
            categories,
            progress: 0,
            state: OperationState::Idle,
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn state(&self) -> OperationState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }

    pub fn transition(&mut self, next: OperationState) -> Result<(), SweepError> {
        if !self.state.can_move_to(next) {
            return Err(SweepError::Other(format!(
                "非法的状态切换: {:?} -> {:?}",
                self.state, next
            )));
        }
        tracing::debug!("清理任务 {}: {:?} -> {:?}", self.id, self.state, next);
        self.state = next;
        Ok(())
    }

    /// 推进进度，封顶 100，只在运行中生效
    pub fn advance(&mut self, step: u8) -> u8 {
        if self.state == OperationState::Running {
            self.progress = self.progress.saturating_add(step).min(100);
        }
        self.progress
    }
}
