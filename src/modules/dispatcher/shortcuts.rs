//! 全局快捷键
//!
//! Ctrl+Shift+C 清理全部，Ctrl+Shift+X 清理选中项

use serde::{Deserialize, Serialize};

use crate::modules::common::error::SweepError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearCommand {
    All,
    Selected,
}

/// 一次按键输入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// 阻止宿主的默认快捷键行为
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// 解析 `ctrl+shift+c` 形式的组合键
    pub fn parse(chord: &str) -> Result<Self, SweepError> {
        let parts: Vec<&str> = chord
            .split('+')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let Some((key, modifiers)) = parts.split_last() else {
            return Err(SweepError::InvalidInput(format!("空的组合键: {:?}", chord)));
        };

        let mut event = KeyEvent::new(*key);
        for modifier in modifiers {
            match modifier.to_lowercase().as_str() {
                "ctrl" | "control" => event.ctrl = true,
                "shift" => event.shift = true,
                "alt" | "option" => event.alt = true,
                "meta" | "cmd" | "super" => event.meta = true,
                other => {
                    return Err(SweepError::InvalidInput(format!("未知的修饰键: {}", other)));
                }
            }
        }

        Ok(event)
    }
}

/// 组合键对应的命令
pub fn command_for(event: &KeyEvent) -> Option<ClearCommand> {
    if !(event.ctrl && event.shift) {
        return None;
    }

    if event.key.eq_ignore_ascii_case("c") {
        Some(ClearCommand::All)
    } else if event.key.eq_ignore_ascii_case("x") {
        Some(ClearCommand::Selected)
    } else {
        None
    }
}
