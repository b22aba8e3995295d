//! 界面协作方
//!
//! 清理逻辑只通过 `Presenter` 发布状态文本、按钮状态和缓存大小，
//! 具体怎么显示由宿主决定

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// 状态行级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// 普通信息与进度
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "信息"),
            Severity::Success => write!(f, "成功"),
            Severity::Warning => write!(f, "警告"),
            Severity::Error => write!(f, "错误"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub severity: Severity,
    pub message: String,
}

/// 触发清理的按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlId {
    ClearAll,
    ClearSelected,
}

impl ControlId {
    pub fn idle_label(self) -> &'static str {
        match self {
            ControlId::ClearAll => "立即清理所有缓存",
            ControlId::ClearSelected => "清理选中项",
        }
    }

    pub fn busy_label(self) -> &'static str {
        "清理中..."
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiEvent {
    Status(StatusLine),
    Control {
        control: ControlId,
        enabled: bool,
        label: String,
    },
    Gauge {
        size_mb: u64,
        percent: f64,
    },
}

pub trait Presenter: Send + Sync {
    fn present(&self, event: UiEvent);

    fn status(&self, severity: Severity, message: String) {
        self.present(UiEvent::Status(StatusLine { severity, message }));
    }

    fn info(&self, message: String) {
        self.status(Severity::Info, message);
    }

    fn success(&self, message: String) {
        self.status(Severity::Success, message);
    }

    fn warning(&self, message: String) {
        self.status(Severity::Warning, message);
    }

    fn error(&self, message: String) {
        self.status(Severity::Error, message);
    }
}

/// 输出到终端
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    pub show_controls: bool,
}

impl Presenter for ConsolePresenter {
    fn present(&self, event: UiEvent) {
        match event {
            UiEvent::Status(line) => println!("[{}] {}", line.severity, line.message),
            UiEvent::Control {
                control,
                enabled,
                label,
            } => {
                if self.show_controls {
                    println!(
                        "  <{:?}> {} ({})",
                        control,
                        label,
                        if enabled { "可用" } else { "禁用" }
                    );
                }
            }
            UiEvent::Gauge { size_mb, percent } => {
                println!("  缓存大小: {} MB ({:.0}%)", size_mb, percent);
            }
        }
    }
}

/// 通过通道转发事件，供宿主或测试消费
#[derive(Debug, Clone)]
pub struct ChannelPresenter {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl ChannelPresenter {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Presenter for ChannelPresenter {
    fn present(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("界面事件接收端已关闭");
        }
    }
}

/// 取出通道中已有的全部事件
pub fn drain(rx: &mut mpsc::UnboundedReceiver<UiEvent>) -> Vec<UiEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// 只保留状态行
pub fn status_lines(events: &[UiEvent]) -> Vec<StatusLine> {
    events
        .iter()
        .filter_map(|e| match e {
            UiEvent::Status(line) => Some(line.clone()),
            _ => None,
        })
        .collect()
}
