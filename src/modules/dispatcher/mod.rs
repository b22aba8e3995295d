//! 命令分发
//!
//! 把“清理全部”“清理选中项”两个按钮及对应快捷键接到清理任务上，
//! 负责按钮的禁用与恢复，并把所有结果转换成状态行。

pub mod shortcuts;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::modules::categories::selection::SelectionState;
use crate::modules::categories::{self, Category, ClearMode};
use crate::modules::cleaner::models::ClearReport;
use crate::modules::common::config::SweepConfig;
use crate::modules::common::error::SweepError;
use crate::modules::common::utils;
use crate::modules::ledger;
use crate::modules::presenter::{ControlId, Presenter, UiEvent};
use crate::modules::runner::ProgressRunner;
use crate::modules::state::AppState;
pub use shortcuts::{ClearCommand, KeyEvent};

pub const ALL_CLEARED_MESSAGE: &str = "所有缓存已成功清理！";
pub const ERROR_PREFIX: &str = "清理过程中出现错误：";

/// 一次命令的处理结果
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    Succeeded(ClearReport),
    Failed(String),
    /// 未启动任务（未选择类别或已有任务进行中）
    Rejected(String),
    /// 按钮处于禁用状态
    Ignored,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Succeeded(_))
    }
}

pub struct Dispatcher {
    state: Arc<Mutex<AppState>>,
    presenter: Arc<dyn Presenter>,
    runner: ProgressRunner,
    exclusive: bool,
    selection: std::sync::Mutex<SelectionState>,
    clear_all_busy: AtomicBool,
    clear_selected_busy: AtomicBool,
    operation_active: AtomicBool,
}

/// 任务结束时恢复按钮并释放全局锁
struct BusyGuard<'a> {
    dispatcher: &'a Dispatcher,
    control: ControlId,
    holds_lock: bool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.dispatcher.busy_flag(self.control).store(false, Ordering::Release);
        if self.holds_lock {
            self.dispatcher.operation_active.store(false, Ordering::Release);
        }
        self.dispatcher.presenter.present(UiEvent::Control {
            control: self.control,
            enabled: true,
            label: self.control.idle_label().to_string(),
        });
    }
}

impl Dispatcher {
    pub fn new(
        state: Arc<Mutex<AppState>>,
        presenter: Arc<dyn Presenter>,
        config: &SweepConfig,
    ) -> Self {
        Self {
            state,
            presenter,
            runner: ProgressRunner::new(config),
            exclusive: config.exclusive_operations,
            selection: std::sync::Mutex::new(SelectionState::default()),
            clear_all_busy: AtomicBool::new(false),
            clear_selected_busy: AtomicBool::new(false),
            operation_active: AtomicBool::new(false),
        }
    }

    /// 启动时显示缓存大小与上次清理时间
    pub async fn initialize(&self) {
        let state = self.state.lock().await;
        self.presenter.present(UiEvent::Gauge {
            size_mb: state.gauge.current_mb(),
            percent: state.gauge.percent(),
        });

        match ledger::most_recent(state.store.as_ref()) {
            Ok(Some(record)) => self.presenter.info(format!(
                "上次清理时间：{}",
                utils::format_local_time(&record.timestamp)
            )),
            Ok(None) => {}
            Err(e) => tracing::warn!("读取清理历史失败: {}", e),
        }
    }

    pub fn set_checked(&self, category: Category, checked: bool) {
        self.selection_guard().set(category, checked);
    }

    pub fn set_selection(&self, selection: SelectionState) {
        *self.selection_guard() = selection;
    }

    pub fn selection(&self) -> SelectionState {
        *self.selection_guard()
    }

    pub fn is_busy(&self, control: ControlId) -> bool {
        self.busy_flag(control).load(Ordering::Acquire)
    }

    pub async fn dispatch(&self, command: ClearCommand) -> DispatchOutcome {
        match command {
            ClearCommand::All => self.clear_all().await,
            ClearCommand::Selected => self.clear_selected().await,
        }
    }

    /// 处理按键，未绑定的组合键返回 None
    pub async fn handle_key(&self, event: &mut KeyEvent) -> Option<DispatchOutcome> {
        let command = shortcuts::command_for(event)?;
        event.prevent_default();
        Some(self.dispatch(command).await)
    }

    pub async fn clear_all(&self) -> DispatchOutcome {
        if self.is_busy(ControlId::ClearAll) {
            return DispatchOutcome::Ignored;
        }
        self.run(ControlId::ClearAll, ClearMode::All, Vec::new()).await
    }

    pub async fn clear_selected(&self) -> DispatchOutcome {
        if self.is_busy(ControlId::ClearSelected) {
            return DispatchOutcome::Ignored;
        }

        let selected = match self.selection().validate() {
            Ok(selected) => selected,
            Err(e) => {
                self.presenter.warning(e.to_string());
                return DispatchOutcome::Rejected(e.to_string());
            }
        };

        self.run(ControlId::ClearSelected, ClearMode::Selected, selected)
            .await
    }

    async fn run(
        &self,
        control: ControlId,
        mode: ClearMode,
        selected: Vec<Category>,
    ) -> DispatchOutcome {
        let holds_lock = if self.exclusive {
            if self
                .operation_active
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                let message = SweepError::Busy.to_string();
                self.presenter.warning(message.clone());
                return DispatchOutcome::Rejected(message);
            }
            true
        } else {
            false
        };

        if self
            .busy_flag(control)
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            if holds_lock {
                self.operation_active.store(false, Ordering::Release);
            }
            return DispatchOutcome::Ignored;
        }

        let _guard = BusyGuard {
            dispatcher: self,
            control,
            holds_lock,
        };
        self.presenter.present(UiEvent::Control {
            control,
            enabled: false,
            label: control.busy_label().to_string(),
        });

        match self
            .runner
            .run(&self.state, self.presenter.as_ref(), mode, selected.clone())
            .await
        {
            Ok(report) => {
                self.presenter.success(success_message(mode, &selected));
                DispatchOutcome::Succeeded(report)
            }
            Err(e) => {
                let message = e.to_string();
                self.presenter.error(format!("{}{}", ERROR_PREFIX, message));
                DispatchOutcome::Failed(message)
            }
        }
    }

    fn busy_flag(&self, control: ControlId) -> &AtomicBool {
        match control {
            ControlId::ClearAll => &self.clear_all_busy,
            ControlId::ClearSelected => &self.clear_selected_busy,
        }
    }

    fn selection_guard(&self) -> std::sync::MutexGuard<'_, SelectionState> {
        self.selection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub fn success_message(mode: ClearMode, selected: &[Category]) -> String {
    match mode {
        ClearMode::All => ALL_CLEARED_MESSAGE.to_string(),
        ClearMode::Selected => format!("{} 已成功清理！", categories::join_labels(selected)),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::modules::gauge::CacheSizeGauge;
    use crate::modules::presenter::{drain, status_lines, ChannelPresenter, Severity};
    use crate::modules::store::testing::FailingStore;
    use crate::modules::store::{BrowserStore, CookieJar, KeyValueStore, MemoryStore};
    use tokio::sync::mpsc::UnboundedReceiver;

    fn fast_config() -> SweepConfig {
        SweepConfig {
            tick_interval: Duration::from_millis(10),
            settle_delay: Duration::from_millis(20),
            ..SweepConfig::default()
        }
    }

    fn dispatcher_with(
        store: impl BrowserStore + 'static,
        size: u64,
        config: SweepConfig,
    ) -> (Arc<Dispatcher>, Arc<Mutex<AppState>>, UnboundedReceiver<UiEvent>) {
        let state = Arc::new(Mutex::new(AppState::new(
            Box::new(store),
            CacheSizeGauge::new(size),
        )));
        let (presenter, rx) = ChannelPresenter::channel();
        let dispatcher = Arc::new(Dispatcher::new(state.clone(), Arc::new(presenter), &config));
        (dispatcher, state, rx)
    }

    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        assert!(store.set("cache_index", "1").is_ok());
        assert!(store.set("profile", "2").is_ok());
        assert!(store.assign_cookie("sid=abc").is_ok());
        store
    }

    #[tokio::test(start_paused = true)]
    async fn zero_tick_interval_from_library_config_still_completes() {
        let config = SweepConfig {
            tick_interval: Duration::ZERO,
            ..fast_config()
        };
        let (dispatcher, state, _rx) = dispatcher_with(seeded_store(), 320, config);

        assert!(dispatcher.clear_all().await.is_success());
        assert_eq!(state.lock().await.gauge.current_mb(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn selected_cookies_and_storage_scenario() {
        let (dispatcher, state, mut rx) = dispatcher_with(seeded_store(), 320, fast_config());
        dispatcher.set_checked(Category::Storage, true);
        dispatcher.set_checked(Category::Cookies, true);

        let outcome = dispatcher.clear_selected().await;
        assert!(outcome.is_success());

        let guard = state.lock().await;
        assert_eq!(guard.gauge.current_mb(), 220);
        let history = ledger::read_all(guard.store.as_ref()).unwrap_or_default();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].mode, ClearMode::Selected);
        assert_eq!(history[0].categories, vec![Category::Cookies, Category::Storage]);
        assert_eq!(history[0].size_cleared_mb, 100);

        let lines = status_lines(&drain(&mut rx));
        let last = lines.last().cloned().unwrap_or_else(|| panic!("no status"));
        assert_eq!(last.severity, Severity::Success);
        assert_eq!(last.message, "Cookies、本地存储 已成功清理！");
        assert!(!dispatcher.is_busy(ControlId::ClearSelected));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_selection_warns_without_touching_anything() {
        let (dispatcher, state, mut rx) = dispatcher_with(seeded_store(), 320, fast_config());

        let outcome = dispatcher.clear_selected().await;
        assert!(matches!(outcome, DispatchOutcome::Rejected(_)));

        let events = drain(&mut rx);
        assert!(!events.iter().any(|e| matches!(e, UiEvent::Control { .. })));
        let lines = status_lines(&events);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].severity, Severity::Warning);
        assert_eq!(lines[0].message, "请至少选择一种要清理的缓存类型");

        let guard = state.lock().await;
        assert_eq!(guard.gauge.current_mb(), 320);
        assert!(ledger::read_all(guard.store.as_ref()).unwrap_or_default().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_all_zeroes_gauge_and_reports_success() {
        let (dispatcher, state, mut rx) = dispatcher_with(seeded_store(), 480, fast_config());

        assert!(dispatcher.clear_all().await.is_success());

        let guard = state.lock().await;
        assert_eq!(guard.gauge.current_mb(), 0);
        assert_eq!(guard.gauge.percent(), 0.0);
        let history = ledger::read_all(guard.store.as_ref()).unwrap_or_default();
        assert_eq!(history[0].size_cleared_mb, 480);
        assert!(history[0].categories.is_empty());

        let events = drain(&mut rx);
        assert!(events.contains(&UiEvent::Gauge {
            size_mb: 0,
            percent: 0.0
        }));
        assert_eq!(
            status_lines(&events).last().map(|l| l.message.clone()),
            Some(ALL_CLEARED_MESSAGE.to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn failing_step_reports_error_and_reenables_control() {
        let store = FailingStore {
            inner: seeded_store(),
            fail_clear: Some("SecurityError: access denied".to_string()),
            ..FailingStore::default()
        };
        let (dispatcher, state, mut rx) = dispatcher_with(store, 320, fast_config());

        let outcome = dispatcher.clear_all().await;
        assert!(matches!(
            outcome,
            DispatchOutcome::Failed(ref message) if message == "SecurityError: access denied"
        ));

        let events = drain(&mut rx);
        let last_line = status_lines(&events).last().cloned();
        assert_eq!(
            last_line,
            Some(crate::modules::presenter::StatusLine {
                severity: Severity::Error,
                message: "清理过程中出现错误：SecurityError: access denied".to_string(),
            })
        );
        assert_eq!(
            events.last(),
            Some(&UiEvent::Control {
                control: ControlId::ClearAll,
                enabled: true,
                label: ControlId::ClearAll.idle_label().to_string(),
            })
        );
        assert!(!dispatcher.is_busy(ControlId::ClearAll));

        let guard = state.lock().await;
        assert_eq!(guard.gauge.current_mb(), 320);
        assert!(ledger::read_all(guard.store.as_ref()).unwrap_or_default().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn control_is_disabled_while_running_and_repeat_clicks_are_ignored() {
        let (dispatcher, state, mut rx) = dispatcher_with(seeded_store(), 320, fast_config());

        let first = tokio::spawn({
            let dispatcher = dispatcher.clone();
            async move { dispatcher.clear_all().await }
        });
        tokio::time::sleep(Duration::from_millis(15)).await;

        assert!(dispatcher.is_busy(ControlId::ClearAll));
        assert!(matches!(dispatcher.clear_all().await, DispatchOutcome::Ignored));

        let outcome = first.await.unwrap_or_else(|e| panic!("{}", e));
        assert!(outcome.is_success());

        let events = drain(&mut rx);
        assert!(events.contains(&UiEvent::Control {
            control: ControlId::ClearAll,
            enabled: false,
            label: "清理中...".to_string(),
        }));
        let history_len = {
            let guard = state.lock().await;
            ledger::read_all(guard.store.as_ref()).unwrap_or_default().len()
        };
        assert_eq!(history_len, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn other_command_is_rejected_while_an_operation_runs() {
        let (dispatcher, _state, mut rx) = dispatcher_with(seeded_store(), 320, fast_config());
        dispatcher.set_checked(Category::Cache, true);

        let first = tokio::spawn({
            let dispatcher = dispatcher.clone();
            async move { dispatcher.clear_all().await }
        });
        tokio::time::sleep(Duration::from_millis(15)).await;

        let second = dispatcher.clear_selected().await;
        assert!(matches!(
            second,
            DispatchOutcome::Rejected(ref m) if m == "已有清理任务正在进行"
        ));
        assert!(!dispatcher.is_busy(ControlId::ClearSelected));

        assert!(first.await.map(|o| o.is_success()).unwrap_or(false));
        assert!(dispatcher.clear_selected().await.is_success());

        let warnings = status_lines(&drain(&mut rx))
            .into_iter()
            .filter(|l| l.severity == Severity::Warning)
            .count();
        assert_eq!(warnings, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn without_exclusive_lock_both_commands_may_overlap() {
        let config = SweepConfig {
            exclusive_operations: false,
            ..fast_config()
        };
        let (dispatcher, state, _rx) = dispatcher_with(seeded_store(), 400, config);
        dispatcher.set_checked(Category::History, true);

        let (all, selected) = tokio::join!(dispatcher.clear_all(), dispatcher.clear_selected());
        assert!(all.is_success());
        assert!(selected.is_success());

        let guard = state.lock().await;
        assert_eq!(guard.gauge.current_mb(), 0);
        assert!(!ledger::read_all(guard.store.as_ref()).unwrap_or_default().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shortcuts_prevent_default_and_dispatch() {
        let (dispatcher, state, _rx) = dispatcher_with(seeded_store(), 300, fast_config());
        dispatcher.set_checked(Category::Cache, true);

        let mut unrelated = KeyEvent::new("V").with_ctrl().with_shift();
        assert!(dispatcher.handle_key(&mut unrelated).await.is_none());
        assert!(!unrelated.is_default_prevented());

        let mut selected = KeyEvent::new("X").with_ctrl().with_shift();
        let outcome = dispatcher.handle_key(&mut selected).await;
        assert!(selected.is_default_prevented());
        assert!(outcome.map(|o| o.is_success()).unwrap_or(false));
        {
            let guard = state.lock().await;
            let history = ledger::read_all(guard.store.as_ref()).unwrap_or_default();
            assert_eq!(history.len(), 1);
            assert_eq!(history[0].categories, vec![Category::Cache]);
        }

        let mut all = KeyEvent::new("C").with_ctrl().with_shift();
        let outcome = dispatcher.handle_key(&mut all).await;
        assert!(all.is_default_prevented());
        assert!(outcome.map(|o| o.is_success()).unwrap_or(false));

        // 清理全部会清空本地存储，历史里只剩这一次
        let guard = state.lock().await;
        let history = ledger::read_all(guard.store.as_ref()).unwrap_or_default();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].mode, ClearMode::All);
        assert_eq!(guard.gauge.current_mb(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn initialize_reports_gauge_and_last_clear_time() {
        let (dispatcher, _state, mut rx) = dispatcher_with(seeded_store(), 250, fast_config());
        dispatcher.initialize().await;
        let events = drain(&mut rx);
        assert_eq!(
            events,
            vec![UiEvent::Gauge {
                size_mb: 250,
                percent: 50.0
            }]
        );

        assert!(dispatcher.clear_all().await.is_success());
        let _ = drain(&mut rx);

        dispatcher.initialize().await;
        let lines = status_lines(&drain(&mut rx));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].message.starts_with("上次清理时间："));
    }
}
