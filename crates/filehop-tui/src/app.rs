//! Application state

use chrono::{Local, NaiveDate};
use filehop_core::{
    AppSettings, ChannelSink, FileId, LogEntry, LogLevel, Notice, PlatformKind, ProviderKind,
    Step, TransferHandle, Transition, Wizard,
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// 通知在状态栏停留的时间
const TOAST_DURATION: Duration = Duration::from_secs(4);

/// 日志面板最多保留的条目数
const MAX_LOGS: usize = 500;

/// 异步事件（来自日志层等）
#[derive(Debug, Clone)]
pub enum AppEvent {
    LogMessage { level: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Wizard,
    Log,
}

/// 整理页上的三个开关
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrganizeOption {
    AutoTag,
    CreateFolders,
    RemoveOriginal,
}

impl OrganizeOption {
    pub const ALL: [OrganizeOption; 3] = [
        OrganizeOption::AutoTag,
        OrganizeOption::CreateFolders,
        OrganizeOption::RemoveOriginal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OrganizeOption::AutoTag => "Auto-Tag Files",
            OrganizeOption::CreateFolders => "Create Organized Folders",
            OrganizeOption::RemoveOriginal => "Remove Original Files",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            OrganizeOption::AutoTag => "Automatically add tags based on file content and metadata",
            OrganizeOption::CreateFolders => {
                "Automatically create folders based on file types and dates"
            }
            OrganizeOption::RemoveOriginal => {
                "Delete files from the source platform after successful transfer"
            }
        }
    }
}

/// 状态栏中的临时通知
pub struct Toast {
    pub notice: Notice,
    shown_at: Instant,
}

pub struct App {
    pub wizard: Wizard<ChannelSink>,
    pub tab: Tab,
    /// 当前列表中的光标位置
    pub cursor: usize,
    pub logs: Vec<LogEntry>,
    pub log_filter: LogLevel,
    pub toast: Option<Toast>,
    pub transfer_speed: f64,
    pub today: NaiveDate,
    pub event_tx: mpsc::Sender<AppEvent>,
    event_rx: mpsc::Receiver<AppEvent>,
    notices: mpsc::Receiver<Notice>,
    transfer: Option<TransferHandle>,
}

impl App {
    pub fn new(settings: &AppSettings) -> anyhow::Result<Self> {
        let (sink, notices) = ChannelSink::new();
        let wizard = Wizard::new(settings.catalog()?, sink)
            .with_tick_interval(settings.tick_interval())
            .with_organization(settings.default_organization);
        let (event_tx, event_rx) = mpsc::channel(256);

        Ok(Self {
            wizard,
            tab: Tab::Wizard,
            cursor: 0,
            logs: vec![
                LogEntry::new(LogLevel::Info, "Filehop TUI 启动"),
                LogEntry::new(
                    LogLevel::Info,
                    "↑/↓ 移动, Space 选择, Enter 继续, Backspace 返回, q 退出",
                ),
            ],
            log_filter: if settings.verbose {
                LogLevel::Debug
            } else {
                LogLevel::Info
            },
            toast: None,
            transfer_speed: 0.0,
            today: Local::now().date_naive(),
            event_tx,
            event_rx,
            notices,
            transfer: None,
        })
    }

    pub fn add_log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.logs.push(LogEntry::new(level, message));
        if self.logs.len() > MAX_LOGS {
            let excess = self.logs.len() - MAX_LOGS;
            self.logs.drain(..excess);
        }
    }

    pub fn visible_logs(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.logs.iter().filter(|e| e.visible_at(self.log_filter))
    }

    pub fn toggle_log_level(&mut self) {
        self.log_filter = self.log_filter.toggle_verbose();
        self.add_log(LogLevel::Info, format!("日志级别: {}", self.log_filter));
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    pub fn next_tab(&mut self) {
        self.tab = match self.tab {
            Tab::Wizard => Tab::Log,
            Tab::Log => Tab::Wizard,
        };
    }

    /// 当前步骤可选项的数量
    fn item_count(&self) -> usize {
        let catalog = self.wizard.catalog();
        match self.wizard.step() {
            Step::Platform => catalog.platforms.len(),
            Step::Files => catalog.files.len(),
            Step::Destination => catalog.destinations.len(),
            Step::Organize => OrganizeOption::ALL.len(),
            Step::Review | Step::Transferring => 0,
        }
    }

    pub fn next_item(&mut self) {
        let count = self.item_count();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn previous_item(&mut self) {
        let count = self.item_count();
        if count > 0 {
            self.cursor = self.cursor.checked_sub(1).unwrap_or(count - 1);
        }
    }

    fn platform_at_cursor(&self) -> Option<PlatformKind> {
        self.wizard.catalog().platforms.get(self.cursor).map(|p| p.kind)
    }

    fn destination_at_cursor(&self) -> Option<ProviderKind> {
        self.wizard
            .catalog()
            .destinations
            .get(self.cursor)
            .map(|d| d.kind)
    }

    fn file_at_cursor(&self) -> Option<FileId> {
        self.wizard.catalog().files.get(self.cursor).map(|f| f.id)
    }

    /// Space：选择或切换光标处的项目
    pub fn activate(&mut self) {
        let result = match self.wizard.step() {
            Step::Platform => match self.platform_at_cursor() {
                Some(kind) => self.wizard.select_platform(kind),
                None => Ok(()),
            },
            Step::Files => match self.file_at_cursor() {
                Some(id) => self.wizard.toggle_file(id).map(|_| ()),
                None => Ok(()),
            },
            Step::Destination => match self.destination_at_cursor() {
                Some(kind) => self.wizard.select_destination(kind),
                None => Ok(()),
            },
            Step::Organize => {
                if let Some(option) = OrganizeOption::ALL.get(self.cursor) {
                    let settings = self.wizard.organization_mut();
                    let flag = match option {
                        OrganizeOption::AutoTag => &mut settings.auto_tag,
                        OrganizeOption::CreateFolders => &mut settings.create_folders,
                        OrganizeOption::RemoveOriginal => &mut settings.remove_original,
                    };
                    *flag = !*flag;
                }
                Ok(())
            }
            Step::Review | Step::Transferring => Ok(()),
        };

        if let Err(e) = result {
            self.add_log(LogLevel::Warn, e.to_string());
        }
    }

    pub fn select_all_files(&mut self) {
        if self.wizard.step() == Step::Files {
            self.wizard.select_all_files();
        }
    }

    pub fn deselect_all_files(&mut self) {
        if self.wizard.step() == Step::Files {
            self.wizard.deselect_all_files();
        }
    }

    /// Enter：前进一步
    pub fn continue_step(&mut self) {
        match self.wizard.advance() {
            Ok(Transition::Moved(step)) => {
                self.cursor = 0;
                self.add_log(LogLevel::Debug, format!("进入步骤: {}", step.title()));
            }
            Ok(Transition::Started(handle)) => {
                self.cursor = 0;
                self.add_log(
                    LogLevel::Info,
                    format!(
                        "开始传输 {} 个文件",
                        self.wizard.catalog().selected_count()
                    ),
                );
                self.transfer = Some(handle);
            }
            Err(e) => {
                self.add_log(LogLevel::Warn, e.to_string());
            }
        }
    }

    /// Backspace：后退一步（传输进行中或已完成时禁用，完成后只能用 'r' 重启）
    pub fn back(&mut self) {
        if self.wizard.is_transferring() || self.wizard.is_complete() {
            return;
        }
        self.wizard.retreat();
        self.cursor = 0;
    }

    /// 传输完成后开始新的传输
    pub fn restart(&mut self) {
        if !self.wizard.is_complete() {
            return;
        }
        self.transfer = None;
        self.wizard.restart();
        self.cursor = 0;
        self.transfer_speed = 0.0;
        self.add_log(LogLevel::Info, "开始新的传输");
    }

    pub fn tick(&mut self) {
        // 日志层事件
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                AppEvent::LogMessage { level, message } => {
                    let level = level.parse().unwrap_or(LogLevel::Info);
                    self.add_log(level, message);
                }
            }
        }

        // 传输进度
        if let Some(handle) = self.transfer.as_mut() {
            while let Some(event) = handle.try_next_event() {
                self.wizard.apply(event);
            }
            if handle.is_finished() && self.wizard.is_complete() {
                self.transfer = None;
            }
        }

        if self.wizard.is_transferring() {
            self.transfer_speed = 85.5 + (rand::random::<f64>() * 20.0 - 10.0);
        } else {
            self.transfer_speed = 0.0;
        }

        // 向导通知
        while let Ok(notice) = self.notices.try_recv() {
            let entry = LogEntry::from_notice(&notice);
            self.add_log(entry.level, entry.message);
            self.toast = Some(Toast {
                notice,
                shown_at: Instant::now(),
            });
        }

        if self
            .toast
            .as_ref()
            .is_some_and(|t| t.shown_at.elapsed() > TOAST_DURATION)
        {
            self.toast = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(&AppSettings::default()).unwrap()
    }

    #[test]
    fn test_cursor_wraps() {
        let mut app = app();
        app.previous_item();
        assert_eq!(app.cursor, 3);
        app.next_item();
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_unconnected_platform_logs_warning() {
        let mut app = app();
        // 第三个平台 (WhatsApp) 未连接
        app.cursor = 2;
        app.activate();

        assert_eq!(app.wizard.selected_platform(), None);
        assert_eq!(app.logs.last().unwrap().level, LogLevel::Warn);
    }

    #[test]
    fn test_walk_to_review() {
        let mut app = app();
        app.activate();
        app.continue_step();
        assert_eq!(app.wizard.step(), Step::Files);

        app.select_all_files();
        app.continue_step();
        assert_eq!(app.wizard.step(), Step::Destination);

        app.activate();
        app.continue_step();
        assert_eq!(app.wizard.step(), Step::Organize);

        app.cursor = 2;
        app.activate();
        assert!(app.wizard.organization().remove_original);

        app.continue_step();
        assert_eq!(app.wizard.step(), Step::Review);

        app.back();
        assert_eq!(app.wizard.step(), Step::Organize);
        assert_eq!(app.cursor, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transfer_completes_through_tick() {
        let mut app = app();
        app.activate();
        app.continue_step();
        app.select_all_files();
        app.continue_step();
        app.activate();
        app.continue_step();
        app.continue_step();
        app.continue_step();
        assert_eq!(app.wizard.step(), Step::Transferring);

        // 传输中不能后退或重启
        app.back();
        app.restart();
        assert_eq!(app.wizard.step(), Step::Transferring);

        while !app.wizard.is_complete() {
            tokio::time::sleep(Duration::from_millis(100)).await;
            app.tick();
        }
        app.tick();

        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.notice.title, "Transfer completed!");

        // 完成后 Backspace + Enter 不能顶掉已完成的运行
        app.back();
        app.continue_step();
        app.tick();
        assert_eq!(app.wizard.step(), Step::Transferring);
        assert_eq!(app.wizard.progress(), 100);

        app.restart();
        assert_eq!(app.wizard.step(), Step::Platform);
        assert_eq!(app.wizard.progress(), 0);
    }
}
