//! Filehop TUI - 交互式传输向导
//!
//! 使用 ratatui 逐步选择来源平台、文件、目标存储和整理选项，然后运行模拟传输。
//!
//! # 日志
//!
//! 日志默认显示在 TUI 的"日志"标签页中。
//! 如需输出到文件进行调试，设置 RUST_LOG 环境变量：
//!
//! ```bash
//! RUST_LOG=debug cargo run -p filehop-tui 2>> /tmp/filehop.log
//! ```

mod app;
mod tui_log;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use filehop_core::{AppSettings, Step};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use tui_log::TuiLogLayer;

#[tokio::main]
async fn main() -> Result<()> {
    // 先加载设置和数据，失败时还没有进入备用屏幕
    let settings = AppSettings::load();
    let app = App::new(&settings)?;

    // 初始化日志系统，发送到 TUI 日志面板
    init_logging(app.event_tx.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// 初始化日志系统
///
/// - 总是将日志发送到 TUI 日志面板
/// - 如果设置了 RUST_LOG，同时输出到 stderr（用于调试）
fn init_logging(log_tx: tokio::sync::mpsc::Sender<app::AppEvent>) {
    // 桥接 log crate（filehop-core 使用）到 tracing
    let _ = tracing_log::LogTracer::init();

    let tui_layer = TuiLogLayer::new(log_tx);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,filehop_core=debug"));

    if std::env::var("RUST_LOG").is_ok() {
        use tracing_subscriber::fmt;

        let stderr_layer = fmt::layer()
            .with_writer(io::stderr)
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tui_layer)
            .with(stderr_layer)
            .try_init();
    } else {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tui_layer)
            .try_init();
    }
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        // 使用 poll 避免无限阻塞，同时让出运行时给模拟任务
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => app.next_tab(),
                KeyCode::Char('1') => app.tab = app::Tab::Wizard,
                KeyCode::Char('2') => app.tab = app::Tab::Log,
                KeyCode::Char('d') => app.toggle_log_level(),
                KeyCode::Char('c') => app.clear_logs(),
                _ if app.tab == app::Tab::Log => {}
                KeyCode::Up | KeyCode::Char('k') => app.previous_item(),
                KeyCode::Down | KeyCode::Char('j') => app.next_item(),
                KeyCode::Char(' ') => app.activate(),
                KeyCode::Char('a') => app.select_all_files(),
                KeyCode::Char('n') => app.deselect_all_files(),
                KeyCode::Enter => app.continue_step(),
                KeyCode::Backspace | KeyCode::Char('b') => app.back(),
                KeyCode::Char('r') if app.wizard.step() == Step::Transferring => app.restart(),
                _ => {}
            }
        }

        tokio::task::yield_now().await;

        // Update app state (handle async events)
        app.tick();
    }
}
