//! UI rendering module
//!
//! 只读取向导状态来决定显示哪个面板。

use filehop_core::{PROGRESS_MAX, Severity, Step};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Tabs, Wrap},
};

use crate::app::{App, OrganizeOption, Tab};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    match app.tab {
        Tab::Wizard => draw_wizard_tab(frame, app, chunks[1]),
        Tab::Log => draw_log_tab(frame, app, chunks[1]),
    }
    draw_status_bar(frame, app, chunks[2]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let titles = vec!["传输向导 [1]", "日志 [2]"];
    let selected = match app.tab {
        Tab::Wizard => 0,
        Tab::Log => 1,
    };

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Filehop TUI "))
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Yellow).bold());

    frame.render_widget(tabs, area);
}

fn draw_wizard_tab(frame: &mut Frame, app: &App, area: Rect) {
    let step = app.wizard.step();

    if step == Step::Transferring {
        draw_transferring(frame, app, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    draw_step_indicator(frame, step, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    match step {
        Step::Platform => draw_platforms(frame, app, body[0]),
        Step::Files => draw_files(frame, app, body[0]),
        Step::Destination => draw_destinations(frame, app, body[0]),
        Step::Organize => draw_organize(frame, app, body[0]),
        Step::Review => draw_review(frame, app, body[0]),
        Step::Transferring => {}
    }

    draw_help(frame, step, body[1]);
}

fn draw_step_indicator(frame: &mut Frame, current: Step, area: Rect) {
    let mut spans = Vec::new();
    for (i, step) in Step::INDICATOR.iter().enumerate() {
        let (marker, style) = if *step < current {
            ("✓", Style::default().fg(Color::Green))
        } else if *step == current {
            ("●", Style::default().fg(Color::Yellow).bold())
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(format!("{} {}", marker, step.title()), style));
        if i + 1 < Step::INDICATOR.len() {
            spans.push(Span::raw(" ─ "));
        }
    }

    let indicator = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", current.description())),
    );
    frame.render_widget(indicator, area);
}

fn highlight(selected: bool) -> Style {
    if selected {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    } else {
        Style::default()
    }
}

fn connection_badge(connected: bool) -> Span<'static> {
    if connected {
        Span::styled("Connected", Style::default().fg(Color::Green))
    } else {
        Span::styled("Not Connected", Style::default().fg(Color::DarkGray))
    }
}

fn draw_platforms(frame: &mut Frame, app: &App, area: Rect) {
    let chosen = app.wizard.selected_platform();
    let items: Vec<ListItem> = app
        .wizard
        .catalog()
        .platforms
        .iter()
        .enumerate()
        .map(|(i, platform)| {
            let radio = if chosen == Some(platform.kind) { "(•)" } else { "( )" };
            let mut style = highlight(i == app.cursor);
            if !platform.connected {
                style = style.add_modifier(Modifier::DIM);
            }
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} {:<10} {:<18} ", radio, platform.kind.name(), platform.account_name)),
                connection_badge(platform.connected),
            ]))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 📱 Select Source Platform "),
    );
    frame.render_widget(list, area);
}

fn draw_files(frame: &mut Frame, app: &App, area: Rect) {
    let catalog = app.wizard.catalog();
    let items: Vec<ListItem> = catalog
        .files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let check = if file.selected { "[x]" } else { "[ ]" };
            ListItem::new(format!(
                "{} {} {:<28} {:>8}  {}",
                check,
                file.category.icon(),
                file.name,
                file.size,
                file.category
            ))
            .style(highlight(i == app.cursor))
        })
        .collect();

    let source = app
        .wizard
        .selected_platform()
        .map_or("?", |kind| kind.name());
    let title = format!(
        " 📂 Files from {} ({} of {} selected) ",
        source,
        catalog.selected_count(),
        catalog.files.len()
    );

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn draw_destinations(frame: &mut Frame, app: &App, area: Rect) {
    let destinations = &app.wizard.catalog().destinations;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ☁️ Select Destination ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            destinations
                .iter()
                .map(|_| Constraint::Length(3))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(inner);

    let chosen = app.wizard.selected_destination();
    for (i, destination) in destinations.iter().enumerate() {
        let radio = if chosen == Some(destination.kind) { "(•)" } else { "( )" };
        let title = Line::from(vec![
            Span::raw(format!(" {} {} ", radio, destination.kind.name())),
            connection_badge(destination.connected),
            Span::raw(" "),
        ]);

        let mut style = highlight(i == app.cursor);
        if !destination.connected {
            style = style.add_modifier(Modifier::DIM);
        }

        let (percent, label) = if destination.connected {
            (destination.usage_percent(), destination.storage_label())
        } else {
            (0, destination.account_email.clone())
        };

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(title).style(style))
            .gauge_style(Style::default().fg(Color::Blue).bg(Color::Black))
            .percent(percent)
            .label(label);
        frame.render_widget(gauge, rows[i]);
    }
}

fn draw_organize(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(3)])
        .split(area);

    let settings = app.wizard.organization();
    let items: Vec<ListItem> = OrganizeOption::ALL
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let on = match option {
                OrganizeOption::AutoTag => settings.auto_tag,
                OrganizeOption::CreateFolders => settings.create_folders,
                OrganizeOption::RemoveOriginal => settings.remove_original,
            };
            let switch = if on {
                Span::styled("[ON] ", Style::default().fg(Color::Green))
            } else {
                Span::styled("[OFF]", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(vec![
                Line::from(vec![switch, Span::raw(format!(" {}", option.label()))]),
                Line::from(Span::styled(
                    format!("      {}", option.hint()),
                    Style::default().fg(Color::Gray),
                )),
            ])
            .style(highlight(i == app.cursor))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 🧠 AI-Powered Organization "),
    );
    frame.render_widget(list, chunks[0]);

    let preview = settings.folder_preview(&app.wizard.catalog().files, app.today);
    let text = if preview.is_empty() {
        "文件夹整理已关闭".to_string()
    } else {
        preview
            .iter()
            .map(|node| format!("{}📁 {}", "  ".repeat(node.depth), node.name))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let preview = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Folder Structure Preview "),
    );
    frame.render_widget(preview, chunks[1]);
}

fn draw_review(frame: &mut Frame, app: &App, area: Rect) {
    let summary = app.wizard.summary();
    let yes_no = |on: bool| if on { "✓" } else { "✗" };

    let lines = vec![
        Line::from(format!(
            "From:   {}",
            summary.platform.map_or("-", |kind| kind.name())
        )),
        Line::from(format!(
            "To:     {}",
            summary.destination.map_or("-", |kind| kind.name())
        )),
        Line::from(format!("Files:  {} files", summary.file_count)),
        Line::from(""),
        Line::from(format!(
            "{} Auto-tag files with AI",
            yes_no(summary.organization.auto_tag)
        )),
        Line::from(format!(
            "{} Create organized folders",
            yes_no(summary.organization.create_folders)
        )),
        Line::from(format!(
            "{} Remove original files after transfer",
            yes_no(summary.organization.remove_original)
        )),
        Line::from(""),
        Line::from(Span::styled(
            "按 Enter 开始传输",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let review = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" ✅ Review & Confirm Transfer "),
    );
    frame.render_widget(review, area);
}

fn draw_transferring(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Description
            Constraint::Length(5), // Progress
            Constraint::Length(3), // Speed
            Constraint::Min(3),    // Result
        ])
        .split(area);

    let description = match app.wizard.run() {
        Some(run) => format!(
            "Transferring {} files from {} to {}",
            run.file_count, run.platform, run.destination
        ),
        None => "无活动传输".to_string(),
    };
    frame.render_widget(
        Paragraph::new(description).block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    let progress = u16::from(app.wizard.progress());
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 📦 Transfer in Progress "),
        )
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .percent(progress)
        .label(format!("{}%", progress));
    frame.render_widget(gauge, chunks[1]);

    let speed_text = if app.wizard.is_transferring() {
        format!("⚡ 传输速度: {:.1} MB/s", app.transfer_speed)
    } else {
        "⚡ 传输速度: --".to_string()
    };
    frame.render_widget(
        Paragraph::new(speed_text).block(Block::default().borders(Borders::ALL)),
        chunks[2],
    );

    let result = if app.wizard.progress() < PROGRESS_MAX {
        "Processing files...".to_string()
    } else {
        "Transfer completed successfully!\nAll files have been successfully transferred and organized.\n\n按 'r' 开始新的传输".to_string()
    };
    frame.render_widget(
        Paragraph::new(result)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true }),
        chunks[3],
    );
}

fn draw_help(frame: &mut Frame, step: Step, area: Rect) {
    let help_text = match step {
        Step::Platform | Step::Destination => {
            "↑/↓ 选择\nSpace 选中 (仅已连接)\nEnter 继续\nBackspace 返回\nTab 切换标签"
        }
        Step::Files => "↑/↓ 选择\nSpace 勾选\na 全选\nn 全不选\nEnter 继续\nBackspace 返回",
        Step::Organize => "↑/↓ 选择\nSpace 开关\nEnter 继续\nBackspace 返回",
        Step::Review => "Enter 开始传输\nBackspace 返回",
        Step::Transferring => "",
    };

    let help = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL).title(" 帮助 "))
        .wrap(Wrap { trim: true });
    frame.render_widget(help, area);
}

fn draw_log_tab(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .visible_logs()
        .rev()
        .take(usize::from(area.height.saturating_sub(2)))
        .map(|entry| ListItem::new(format!("{} {}", entry.level.icon(), entry.message)))
        .collect();

    let title = format!(" 📋 日志 ({}) [d]级别 [c]清空 ", app.log_filter);
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(toast) = &app.toast {
        let color = match toast.notice.severity {
            Severity::Error => Color::Red,
            Severity::Success => Color::Green,
            Severity::Info => Color::White,
        };
        Paragraph::new(toast.notice.to_string()).style(Style::default().fg(color))
    } else {
        let mode_text = if app.wizard.is_transferring() {
            " 🔄 传输中 "
        } else if app.wizard.is_complete() {
            " ✅ 已完成 "
        } else {
            " ⏸️  配置中 "
        };
        Paragraph::new(format!(
            "{}│ 已选文件: {} │ [Enter]继续 [Backspace]返回 [Tab]切换 [q]退出",
            mode_text,
            app.wizard.catalog().selected_count()
        ))
    };

    frame.render_widget(status.block(Block::default().borders(Borders::ALL)), area);
}
