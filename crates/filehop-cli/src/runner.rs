//! 无界面向导
//!
//! 按命令行参数依次调用向导的每一步，最后在终端打印模拟传输的进度。

use anyhow::{Result, bail};
use clap::Args;
use filehop_core::{
    AppSettings, Catalog, FileId, Notice, NotificationSink, OrganizationSettings, PlatformKind,
    ProviderKind, Step, Transition, Wizard,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// 来源平台 (telegram, discord, whatsapp, reddit)
    #[arg(short, long)]
    pub platform: PlatformKind,
    /// 目标存储 (gdrive, dropbox, onedrive)
    #[arg(short, long)]
    pub destination: ProviderKind,
    /// 要传输的文件 ID，可重复
    #[arg(short, long = "file")]
    pub files: Vec<u32>,
    /// 选择全部文件
    #[arg(long, conflicts_with = "files")]
    pub all: bool,
    /// 关闭自动打标签
    #[arg(long)]
    pub no_auto_tag: bool,
    /// 不创建整理文件夹
    #[arg(long)]
    pub no_folders: bool,
    /// 传输后删除原文件
    #[arg(long)]
    pub remove_original: bool,
    /// tick 间隔（毫秒），覆盖设置文件
    #[arg(long)]
    pub interval_ms: Option<u64>,
    /// 自定义数据目录 (JSON)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// 完成后以 JSON 输出报告
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    fn organization(&self, defaults: OrganizationSettings) -> OrganizationSettings {
        OrganizationSettings {
            auto_tag: defaults.auto_tag && !self.no_auto_tag,
            create_folders: defaults.create_folders && !self.no_folders,
            remove_original: defaults.remove_original || self.remove_original,
        }
    }
}

/// 收集通知并在非 JSON 模式下立即打印
#[derive(Default)]
struct ConsoleSink {
    quiet: bool,
    notices: Mutex<Vec<Notice>>,
}

impl NotificationSink for ConsoleSink {
    fn notify(&self, notice: &Notice) {
        if !self.quiet {
            println!("\n{}", notice);
        }
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}

/// `--json` 输出
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport {
    run_id: String,
    summary: filehop_core::TransferSummary,
    progress: u8,
    notices: Vec<Notice>,
}

pub async fn run(args: RunArgs, settings: &AppSettings) -> Result<()> {
    debug!(?args, "Starting headless run");
    let catalog = match &args.catalog {
        Some(path) => Catalog::from_json_file(path)?,
        None => settings.catalog()?,
    };
    let interval = args
        .interval_ms
        .map_or_else(|| settings.tick_interval(), |ms| Duration::from_millis(ms.max(1)));

    let sink = ConsoleSink {
        quiet: args.json,
        ..Default::default()
    };
    let mut wizard = Wizard::new(catalog, sink)
        .with_tick_interval(interval)
        .with_organization(args.organization(settings.default_organization));

    configure(&mut wizard, &args)?;

    if !args.json {
        print_review(&wizard);
    }

    let Transition::Started(mut handle) = wizard.advance()? else {
        bail!("Review did not start the transfer");
    };
    let run_id = handle.run().to_string();

    let mut last_printed = None;
    while let Some(event) = handle.next_event().await {
        wizard.apply(event);
        if !args.json && last_printed != Some(wizard.progress()) {
            print_progress(wizard.progress())?;
            last_printed = Some(wizard.progress());
        }
        if wizard.is_complete() {
            break;
        }
    }

    if args.json {
        let report = RunReport {
            run_id,
            summary: wizard.summary(),
            progress: wizard.progress(),
            notices: wizard
                .sink()
                .notices
                .lock()
                .map(|n| n.clone())
                .unwrap_or_default(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if !wizard.is_complete() {
        warn!(progress = wizard.progress(), "Transfer task ended early");
        bail!("Transfer stopped at {}%", wizard.progress());
    }
    Ok(())
}

/// 从 Platform 走到 Review
fn configure<N: NotificationSink>(wizard: &mut Wizard<N>, args: &RunArgs) -> Result<()> {
    wizard.select_platform(args.platform)?;
    wizard.advance()?;

    if args.all {
        wizard.select_all_files();
    } else {
        for id in &args.files {
            // 重复的 ID 只勾选一次
            let id = FileId(*id);
            if wizard.catalog().file(id).is_some_and(|f| f.selected) {
                continue;
            }
            wizard.toggle_file(id)?;
        }
    }
    wizard.advance()?;

    wizard.select_destination(args.destination)?;
    wizard.advance()?;
    wizard.advance()?;

    debug_assert_eq!(wizard.step(), Step::Review);
    Ok(())
}

fn print_review<N: NotificationSink>(wizard: &Wizard<N>) {
    let summary = wizard.summary();
    let mark = |on: bool| if on { "✓" } else { "✗" };

    println!(
        "📤 {} → {}",
        summary.platform.map_or("-", |kind| kind.name()),
        summary.destination.map_or("-", |kind| kind.name())
    );
    for file in wizard.catalog().selected_files() {
        println!("   {} {} ({})", file.category.icon(), file.name, file.size);
    }
    println!(
        "   {} 自动标签  {} 整理文件夹  {} 删除原文件",
        mark(summary.organization.auto_tag),
        mark(summary.organization.create_folders),
        mark(summary.organization.remove_original)
    );
}

fn print_progress(progress: u8) -> Result<()> {
    const WIDTH: usize = 20;
    let filled = usize::from(progress) * WIDTH / 100;
    let mut stdout = std::io::stdout();
    write!(
        stdout,
        "\r   [{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(WIDTH - filled),
        progress
    )?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        run: RunArgs,
    }

    fn parse(args: &[&str]) -> RunArgs {
        let mut argv = vec!["filehop"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).unwrap().run
    }

    #[test]
    fn test_parse_ids() {
        let args = parse(&["-p", "telegram", "-d", "gdrive", "-f", "1", "-f", "3"]);
        assert_eq!(args.platform, PlatformKind::Telegram);
        assert_eq!(args.destination, ProviderKind::GoogleDrive);
        assert_eq!(args.files, [1, 3]);
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let argv = ["filehop", "-p", "myspace", "-d", "gdrive", "--all"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_organization_flags() {
        let args = parse(&["-p", "discord", "-d", "dropbox", "--all", "--no-folders", "--remove-original"]);
        let org = args.organization(OrganizationSettings::default());
        assert!(org.auto_tag);
        assert!(!org.create_folders);
        assert!(org.remove_original);
    }

    #[test]
    fn test_configure_reaches_review() {
        let args = parse(&["-p", "telegram", "-d", "dropbox", "-f", "2", "-f", "2"]);
        let mut wizard = Wizard::new(Catalog::demo(), ConsoleSink::default());

        configure(&mut wizard, &args).unwrap();

        assert_eq!(wizard.step(), Step::Review);
        assert_eq!(wizard.catalog().selected_count(), 1);
    }

    #[test]
    fn test_configure_without_files_fails() {
        let args = parse(&["-p", "telegram", "-d", "dropbox"]);
        let mut wizard = Wizard::new(Catalog::demo(), ConsoleSink::default());

        assert!(configure(&mut wizard, &args).is_err());
        assert_eq!(wizard.step(), Step::Files);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_json() {
        let args = parse(&["-p", "discord", "-d", "gdrive", "--all", "--json"]);
        run(args, &AppSettings::default()).await.unwrap();
    }
}
