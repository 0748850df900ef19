//! Filehop CLI
//!
//! 命令行客户端：查看数据目录、无界面地跑完一次传输向导、管理设置

mod runner;

use anyhow::Result;
use clap::{Parser, Subcommand};
use filehop_core::{AppSettings, Catalog, PlatformKind, ProviderKind};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "filehop", version, about = "把社交平台上的文件搬到云存储（模拟）")]
struct Cli {
    /// 输出调试日志到 stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 列出来源平台、目标存储和候选文件
    Catalog {
        /// 自定义数据目录 (JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },
    /// 按参数走完向导并运行模拟传输
    Run(runner::RunArgs),
    /// 设置
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// 显示当前设置
    Show,
    /// 写入默认设置文件
    Init {
        /// 覆盖已有文件
        #[arg(long)]
        force: bool,
    },
    /// 显示设置文件路径
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = AppSettings::load();
    init_logging(cli.verbose || settings.verbose);

    match cli.command {
        Commands::Catalog { catalog, json } => {
            let catalog = match catalog {
                Some(path) => Catalog::from_json_file(&path)?,
                None => settings.catalog()?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                print_catalog(&catalog);
            }
        }
        Commands::Run(args) => {
            runner::run(args, &settings).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("# {}", AppSettings::config_path().display());
                println!("tick_interval_ms = {}", settings.tick_interval_ms);
                println!(
                    "catalog_path = {}",
                    settings
                        .catalog_path
                        .as_ref()
                        .map_or_else(|| "(demo)".to_string(), |p| p.display().to_string())
                );
                println!("verbose = {}", settings.verbose);
                let org = settings.default_organization;
                println!("auto_tag = {}", org.auto_tag);
                println!("create_folders = {}", org.create_folders);
                println!("remove_original = {}", org.remove_original);
            }
            ConfigAction::Init { force } => {
                let path = AppSettings::config_path();
                if path.exists() && !force {
                    anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
                }
                AppSettings::default().save()?;
                println!("📝 已写入 {}", path.display());
            }
            ConfigAction::Path => {
                println!("{}", AppSettings::config_path().display());
            }
        },
    }

    Ok(())
}

/// 初始化日志：输出到 stderr，避免和进度输出混在一起
fn init_logging(verbose: bool) {
    // 桥接 log crate（filehop-core 使用）到 tracing
    let _ = tracing_log::LogTracer::init();

    let default = if verbose {
        "info,filehop_core=debug"
    } else {
        "warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .try_init();
}

fn print_catalog(catalog: &Catalog) {
    let status = |connected: bool| if connected { "✅" } else { "⛔" };

    println!("📱 来源平台:");
    for platform in &catalog.platforms {
        println!(
            "   {} {:<10} {:<10} {}",
            status(platform.connected),
            platform.kind.id(),
            platform.kind.name(),
            platform.account_name
        );
    }

    println!("☁️  目标存储:");
    for destination in &catalog.destinations {
        println!(
            "   {} {:<10} {:<13} {:<16} ({}%)",
            status(destination.connected),
            destination.kind.id(),
            destination.kind.name(),
            destination.storage_label(),
            destination.usage_percent()
        );
    }

    println!("📂 候选文件:");
    for file in &catalog.files {
        println!(
            "   [{}] {} {:<28} {:>8}  {}",
            file.id,
            file.category.icon(),
            file.name,
            file.size,
            file.category
        );
    }

    let unknown_platforms: Vec<&str> = PlatformKind::ALL
        .iter()
        .filter(|kind| catalog.platform(**kind).is_none())
        .map(|kind| kind.id())
        .collect();
    let unknown_destinations: Vec<&str> = ProviderKind::ALL
        .iter()
        .filter(|kind| catalog.destination(**kind).is_none())
        .map(|kind| kind.id())
        .collect();
    if !unknown_platforms.is_empty() || !unknown_destinations.is_empty() {
        println!(
            "   (未配置: {})",
            [unknown_platforms, unknown_destinations].concat().join(", ")
        );
    }
}
