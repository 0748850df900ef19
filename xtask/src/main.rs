use anyhow::Result;
use clap::{Parser, Subcommand};
use xshell::{Shell, cmd};

#[derive(Parser)]
#[command(name = "xtask", about = "Filehop 开发任务自动化")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 构建所有组件 (release)
    Build,
    /// 运行 TUI (开发模式)
    Tui {
        /// 日志级别 (trace, debug, info, warn, error)
        #[arg(short, long, default_value = "info")]
        log_level: String,
        /// 日志输出文件 (默认 /tmp/filehop.log)
        #[arg(short = 'o', long)]
        log_file: Option<String>,
    },
    /// 用演示数据跑一次无界面传输
    Demo {
        /// tick 间隔（毫秒）
        #[arg(long, default_value_t = 50)]
        interval_ms: u64,
    },
    /// 运行测试
    Test,
    /// 清理构建产物
    Clean,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    // 确保在项目根目录执行
    let project_root = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => std::path::PathBuf::from(dir)
            .parent()
            .map(std::path::Path::to_path_buf)
            .unwrap_or_default(),
        Err(_) => std::env::current_dir()?,
    };
    sh.change_dir(&project_root);

    match cli.command {
        Commands::Build => build(&sh)?,
        Commands::Tui {
            log_level,
            log_file,
        } => tui(&sh, &log_level, log_file)?,
        Commands::Demo { interval_ms } => demo(&sh, interval_ms)?,
        Commands::Test => test(&sh)?,
        Commands::Clean => clean(&sh)?,
    }

    Ok(())
}

fn build(sh: &Shell) -> Result<()> {
    println!("🔨 构建所有组件...");
    cmd!(sh, "cargo build --release -p filehop-cli -p filehop-tui").run()?;
    println!("✅ 构建完成");
    Ok(())
}

fn tui(sh: &Shell, log_level: &str, log_file: Option<String>) -> Result<()> {
    let log_file = log_file.unwrap_or_else(|| "/tmp/filehop.log".to_string());

    println!("🖥️  启动 TUI 调试模式...");
    println!("   日志级别: {}", log_level);
    println!("   日志文件: {}", log_file);
    println!();
    println!("💡 提示: 在另一个终端运行以下命令查看实时日志:");
    println!("   tail -f {}", log_file);
    println!();

    let rust_log = format!("{level},filehop_core={level}", level = log_level);

    // 使用 shell 执行以支持重定向
    let command = format!(
        "RUST_LOG='{}' cargo run -p filehop-tui 2>> '{}'",
        rust_log, log_file
    );

    cmd!(sh, "bash -c {command}").run()?;

    println!();
    println!("📁 日志已保存到: {}", log_file);
    Ok(())
}

fn demo(sh: &Shell, interval_ms: u64) -> Result<()> {
    println!("🚀 运行演示传输...");
    let interval = interval_ms.to_string();
    cmd!(
        sh,
        "cargo run -p filehop-cli -- run --platform telegram --destination gdrive --all --interval-ms {interval}"
    )
    .run()?;
    Ok(())
}

fn test(sh: &Shell) -> Result<()> {
    println!("🧪 运行测试...");
    cmd!(sh, "cargo test --workspace").run()?;
    println!("✅ 测试完成");
    Ok(())
}

fn clean(sh: &Shell) -> Result<()> {
    println!("🧹 清理构建产物...");
    cmd!(sh, "cargo clean").run()?;
    println!("✅ 清理完成");
    Ok(())
}
