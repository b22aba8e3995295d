use anyhow::Result;
use cache_sweep_lib::commands;
use cache_sweep_lib::modules::common::logging;
use clap::Parser;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "cache-sweep")]
#[command(about = "浏览器缓存清理工具", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    #[command(flatten)]
    settings: commands::GlobalArgs,

    /// 详细输出模式
    #[arg(short, long, global = true)]
    verbose: bool,
}

// 单线程调度：进度推进与其他输入处理在同一线程上交替进行
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.settings.to_config();

    // 初始化日志
    logging::init_logging(cli.verbose, &config.log_dir());

    if let Err(e) = config.validate() {
        eprintln!("错误: {}", e);
        process::exit(2);
    }

    // 执行命令
    let result = match cli.command {
        commands::Command::ClearAll(cmd) => commands::clear::execute_all(cmd, &config).await,
        commands::Command::Clear(cmd) => commands::clear::execute_selected(cmd, &config).await,
        commands::Command::History(cmd) => commands::history::execute(cmd, &config).await,
        commands::Command::Status(cmd) => commands::status::execute(cmd, &config).await,
        commands::Command::Store(cmd) => commands::store::execute(cmd, &config).await,
        commands::Command::Interactive(cmd) => {
            commands::interactive::execute(cmd, &config).await
        }
    };

    match result {
        Ok(_) => {}
        Err(e) => {
            if cli.verbose {
                tracing::error!("错误: {}", e);
            } else {
                eprintln!("错误: {}", e);
            }
            process::exit(1);
        }
    }

    Ok(())
}
