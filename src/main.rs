use clap::Parser;

use lsb_sentinel::{
    cli::{Cli, Commands},
    handler::{handle_capacity, handle_hide, handle_recover},
};

/// 程序的主入口点
///
/// 负责初始化日志、解析命令行参数，并根据指定的子命令
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 解析命令行参数
    let cli = Cli::parse();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Hide(args) => handle_hide(args).map(|_| ()),
        Commands::Recover(args) => handle_recover(args).map(|_| ()),
        Commands::Capacity(args) => handle_capacity(args),
    }
}
