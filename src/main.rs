//! # jcpdskit - JCPDS 物相命令行工具
//!
//! 读取 JCPDS 物相文件，按状态方程计算高温高压下的衍射线位置。
//!
//! ## 子命令
//! - `show` - 物相参数与衍射线表
//! - `lines` - 多物相衍射线位置、导出与按图谱缩放
//! - `convert` - 批量转换为 version 4 格式
//! - `lookup` - 查询单条衍射线的 d 间距
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     └── jcpdskit (库: models/eos/xrd/parsers/collection/library)
//!   ├── batch/      (批量文件处理)
//!   └── utils/      (工具函数)
//! ```

mod batch;
mod cli;
mod commands;
mod utils;

use clap::Parser;
use cli::Cli;
use env_logger::Env;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
