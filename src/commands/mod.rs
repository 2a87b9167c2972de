//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `utils/` 和 jcpdskit 库
//! - 子模块: show, lines, convert, lookup

pub mod convert;
pub mod lines;
pub mod lookup;
pub mod show;

use crate::cli::Commands;
use jcpdskit::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Show(args) => show::execute(args),
        Commands::Lines(args) => lines::execute(args),
        Commands::Convert(args) => convert::execute(args),
        Commands::Lookup(args) => lookup::execute(args),
    }
}
