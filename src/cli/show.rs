//! # show 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/show.rs`

use clap::Args;
use std::path::PathBuf;

/// show 子命令参数
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// JCPDS file
    pub file: PathBuf,

    /// Pressure in GPa
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pressure: f64,

    /// Temperature in K
    #[arg(short, long, default_value_t = 298.0)]
    pub temperature: f64,
}
