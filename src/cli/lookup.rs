//! # lookup 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/lookup.rs`

use clap::Args;
use std::path::PathBuf;

/// lookup 子命令参数
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Line query: compound name and Miller indices ("Au 111" or "Au 1 1 1")
    pub query: String,

    /// Pressure in GPa
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pressure: f64,

    /// Temperature in K
    #[arg(short, long, default_value_t = 298.0)]
    pub temperature: f64,

    /// Directory containing <compound>.jcpds files
    #[arg(long, env = "JCPDS_PATH")]
    pub jcpds_path: PathBuf,
}
