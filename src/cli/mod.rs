//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `show`: 显示物相参数和衍射线表
//! - `lines`: 计算多个物相在 P/T 下的衍射线位置
//! - `convert`: 批量转换为 version 4 JCPDS 格式
//! - `lookup`: 查询单条衍射线的 d 间距
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: show, lines, convert, lookup

pub mod convert;
pub mod lines;
pub mod lookup;
pub mod show;

use clap::{Parser, Subcommand};

/// jcpdskit - JCPDS 物相工具
#[derive(Parser)]
#[command(name = "jcpdskit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "JCPDS phase toolkit: EOS volumes and d-spacings at pressure and temperature", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Show a phase summary and its reflection table
    Show(show::ShowArgs),

    /// Compute line positions for one or more phases at P/T
    Lines(lines::LinesArgs),

    /// Rewrite JCPDS files (including legacy v1) in version 4 format
    Convert(convert::ConvertArgs),

    /// Look up the d-spacing of a single line, e.g. "Au 111"
    Lookup(lookup::LookupArgs),
}
