//! # lines 子命令 CLI 定义
//!
//! 计算一组物相在指定 P/T 下的衍射线位置，可导出或按图谱缩放。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/lines.rs`

use clap::{Args, ValueEnum};
use jcpdskit::{PatternUnit, SortKey};
use std::path::PathBuf;

/// 预定义辐射源波长 (Å)
pub fn get_predefined_wavelength(name: &str) -> Option<f64> {
    match name.to_lowercase().as_str() {
        "cu-ka" | "cuka" => Some(1.5418),
        "cu-ka1" | "cuka1" => Some(1.5406),
        "cu-ka2" | "cuka2" => Some(1.5444),
        "cu-kb1" | "cukb1" => Some(1.3922),
        "mo-ka" | "moka" => Some(0.7107),
        "mo-ka1" | "moka1" => Some(0.7093),
        "co-ka" | "coka" => Some(1.7903),
        "fe-ka" | "feka" => Some(1.9373),
        "cr-ka" | "crka" => Some(2.2910),
        "ag-ka" | "agka" => Some(0.5609),
        _ => None,
    }
}

/// 解析波长输入（辐射源名称或数值）
pub fn parse_wavelength(input: &str) -> Result<f64, String> {
    if let Some(wl) = get_predefined_wavelength(input) {
        return Ok(wl);
    }
    match input.parse::<f64>() {
        Ok(wl) if wl > 0.0 => Ok(wl),
        _ => Err(format!(
            "Invalid wavelength '{}'. Use a positive number in Å (e.g., 0.3344) or a name: cu-ka, mo-ka, co-ka, fe-ka, cr-ka, ag-ka",
            input
        )),
    }
}

/// 横轴单位
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum UnitArg {
    /// Two-theta in degrees
    #[default]
    Tth,
    /// Momentum transfer Q in 1/Å
    Q,
    /// d-spacing in Å
    D,
}

impl From<UnitArg> for PatternUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Tth => PatternUnit::TwoTheta,
            UnitArg::Q => PatternUnit::Q,
            UnitArg::D => PatternUnit::D,
        }
    }
}

/// 衍射线排序键
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SortArg {
    H,
    K,
    L,
    Intensity,
    D,
}

impl From<SortArg> for SortKey {
    fn from(key: SortArg) -> Self {
        match key {
            SortArg::H => SortKey::H,
            SortArg::K => SortKey::K,
            SortArg::L => SortKey::L,
            SortArg::Intensity => SortKey::Intensity,
            SortArg::D => SortKey::D,
        }
    }
}

/// lines 子命令参数
#[derive(Args, Debug)]
pub struct LinesArgs {
    /// JCPDS files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Pressure in GPa
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pressure: f64,

    /// Temperature in K
    #[arg(short, long, default_value_t = 298.0)]
    pub temperature: f64,

    /// X-ray wavelength: radiation source name (cu-ka, mo-ka, etc.) or value in Å
    #[arg(short, long, default_value = "0.3344", value_parser = parse_wavelength)]
    pub wavelength: f64,

    /// Unit of the line positions
    #[arg(short, long, value_enum, default_value = "tth")]
    pub unit: UnitArg,

    /// Sort reflections before output
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Reverse the sorted order
    #[arg(long, default_value_t = false, requires = "sort")]
    pub reverse: bool,

    /// Export lines to a file (.csv or .xy); one file per phase when several are given
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Integrated pattern (.xy) used to rescale line heights
    #[arg(long)]
    pub pattern: Option<PathBuf>,

    /// Visible x range for rescaling (e.g., "5:25"); defaults to the pattern extent
    #[arg(long, requires = "pattern")]
    pub x_range: Option<String>,

    /// Visible y range for rescaling (e.g., "0:1000"); defaults to the pattern extent
    #[arg(long, requires = "pattern", allow_hyphen_values = true)]
    pub y_range: Option<String>,
}
