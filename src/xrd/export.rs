//! # 衍射线导出
//!
//! 把物相在当前 P/T 下的衍射线导出为 CSV 或 XY 竖线列表。
//!
//! ## 支持格式
//! - CSV: d, 2θ, Q, intensity, h, k, l 的完整数据
//! - XY: 指定横轴单位下的 (位置, 强度)，可直接叠加到积分图谱上
//!
//! ## 依赖关系
//! - 被 `commands/lines.rs` 调用
//! - 使用 `models/phase.rs` 和 `xrd/conversion.rs`
//! - 使用 `csv` + `serde` 写入 CSV 文件

use crate::error::{JcpdsError, Result};
use crate::models::Phase;
use crate::xrd::conversion::{d_to_q, d_to_two_theta, PatternUnit};

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 一条衍射线的导出记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRecord {
    pub phase: String,
    pub h: i32,
    pub k: i32,
    pub l: i32,
    pub intensity: f64,
    pub d0: f64,
    pub d: f64,
    pub two_theta: f64,
    pub q: f64,
}

impl LineRecord {
    /// 指定单位下的线位置
    pub fn position(&self, unit: PatternUnit) -> f64 {
        match unit {
            PatternUnit::TwoTheta => self.two_theta,
            PatternUnit::Q => self.q,
            PatternUnit::D => self.d,
        }
    }
}

/// 按物相当前的衍射线顺序生成导出记录
pub fn line_records(phase: &Phase, wavelength: f64) -> Vec<LineRecord> {
    let name = phase.name();
    phase
        .reflections()
        .iter()
        .map(|r| LineRecord {
            phase: name.clone(),
            h: r.h,
            k: r.k,
            l: r.l,
            intensity: r.intensity,
            d0: r.d0,
            d: r.d,
            two_theta: d_to_two_theta(r.d, wavelength),
            q: d_to_q(r.d, wavelength),
        })
        .collect()
}

/// 导出为 CSV
pub fn to_csv(records: &[LineRecord], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush().map_err(|e| JcpdsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出为 XY 竖线列表
///
/// 2θ 超出可达范围（λ > 2d）的线被跳过。
pub fn to_xy(
    records: &[LineRecord],
    wavelength: f64,
    unit: PatternUnit,
    output_path: &Path,
) -> Result<()> {
    let write_err = |e| JcpdsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# JCPDS lines").map_err(write_err)?;
    writeln!(writer, "# Wavelength: {:.6} Angstrom", wavelength).map_err(write_err)?;
    writeln!(writer, "# Columns: {}, Intensity (relative)", unit).map_err(write_err)?;

    let mut skipped = 0;
    for record in records {
        let x = record.position(unit);
        if !x.is_finite() {
            skipped += 1;
            continue;
        }
        writeln!(writer, "{:.4}\t{:.2}", x, record.intensity).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;

    if skipped > 0 {
        log::warn!(
            "{} line(s) unreachable at λ = {} Å were not written to {}",
            skipped,
            wavelength,
            output_path.display()
        );
    }

    Ok(())
}
