//! # lines 命令实现
//!
//! 把多个物相载入 `PhaseCollection`，设定 P/T 后输出衍射线位置。
//!
//! ## 功能
//! - 加载失败的物相报告后跳过，其余继续
//! - 可选排序
//! - 导出 CSV / XY，或打印位置表
//! - 给定积分图谱时打印按可见范围缩放后的线高
//!
//! ## 依赖关系
//! - 使用 `cli/lines.rs` 定义的 LinesArgs
//! - 使用 `jcpdskit::collection`, `jcpdskit::xrd::export`
//! - 使用 `utils/output.rs`

use crate::cli::lines::LinesArgs;
use crate::utils::output;

use jcpdskit::error::{JcpdsError, Result};
use jcpdskit::parsers::pattern::parse_pattern_file;
use jcpdskit::xrd::export::{self, line_records};
use jcpdskit::{PatternUnit, PhaseCollection, Spectrum};

use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 位置表格行
#[derive(Debug, Clone, Tabled)]
struct LineRow {
    #[tabled(rename = "Phase")]
    phase: String,
    #[tabled(rename = "(hkl)")]
    hkl: String,
    #[tabled(rename = "d (Å)")]
    d: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "I")]
    intensity: String,
}

/// 执行 lines 命令
pub fn execute(args: LinesArgs) -> Result<()> {
    output::print_header("JCPDS Line Positions");

    let unit = PatternUnit::from(args.unit);
    let mut phases = load_phases(&args.files)?;

    phases.set_pressure_all(args.pressure)?;
    phases.set_temperature_all(args.temperature)?;
    for ind in 0..phases.len() {
        if let Some(key) = args.sort {
            phases.phase_mut(ind)?.sort_reflections(key.into(), args.reverse);
        }
        phases.get_lines_d(ind)?;
    }

    output::print_info(&format!(
        "P = {} GPa, T = {} K, λ = {} Å, unit = {}",
        args.pressure, args.temperature, args.wavelength, unit
    ));

    if let Some(out) = &args.output {
        export_lines(&phases, out, args.wavelength, unit)?;
    }

    match &args.pattern {
        Some(pattern_path) => print_rescaled(&phases, pattern_path, &args, unit)?,
        None if args.output.is_none() => print_positions(&phases, args.wavelength, unit)?,
        None => {}
    }

    Ok(())
}

/// 逐个加载物相；格式错误的文件报告后跳过
fn load_phases(files: &[PathBuf]) -> Result<PhaseCollection> {
    let mut phases = PhaseCollection::new();

    for file in files {
        match phases.add_phase(file) {
            Ok(_) => {}
            Err(e @ JcpdsError::PhaseLoadError { .. }) => output::print_error(&e.to_string()),
            Err(e) => output::print_error(&format!("{}: {}", file.display(), e)),
        }
    }

    if phases.is_empty() {
        return Err(JcpdsError::Other("No phase could be loaded".to_string()));
    }

    output::print_success(&format!("Loaded {} of {} phase(s)", phases.len(), files.len()));
    Ok(phases)
}

/// 导出路径：单个物相直接使用 `out`，多个物相在文件名后追加物相名
fn export_path(out: &Path, phase_name: &str, multiple: bool) -> PathBuf {
    if !multiple {
        return out.to_path_buf();
    }
    let stem = out.file_stem().and_then(|s| s.to_str()).unwrap_or("lines");
    let file_name = match out.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, phase_name, ext),
        None => format!("{}_{}", stem, phase_name),
    };
    out.with_file_name(file_name)
}

fn export_lines(
    phases: &PhaseCollection,
    out: &Path,
    wavelength: f64,
    unit: PatternUnit,
) -> Result<()> {
    let is_csv = out
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    for phase in phases.phases() {
        let path = export_path(out, &phase.name(), phases.len() > 1);
        let records = line_records(phase, wavelength);
        if is_csv {
            export::to_csv(&records, &path)?;
        } else {
            export::to_xy(&records, wavelength, unit, &path)?;
        }
        output::print_conversion(&phase.name(), &path.display().to_string());
    }

    Ok(())
}

fn format_position(x: f64) -> String {
    if x.is_finite() {
        format!("{:.4}", x)
    } else {
        "n/a".to_string()
    }
}

fn print_positions(phases: &PhaseCollection, wavelength: f64, unit: PatternUnit) -> Result<()> {
    let mut rows = Vec::new();

    for (ind, phase) in phases.phases().iter().enumerate() {
        let positions = phases.get_phase_line_positions(ind, unit, wavelength)?;
        for (r, x) in phase.reflections().iter().zip(positions.iter()) {
            rows.push(LineRow {
                phase: phase.name(),
                hkl: format!("({} {} {})", r.h, r.k, r.l),
                d: format!("{:.4}", r.d),
                position: format_position(*x),
                intensity: format!("{:.1}", r.intensity),
            });
        }
    }

    output::print_header(&format!("{} Lines ({})", rows.len(), unit));
    println!("{}", Table::new(&rows));
    Ok(())
}

/// 解析 "a:b" 或 "a-b" 形式的范围
fn parse_range(range: &str) -> Result<(f64, f64)> {
    let invalid = || JcpdsError::InvalidRange(range.to_string());

    let (lo, hi) = match range.split_once(':') {
        Some(parts) => parts,
        None => {
            // 允许下限为负数，如 "-50-100"
            let split_at = range
                .char_indices()
                .skip(1)
                .find(|&(_, c)| c == '-')
                .map(|(i, _)| i)
                .ok_or_else(invalid)?;
            (&range[..split_at], &range[split_at + 1..])
        }
    };

    let min: f64 = lo.trim().parse().map_err(|_| invalid())?;
    let max: f64 = hi.trim().parse().map_err(|_| invalid())?;

    if max <= min {
        return Err(JcpdsError::InvalidRange(format!("{} (must be min < max)", range)));
    }

    Ok((min, max))
}

fn extent(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

fn print_rescaled(
    phases: &PhaseCollection,
    pattern_path: &Path,
    args: &LinesArgs,
    unit: PatternUnit,
) -> Result<()> {
    let pattern = parse_pattern_file(pattern_path)?;
    if pattern.is_empty() {
        return Err(JcpdsError::InvalidArgument(format!(
            "Pattern {} has no data points",
            pattern_path.display()
        )));
    }

    let (x, y) = pattern.data();
    let x_range = match &args.x_range {
        Some(r) => parse_range(r)?,
        None => extent(x),
    };
    let y_range = match &args.y_range {
        Some(r) => parse_range(r)?,
        None => extent(y),
    };

    output::print_info(&format!(
        "Pattern '{}': x = {:.3}..{:.3}, y = {:.1}..{:.1}",
        pattern.name, x_range.0, x_range.1, y_range.0, y_range.1
    ));

    for (ind, phase) in phases.phases().iter().enumerate() {
        let rescaled = phases.get_rescaled_reflections(
            ind,
            &pattern,
            x_range,
            y_range,
            args.wavelength,
            unit,
        )?;

        let rows: Vec<LineRow> = phase
            .reflections()
            .iter()
            .zip(rescaled.positions.iter().zip(rescaled.intensities.iter()))
            .filter(|(_, (x, _))| **x >= x_range.0 && **x <= x_range.1)
            .map(|(r, (x, height))| LineRow {
                phase: phase.name(),
                hkl: format!("({} {} {})", r.h, r.k, r.l),
                d: format!("{:.4}", r.d),
                position: format_position(*x),
                intensity: format!("{:.1}", height),
            })
            .collect();

        output::print_header(&format!(
            "{}: {} visible line(s), baseline {:.1}",
            phase.name(),
            rows.len(),
            rescaled.baseline
        ));
        if !rows.is_empty() {
            println!("{}", Table::new(&rows));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("5:25").unwrap(), (5.0, 25.0));
        assert_eq!(parse_range("5-90").unwrap(), (5.0, 90.0));
        assert_eq!(parse_range("-50-100").unwrap(), (-50.0, 100.0));
        assert_eq!(parse_range("-50:-10").unwrap(), (-50.0, -10.0));
        assert!(parse_range("10:5").is_err());
        assert!(parse_range("abc").is_err());
    }

    #[test]
    fn test_export_path() {
        let out = Path::new("/tmp/lines.csv");
        assert_eq!(export_path(out, "au", false), PathBuf::from("/tmp/lines.csv"));
        assert_eq!(export_path(out, "au", true), PathBuf::from("/tmp/lines_au.csv"));
    }

    #[test]
    fn test_extent() {
        assert_eq!(extent(&[3.0, -1.0, 7.5]), (-1.0, 7.5));
    }
}
