//! # JCPDS 格式解析器
//!
//! 解析并写出 JCPDS 物相文件。
//!
//! ## 关键字格式 (version ≥ 4)
//! ```text
//! VERSION:   4
//! COMMENT: Gold (Anderson et al.)
//! K0:       166.65
//! K0P:      5.4823
//! SYMMETRY: CUBIC
//! A:        4.0786
//! ...
//! DIHKL:    2.3548  100.0  1  1  1
//! ```
//!
//! ## 旧格式 (version 1)
//! ```text
//! comment line
//! symmetry_code, a0, k0, k0p0, c0/a0
//! column labels (忽略)
//! d0 intensity h k l
//! ...
//! ```
//! 晶系代码：1 = CUBIC，2 = HEXAGONAL
//!
//! ## 依赖关系
//! - 被 `models/phase.rs` 使用
//! - 使用 `models/` 数据模型
//! - 使用 `regex` 匹配关键字行

use crate::eos::EosParameters;
use crate::error::{JcpdsError, Result};
use crate::models::{CellParameters, Phase, Reflection, Symmetry};

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

const FORMAT: &str = "JCPDS";

static KEYWORD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9_]+)\s*:\s*(.*?)\s*$").expect("keyword regex is valid")
});

/// 从文件中读出的原始 JCPDS 内容
#[derive(Debug, Clone, Default)]
pub struct JcpdsRecord {
    pub version: String,
    pub comments: Vec<String>,
    pub symmetry: Symmetry,
    pub cell: CellParameters,
    pub eos: EosParameters,
    pub reflections: Vec<Reflection>,
}

/// 解析 JCPDS 文件
pub fn parse_jcpds_file(path: &Path) -> Result<JcpdsRecord> {
    if !path.exists() {
        return Err(JcpdsError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let bytes = fs::read(path).map_err(|e| JcpdsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    // 旧文件的注释里常有 Latin-1 字符 (Å, °)
    let content = String::from_utf8_lossy(&bytes);
    parse_jcpds_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 JCPDS 格式，`source` 仅用于错误信息
pub fn parse_jcpds_content(content: &str, source: &str) -> Result<JcpdsRecord> {
    let lines: Vec<&str> = content.lines().collect();

    let first = lines.first().ok_or_else(|| parse_error(source, "File is empty"))?;

    let is_keyword_format = KEYWORD_LINE
        .captures(first)
        .map(|caps| caps[1].eq_ignore_ascii_case("VERSION"))
        .unwrap_or(false);

    if is_keyword_format {
        parse_keyword_format(&lines, source)
    } else {
        parse_legacy_format(&lines, source)
    }
}

/// 关键字格式
fn parse_keyword_format(lines: &[&str], source: &str) -> Result<JcpdsRecord> {
    let mut record = JcpdsRecord::default();
    let mut symmetry: Option<Symmetry> = None;
    let mut a: Option<f64> = None;

    for (line_no, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let caps = match KEYWORD_LINE.captures(line) {
            Some(caps) => caps,
            None => {
                log::warn!("{}:{}: ignoring line without keyword", source, line_no + 1);
                continue;
            }
        };
        let tag = caps[1].to_uppercase();
        let value = &caps[2];

        match tag.as_str() {
            "VERSION" => record.version = value.to_string(),
            "COMMENT" => record.comments.push(value.to_string()),
            "K0" => record.eos.k0 = parse_float(value, source, line_no)?,
            "K0P" => record.eos.k0p0 = parse_float(value, source, line_no)?,
            "DK0DT" => record.eos.dk0dt = parse_float(value, source, line_no)?,
            "DK0PDT" => record.eos.dk0pdt = parse_float(value, source, line_no)?,
            "SYMMETRY" => symmetry = Some(value.parse::<Symmetry>().unwrap_or_default()),
            "A" => a = Some(parse_float(value, source, line_no)?),
            "B" => record.cell.b = parse_float(value, source, line_no)?,
            "C" => record.cell.c = parse_float(value, source, line_no)?,
            "ALPHA" => record.cell.alpha = parse_float(value, source, line_no)?,
            "BETA" => record.cell.beta = parse_float(value, source, line_no)?,
            "GAMMA" => record.cell.gamma = parse_float(value, source, line_no)?,
            // V0 总是由晶胞重新计算，这里只校验数值
            "VOLUME" => {
                parse_float(value, source, line_no)?;
            }
            "ALPHAT" => record.eos.alpha_t0 = parse_float(value, source, line_no)?,
            "DALPHADT" => record.eos.d_alpha_dt = parse_float(value, source, line_no)?,
            "DIHKL" => record
                .reflections
                .push(parse_reflection_row(value, source, line_no)?),
            _ => log::debug!("{}:{}: ignoring keyword {}", source, line_no + 1, tag),
        }
    }

    record.symmetry = symmetry.ok_or_else(|| missing_field(source, "SYMMETRY"))?;
    record.cell.a = a.ok_or_else(|| missing_field(source, "A"))?;

    Ok(record)
}

/// 旧版固定列格式
fn parse_legacy_format(lines: &[&str], source: &str) -> Result<JcpdsRecord> {
    let mut record = JcpdsRecord {
        version: "1".to_string(),
        ..JcpdsRecord::default()
    };

    record.comments.push(lines[0].trim_end().to_string());

    let header = lines
        .get(1)
        .ok_or_else(|| parse_error(source, "Missing legacy parameter line"))?;
    let params: Vec<f64> = header
        .replace(',', " ")
        .split_whitespace()
        .take(5)
        .map(|s| parse_float(s, source, 1))
        .collect::<Result<_>>()?;

    if params.len() < 5 {
        return Err(parse_error(
            source,
            "Legacy parameter line needs 5 fields (symmetry, a0, K0, K0', c0/a0)",
        ));
    }

    record.symmetry = Symmetry::from_legacy_code(params[0]).ok_or_else(|| {
        parse_error(source, &format!("Unknown legacy symmetry code {}", params[0]))
    })?;
    record.cell.a = params[1];
    record.eos.k0 = params[2];
    record.eos.k0p0 = params[3];
    record.cell.c = params[1] * params[4];

    // 第三行为列标题
    for (line_no, line) in lines.iter().enumerate().skip(3) {
        if line.trim().is_empty() {
            continue;
        }
        record
            .reflections
            .push(parse_reflection_row(line, source, line_no)?);
    }

    Ok(record)
}

/// 解析 `d0 intensity h k l` 行
fn parse_reflection_row(row: &str, source: &str, line_no: usize) -> Result<Reflection> {
    let values: Vec<f64> = row
        .split_whitespace()
        .map(|s| parse_float(s, source, line_no))
        .collect::<Result<_>>()?;

    if values.len() < 5 {
        return Err(parse_error(
            source,
            &format!(
                "line {}: reflection needs 5 fields (d0 intensity h k l)",
                line_no + 1
            ),
        ));
    }

    Ok(Reflection::new(
        values[2] as i32,
        values[3] as i32,
        values[4] as i32,
        values[1],
        values[0],
    ))
}

fn parse_float(value: &str, source: &str, line_no: usize) -> Result<f64> {
    value.trim().parse::<f64>().map_err(|_| {
        parse_error(
            source,
            &format!("line {}: invalid number '{}'", line_no + 1, value.trim()),
        )
    })
}

fn parse_error(source: &str, reason: &str) -> JcpdsError {
    JcpdsError::ParseError {
        format: FORMAT.to_string(),
        path: source.to_string(),
        reason: reason.to_string(),
    }
}

fn missing_field(source: &str, field: &str) -> JcpdsError {
    JcpdsError::MissingField {
        path: source.to_string(),
        field: field.to_string(),
    }
}

/// 将物相写为 version 4 关键字格式
pub fn to_jcpds_string(phase: &Phase) -> String {
    let cell = phase.cell0();
    let eos = phase.eos();

    let mut result = String::new();
    result.push_str("VERSION:   4\n");
    for comment in phase.comments() {
        result.push_str(&format!("COMMENT: {}\n", comment));
    }
    result.push_str(&format!("K0:       {}\n", eos.k0));
    result.push_str(&format!("K0P:      {}\n", eos.k0p0));
    result.push_str(&format!("DK0DT:    {}\n", eos.dk0dt));
    result.push_str(&format!("DK0PDT:   {}\n", eos.dk0pdt));
    result.push_str(&format!("SYMMETRY: {}\n", phase.symmetry()));
    result.push_str(&format!("A:        {}\n", cell.a));
    result.push_str(&format!("B:        {}\n", cell.b));
    result.push_str(&format!("C:        {}\n", cell.c));
    result.push_str(&format!("ALPHA:    {}\n", cell.alpha));
    result.push_str(&format!("BETA:     {}\n", cell.beta));
    result.push_str(&format!("GAMMA:    {}\n", cell.gamma));
    result.push_str(&format!("VOLUME:   {}\n", phase.v0()));
    result.push_str(&format!("ALPHAT:   {}\n", eos.alpha_t0));
    result.push_str(&format!("DALPHADT: {}\n", eos.d_alpha_dt));
    for r in phase.reflections() {
        result.push_str(&format!(
            "DIHKL:    {}\t{}\t{}\t{}\t{}\n",
            r.d0, r.intensity, r.h, r.k, r.l
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLD: &str = "VERSION:   4
COMMENT: Gold
K0:       166.65
K0P:      5.4823
DK0DT:    0.0
DK0PDT:   0.0
SYMMETRY: cubic
A:        4.0786
ALPHAT:   4.0e-5
FOO:      ignored
DIHKL:    2.3548\t100.0\t1\t1\t1
DIHKL:    2.0393   52.0   2   0   0
";

    #[test]
    fn test_parse_keyword_format() {
        let record = parse_jcpds_content(GOLD, "gold").unwrap();
        assert_eq!(record.version, "4");
        assert_eq!(record.comments, vec!["Gold".to_string()]);
        assert_eq!(record.symmetry, Symmetry::Cubic);
        assert_eq!(record.cell.a, 4.0786);
        assert_eq!(record.eos.k0, 166.65);
        assert_eq!(record.eos.alpha_t0, 4.0e-5);
        assert_eq!(record.reflections.len(), 2);
        assert_eq!(record.reflections[1].hkl(), [2, 0, 0]);
        assert_eq!(record.reflections[1].intensity, 52.0);
        assert_eq!(record.reflections[1].d0, 2.0393);
    }

    #[test]
    fn test_parse_legacy_format() {
        let content = "Zinc, hexagonal
2, 2.6649, 65.0, 4.0, 1.8563
 d     I    h  k  l
2.4730 53.0 0 0 2
2.3080 40.0 1 0 0

2.0910 100.0 1 0 1
";
        let record = parse_jcpds_content(content, "zn").unwrap();
        assert_eq!(record.version, "1");
        assert_eq!(record.comments, vec!["Zinc, hexagonal".to_string()]);
        assert_eq!(record.symmetry, Symmetry::Hexagonal);
        assert_eq!(record.cell.a, 2.6649);
        assert!((record.cell.c - 2.6649 * 1.8563).abs() < 1e-12);
        assert_eq!(record.eos.k0, 65.0);
        assert_eq!(record.eos.k0p0, 4.0);
        assert_eq!(record.reflections.len(), 3);
    }

    #[test]
    fn test_legacy_unknown_code_fails() {
        let content = "bad\n7 4.0 100 4 1\nlabels\n";
        assert!(matches!(
            parse_jcpds_content(content, "bad"),
            Err(JcpdsError::ParseError { .. })
        ));
    }

    #[test]
    fn test_malformed_number_fails() {
        let content = GOLD.replace("166.65", "16x.65");
        assert!(matches!(
            parse_jcpds_content(&content, "gold"),
            Err(JcpdsError::ParseError { .. })
        ));
    }

    #[test]
    fn test_short_reflection_row_fails() {
        let content = format!("{}DIHKL: 1.0 2.0 3\n", GOLD);
        assert!(parse_jcpds_content(&content, "gold").is_err());
    }

    #[test]
    fn test_missing_cell_edge_fails() {
        let content = GOLD.replace("A:        4.0786\n", "");
        assert!(matches!(
            parse_jcpds_content(&content, "gold"),
            Err(JcpdsError::MissingField { ref field, .. }) if field == "A"
        ));
    }

    #[test]
    fn test_unknown_symmetry_is_kept() {
        let content = GOLD.replace("cubic", "icosahedral");
        let record = parse_jcpds_content(&content, "gold").unwrap();
        assert_eq!(record.symmetry, Symmetry::Unknown("ICOSAHEDRAL".to_string()));
    }

    #[test]
    fn test_empty_file_fails() {
        assert!(parse_jcpds_content("", "empty").is_err());
    }
}
