//! # XY 图谱解析器
//!
//! 读取两列文本格式的积分衍射图谱（横坐标、强度）。
//!
//! ## 格式
//! ```text
//! # 2theta  intensity
//! 5.000   12.5
//! 5.010   13.1
//! ```
//! 以 `#` 开头的行和空行被跳过，列之间可以是空白或逗号。
//!
//! ## 依赖关系
//! - 被 `commands/lines.rs` 使用
//! - 实现 `collection::Spectrum`

use crate::collection::Spectrum;
use crate::error::{JcpdsError, Result};

use std::fs;
use std::path::Path;

const FORMAT: &str = "XY";

/// 衍射图谱
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pattern {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Pattern {
    pub fn new(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(JcpdsError::InvalidArgument(format!(
                "pattern x and y lengths differ ({} vs {})",
                x.len(),
                y.len()
            )));
        }
        Ok(Pattern {
            name: name.into(),
            x,
            y,
        })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

impl Spectrum for Pattern {
    fn data(&self) -> (&[f64], &[f64]) {
        (&self.x, &self.y)
    }
}

/// 解析 XY 图谱文件
pub fn parse_pattern_file(path: &Path) -> Result<Pattern> {
    if !path.exists() {
        return Err(JcpdsError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| JcpdsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    parse_pattern_content(&content, name, &path.display().to_string())
}

/// 从字符串内容解析 XY 图谱
pub fn parse_pattern_content(content: &str, name: &str, source: &str) -> Result<Pattern> {
    let mut x = Vec::new();
    let mut y = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty());

        let (xs, ys) = match (fields.next(), fields.next()) {
            (Some(xs), Some(ys)) => (xs, ys),
            _ => {
                return Err(JcpdsError::ParseError {
                    format: FORMAT.to_string(),
                    path: source.to_string(),
                    reason: format!("line {}: expected two columns", line_no + 1),
                })
            }
        };

        let parse = |s: &str| {
            s.parse::<f64>().map_err(|_| JcpdsError::ParseError {
                format: FORMAT.to_string(),
                path: source.to_string(),
                reason: format!("line {}: invalid number '{}'", line_no + 1, s),
            })
        };

        x.push(parse(xs)?);
        y.push(parse(ys)?);
    }

    log::debug!("Read {} points from {}", x.len(), source);
    Pattern::new(name, x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_xy_content() {
        let content = "# tth intensity\n5.0 10.0\n5.1,11.5\n\n5.2\t9.0\n";
        let pattern = parse_pattern_content(content, "test", "test.xy").unwrap();
        assert_eq!(pattern.x, vec![5.0, 5.1, 5.2]);
        assert_eq!(pattern.y, vec![10.0, 11.5, 9.0]);
        assert_eq!(pattern.data().0.len(), 3);
    }

    #[test]
    fn test_single_column_fails() {
        assert!(parse_pattern_content("5.0\n", "bad", "bad.xy").is_err());
    }

    #[test]
    fn test_parse_xy_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0 2.0").unwrap();
        writeln!(file, "3.0 4.0").unwrap();

        let pattern = parse_pattern_file(file.path()).unwrap();
        assert_eq!(pattern.len(), 2);
        assert!(!pattern.is_empty());
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        assert!(Pattern::new("p", vec![1.0], vec![]).is_err());
    }
}
