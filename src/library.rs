//! # JCPDS 文件库查询
//!
//! 在给定目录中按化合物名查找 `<name>.jcpds`，
//! 计算指定 P/T 下某条衍射线的 d 间距。
//!
//! ## 查询格式
//! - `"Au 111"`：紧凑写法，每个数字是一个指数
//! - `"Au 1 1 1"` / `"Qz -1 1 0"`：分开写法，支持负指数
//!
//! ## 依赖关系
//! - 被 `commands/lookup.rs` 使用
//! - 使用 `models/phase.rs`

use crate::error::{JcpdsError, Result};
use crate::models::Phase;

use std::path::{Path, PathBuf};

/// JCPDS 文件目录
#[derive(Debug, Clone)]
pub struct JcpdsLibrary {
    dir: PathBuf,
}

impl JcpdsLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(JcpdsError::DirectoryNotFound {
                path: dir.display().to_string(),
            });
        }
        Ok(JcpdsLibrary { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 化合物对应的文件路径
    pub fn phase_path(&self, compound: &str) -> PathBuf {
        self.dir.join(format!("{}.jcpds", compound))
    }

    /// 加载化合物并计算到 P/T
    pub fn load_phase(&self, compound: &str, pressure: f64, temperature: f64) -> Result<Phase> {
        let mut phase = Phase::from_file(&self.phase_path(compound))?;
        phase.compute_d(Some(pressure), Some(temperature))?;
        Ok(phase)
    }

    /// 查询一条衍射线的 d 间距；文件中没有该 (hkl) 时返回 `None`
    pub fn lookup_line(&self, query: &str, pressure: f64, temperature: f64) -> Result<Option<f64>> {
        let (compound, hkl) = parse_line_query(query)?;
        let phase = self.load_phase(&compound, pressure, temperature)?;

        let d = phase
            .reflections()
            .iter()
            .find(|r| r.hkl() == hkl)
            .map(|r| r.d);

        if d.is_none() {
            log::warn!("{} has no ({} {} {}) reflection", compound, hkl[0], hkl[1], hkl[2]);
        }
        Ok(d)
    }
}

/// 在目录 `dir` 中查询一条衍射线的 d 间距
pub fn lookup_jcpds_line(
    query: &str,
    pressure: f64,
    temperature: f64,
    dir: &Path,
) -> Result<Option<f64>> {
    JcpdsLibrary::new(dir)?.lookup_line(query, pressure, temperature)
}

/// 解析 `"<compound> <hkl>"` 查询
pub fn parse_line_query(query: &str) -> Result<(String, [i32; 3])> {
    let invalid = || {
        JcpdsError::InvalidArgument(format!(
            "'{}' is not a line query (expected e.g. 'Au 111' or 'Au 1 1 1')",
            query
        ))
    };

    let mut parts = query.split_whitespace();
    let compound = parts.next().ok_or_else(invalid)?.to_string();
    let rest: Vec<&str> = parts.collect();

    let indices: Vec<i32> = match rest.as_slice() {
        [compact] if compact.chars().all(|c| c.is_ascii_digit()) && compact.len() == 3 => compact
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| d as i32)
            .collect(),
        [_, _, _] => rest
            .iter()
            .map(|s| s.parse::<i32>().map_err(|_| invalid()))
            .collect::<Result<_>>()?,
        _ => return Err(invalid()),
    };

    Ok((compound, [indices[0], indices[1], indices[2]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn library() -> JcpdsLibrary {
        JcpdsLibrary::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("jcpds"))
            .unwrap()
    }

    #[test]
    fn test_parse_compact_query() {
        let (compound, hkl) = parse_line_query("Au 111").unwrap();
        assert_eq!(compound, "Au");
        assert_eq!(hkl, [1, 1, 1]);
    }

    #[test]
    fn test_parse_spaced_query() {
        assert_eq!(
            parse_line_query("diopside -2 2 1").unwrap(),
            ("diopside".to_string(), [-2, 2, 1])
        );
        assert_eq!(parse_line_query("  Au  2 0 0 ").unwrap().1, [2, 0, 0]);
    }

    #[test]
    fn test_parse_invalid_queries() {
        for query in ["", "Au", "Au 11", "Au 1 1", "Au 1 x 1", "Au 1111"] {
            assert!(parse_line_query(query).is_err(), "{query}");
        }
    }

    #[test]
    fn test_lookup_ambient() {
        let d = library().lookup_line("au_Anderson 200", 0.0, 298.0).unwrap().unwrap();
        assert_relative_eq!(d, 4.0786 / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lookup_compressed() {
        let lib = library();
        let d0 = lib.lookup_line("au_Anderson 111", 0.0, 298.0).unwrap().unwrap();
        let d = lib.lookup_line("au_Anderson 1 1 1", 30.0, 298.0).unwrap().unwrap();
        assert!(d < d0);
    }

    #[test]
    fn test_lookup_missing_line() {
        assert_eq!(library().lookup_line("au_Anderson 1 0 0", 0.0, 298.0).unwrap(), None);
    }

    #[test]
    fn test_lookup_missing_compound() {
        let err = library().lookup_line("Unobtainium 111", 0.0, 298.0).unwrap_err();
        assert!(matches!(err, JcpdsError::FileNotFound { .. }));
    }

    #[test]
    fn test_missing_directory() {
        let err = lookup_jcpds_line("Au 111", 0.0, 298.0, Path::new("/no/such/dir")).unwrap_err();
        assert!(matches!(err, JcpdsError::DirectoryNotFound { .. }));
    }
}
