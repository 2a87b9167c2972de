//! # 晶系定义
//!
//! JCPDS 文件中 `SYMMETRY:` 字段对应的晶系枚举。
//!
//! ## 依赖关系
//! - 被 `models/cell.rs`, `models/phase.rs`, `xrd/dspacing.rs` 使用
//! - 被 `parsers/jcpds.rs` 用于解析与写出

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 晶系
///
/// `Trigonal` 是旧文件中的别名，计算 d 间距时与 `Hexagonal` 完全相同，
/// 但作为独立变体保留，写回文件时不会被改写。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symmetry {
    #[default]
    Cubic,
    Tetragonal,
    Hexagonal,
    Trigonal,
    Rhombohedral,
    Orthorhombic,
    Monoclinic,
    Triclinic,
    /// 无法识别的晶系字符串（原样保留）
    Unknown(String),
}

impl Symmetry {
    /// 旧版 (version 1) 文件的晶系代码：1 = 立方，2 = 六方
    pub fn from_legacy_code(code: f64) -> Option<Self> {
        if code == 1.0 {
            Some(Symmetry::Cubic)
        } else if code == 2.0 {
            Some(Symmetry::Hexagonal)
        } else {
            None
        }
    }

    /// 用于 d 间距公式的晶系（Trigonal 折叠为 Hexagonal）
    pub fn crystal_system(&self) -> &Symmetry {
        match self {
            Symmetry::Trigonal => &Symmetry::Hexagonal,
            other => other,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Symmetry::Unknown(_))
    }

    /// 写入 JCPDS 文件时使用的关键字
    pub fn as_str(&self) -> &str {
        match self {
            Symmetry::Cubic => "CUBIC",
            Symmetry::Tetragonal => "TETRAGONAL",
            Symmetry::Hexagonal => "HEXAGONAL",
            Symmetry::Trigonal => "TRIGONAL",
            Symmetry::Rhombohedral => "RHOMBOHEDRAL",
            Symmetry::Orthorhombic => "ORTHORHOMBIC",
            Symmetry::Monoclinic => "MONOCLINIC",
            Symmetry::Triclinic => "TRICLINIC",
            Symmetry::Unknown(raw) => raw.as_str(),
        }
    }
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Symmetry {
    type Err = std::convert::Infallible;

    /// 大小写不敏感；未知字符串得到 `Unknown` 而不是错误
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Ok(match upper.as_str() {
            "CUBIC" => Symmetry::Cubic,
            "TETRAGONAL" => Symmetry::Tetragonal,
            "HEXAGONAL" => Symmetry::Hexagonal,
            "TRIGONAL" => Symmetry::Trigonal,
            "RHOMBOHEDRAL" => Symmetry::Rhombohedral,
            "ORTHORHOMBIC" => Symmetry::Orthorhombic,
            "MONOCLINIC" => Symmetry::Monoclinic,
            "TRICLINIC" => Symmetry::Triclinic,
            _ => Symmetry::Unknown(upper),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("cubic".parse::<Symmetry>().unwrap(), Symmetry::Cubic);
        assert_eq!(" Monoclinic ".parse::<Symmetry>().unwrap(), Symmetry::Monoclinic);
    }

    #[test]
    fn test_trigonal_kept_distinct() {
        let trig: Symmetry = "TRIGONAL".parse().unwrap();
        assert_eq!(trig, Symmetry::Trigonal);
        assert_ne!(trig, Symmetry::Hexagonal);
        assert_eq!(trig.crystal_system(), &Symmetry::Hexagonal);
        assert_eq!(trig.to_string(), "TRIGONAL");
    }

    #[test]
    fn test_unknown_round_trips_text() {
        let sym: Symmetry = "quasicrystal".parse().unwrap();
        assert!(!sym.is_known());
        assert_eq!(sym.to_string(), "QUASICRYSTAL");
    }

    #[test]
    fn test_legacy_codes() {
        assert_eq!(Symmetry::from_legacy_code(1.0), Some(Symmetry::Cubic));
        assert_eq!(Symmetry::from_legacy_code(2.0), Some(Symmetry::Hexagonal));
        assert_eq!(Symmetry::from_legacy_code(3.0), None);
    }

    #[test]
    fn test_default_is_cubic() {
        assert_eq!(Symmetry::default(), Symmetry::Cubic);
    }
}
