//! # 解析器模块
//!
//! 提供 JCPDS 物相文件和两列 XY 衍射图谱的解析器。
//!
//! ## 依赖关系
//! - 被 `models/phase.rs`, `collection/` 和 `commands/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: jcpds, pattern

pub mod jcpds;
pub mod pattern;

pub use jcpds::{parse_jcpds_content, parse_jcpds_file, to_jcpds_string, JcpdsRecord};
pub use pattern::{parse_pattern_file, Pattern};
