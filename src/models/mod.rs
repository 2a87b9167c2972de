//! # 数据模型模块
//!
//! 定义晶系、晶胞参数、衍射线和 JCPDS 物相的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `collection/` 和 `commands/` 使用
//! - 子模块: symmetry, cell, reflection, phase

pub mod cell;
pub mod phase;
pub mod reflection;
pub mod symmetry;

pub use cell::CellParameters;
pub use phase::Phase;
pub use reflection::{argsort, Reflection, SortKey};
pub use symmetry::Symmetry;
