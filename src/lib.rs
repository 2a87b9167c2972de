//! # jcpdskit
//!
//! JCPDS 物相模型：由状态方程计算高温高压下的晶胞体积，
//! 按晶系公式得到各衍射线的 d 间距，并提供给衍射图谱界面叠加显示。
//!
//! ## 模块
//! - `error`: 统一错误类型
//! - `models`: 晶系、晶胞、衍射线、物相
//! - `eos`: Birch–Murnaghan 状态方程求解
//! - `xrd`: d 间距公式、坐标换算与导出
//! - `parsers`: JCPDS 与 XY 图谱解析
//! - `collection`: 物相集合与衍射线缓存
//! - `library`: 按化合物名查询衍射线

pub mod collection;
pub mod eos;
pub mod error;
pub mod library;
pub mod models;
pub mod parsers;
pub mod xrd;

pub use collection::{PhaseCollection, RescaledReflections, Spectrum};
pub use error::{JcpdsError, Result};
pub use library::{lookup_jcpds_line, JcpdsLibrary};
pub use models::{CellParameters, Phase, Reflection, SortKey, Symmetry};
pub use xrd::PatternUnit;
