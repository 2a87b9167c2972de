//! # XRD 计算模块
//!
//! 衍射几何相关的计算与导出。
//!
//! ## 子模块
//! - `dspacing`: 各晶系的 d 间距公式
//! - `conversion`: d / 2θ / Q 换算
//! - `export`: 衍射线导出
//!
//! ## 依赖关系
//! - 被 `models/phase.rs`, `collection/` 和 `commands/lines.rs` 使用
//! - 使用 `models/cell.rs`, `models/symmetry.rs`

pub mod conversion;
pub mod dspacing;
pub mod export;

pub use conversion::{convert_d, d_to_q, d_to_two_theta, two_theta_to_q, PatternUnit};
pub use dspacing::{d_spacings, inverse_d_squared};
pub use export::{line_records, LineRecord};
