//! # 衍射坐标换算
//!
//! d 间距、衍射角 2θ 与动量转移 Q 之间的换算。
//!
//! ## 公式
//! - 2θ = 2·asin(λ/(2d))·180/π
//! - Q = 4π/λ·sin(2θ·π/360)
//!
//! ## 依赖关系
//! - 被 `collection/` 和 `xrd/export.rs` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// 图谱横轴单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PatternUnit {
    /// 衍射角 2θ（度）
    #[default]
    TwoTheta,
    /// 动量转移 Q（1/Å）
    Q,
    /// d 间距（Å）
    D,
}

impl fmt::Display for PatternUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternUnit::TwoTheta => write!(f, "2θ (°)"),
            PatternUnit::Q => write!(f, "Q (1/Å)"),
            PatternUnit::D => write!(f, "d (Å)"),
        }
    }
}

/// d (Å) → 2θ (度)；λ/(2d) > 1 时返回 NaN
pub fn d_to_two_theta(d: f64, wavelength: f64) -> f64 {
    2.0 * (wavelength / (2.0 * d)).asin() * 180.0 / PI
}

/// 2θ (度) → Q (1/Å)
pub fn two_theta_to_q(two_theta: f64, wavelength: f64) -> f64 {
    4.0 * PI / wavelength * (two_theta / 360.0 * PI).sin()
}

/// d (Å) → Q (1/Å)
pub fn d_to_q(d: f64, wavelength: f64) -> f64 {
    two_theta_to_q(d_to_two_theta(d, wavelength), wavelength)
}

/// 把 d 间距转换为指定单位下的横坐标
pub fn convert_d(d: f64, unit: PatternUnit, wavelength: f64) -> f64 {
    match unit {
        PatternUnit::TwoTheta => d_to_two_theta(d, wavelength),
        PatternUnit::Q => d_to_q(d, wavelength),
        PatternUnit::D => d,
    }
}
