//! # 晶胞参数数据模型
//!
//! 以 (a, b, c, α, β, γ) 表示的晶胞，提供体积计算和晶系约束。
//!
//! ## 依赖关系
//! - 被 `models/phase.rs`, `xrd/dspacing.rs` 使用
//! - 使用 `models/symmetry.rs`

use super::Symmetry;
use serde::{Deserialize, Serialize};

/// 晶胞参数
/// 长度单位：Å；角度单位：度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl CellParameters {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        CellParameters {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    /// 立方晶胞
    pub fn cubic(a: f64) -> Self {
        Self::new(a, a, a, 90.0, 90.0, 90.0)
    }

    /// 计算晶胞体积
    /// V = abc·sqrt(1 - cos²α - cos²β - cos²γ + 2cosα·cosβ·cosγ)
    pub fn volume(&self) -> f64 {
        let cos_alpha = self.alpha.to_radians().cos();
        let cos_beta = self.beta.to_radians().cos();
        let cos_gamma = self.gamma.to_radians().cos();

        self.a
            * self.b
            * self.c
            * (1.0 - cos_alpha.powi(2) - cos_beta.powi(2) - cos_gamma.powi(2)
                + 2.0 * cos_alpha * cos_beta * cos_gamma)
                .sqrt()
    }

    /// 按晶系补全并约束晶胞参数
    pub fn constrained(&self, symmetry: &Symmetry) -> Self {
        let mut cell = *self;
        match symmetry {
            Symmetry::Cubic => {
                cell.b = cell.a;
                cell.c = cell.a;
                cell.alpha = 90.0;
                cell.beta = 90.0;
                cell.gamma = 90.0;
            }
            Symmetry::Tetragonal => {
                cell.b = cell.a;
                cell.alpha = 90.0;
                cell.beta = 90.0;
                cell.gamma = 90.0;
            }
            Symmetry::Orthorhombic => {
                cell.alpha = 90.0;
                cell.beta = 90.0;
                cell.gamma = 90.0;
            }
            Symmetry::Hexagonal | Symmetry::Trigonal => {
                cell.b = cell.a;
                cell.alpha = 90.0;
                cell.beta = 90.0;
                cell.gamma = 120.0;
            }
            Symmetry::Rhombohedral => {
                cell.b = cell.a;
                cell.c = cell.a;
                cell.beta = cell.alpha;
                cell.gamma = cell.alpha;
            }
            Symmetry::Monoclinic => {
                cell.alpha = 90.0;
                cell.gamma = 90.0;
            }
            Symmetry::Triclinic | Symmetry::Unknown(_) => {}
        }
        cell
    }

    /// 各向同性缩放三条棱长，角度不变
    pub fn scaled(&self, ratio: f64) -> Self {
        CellParameters {
            a: self.a * ratio,
            b: self.b * ratio,
            c: self.c * ratio,
            ..*self
        }
    }
}

impl Default for CellParameters {
    fn default() -> Self {
        CellParameters::new(0.0, 0.0, 0.0, 90.0, 90.0, 90.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_volume_cubic() {
        let cell = CellParameters::cubic(5.0);
        assert_relative_eq!(cell.volume(), 125.0, epsilon = 1e-9);
    }

    #[test]
    fn test_volume_hexagonal() {
        let cell = CellParameters::new(3.0, 3.0, 5.0, 90.0, 90.0, 120.0);
        // V = a²c·sin(120°)
        let expected = 9.0 * 5.0 * (120.0_f64).to_radians().sin();
        assert_relative_eq!(cell.volume(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_constrain_cubic_fills_edges() {
        let cell = CellParameters::new(4.0, 0.0, 0.0, 0.0, 0.0, 0.0).constrained(&Symmetry::Cubic);
        assert_eq!(cell.b, 4.0);
        assert_eq!(cell.c, 4.0);
        assert_eq!(cell.gamma, 90.0);
    }

    #[test]
    fn test_constrain_hexagonal_and_trigonal() {
        let raw = CellParameters::new(3.0, 0.0, 5.0, 0.0, 0.0, 0.0);
        let hex = raw.constrained(&Symmetry::Hexagonal);
        let trig = raw.constrained(&Symmetry::Trigonal);
        assert_eq!(hex, trig);
        assert_eq!(hex.b, 3.0);
        assert_eq!(hex.gamma, 120.0);
    }

    #[test]
    fn test_constrain_rhombohedral_copies_alpha() {
        let cell =
            CellParameters::new(5.0, 0.0, 0.0, 55.0, 0.0, 0.0).constrained(&Symmetry::Rhombohedral);
        assert_eq!(cell.c, 5.0);
        assert_eq!(cell.beta, 55.0);
        assert_eq!(cell.gamma, 55.0);
    }

    #[test]
    fn test_constrain_monoclinic_keeps_beta() {
        let cell = CellParameters::new(5.0, 6.0, 7.0, 80.0, 101.5, 70.0)
            .constrained(&Symmetry::Monoclinic);
        assert_eq!(cell.alpha, 90.0);
        assert_eq!(cell.beta, 101.5);
        assert_eq!(cell.gamma, 90.0);
    }

    #[test]
    fn test_scaled_keeps_angles() {
        let cell = CellParameters::new(2.0, 3.0, 4.0, 90.0, 100.0, 90.0).scaled(0.5);
        assert_eq!((cell.a, cell.b, cell.c), (1.0, 1.5, 2.0));
        assert_eq!(cell.beta, 100.0);
    }
}
