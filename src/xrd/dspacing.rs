//! # 晶系 d 间距计算
//!
//! 根据晶系和晶胞参数计算每条 (hkl) 衍射线的 1/d²，再取 d = sqrt(1/(1/d²))。
//!
//! ## 公式
//! | 晶系 | 1/d² |
//! |---|---|
//! | 立方 | (h²+k²+l²)/a² |
//! | 四方 | (h²+k²)/a² + l²/c² |
//! | 正交 | h²/a² + k²/b² + l²/c² |
//! | 六方/三方 | 4/3·(h²+hk+k²)/a² + l²/c² |
//! | 菱方 | (1+cosα)·(S − (1−tan²(α/2))·P) / (a²·(1+cosα−2cos²α)) |
//! | 单斜 | h²/(a²sin²β) + k²/b² + l²/(c²sin²β) − 2hl·cosβ/(ac·sin²β) |
//! | 三斜 | 度规张量逆矩阵的一般形式 |
//!
//! 未知晶系记录错误日志并退化为 1/d² = 1（d = 1 Å），避免上层界面崩溃。
//!
//! ## 依赖关系
//! - 被 `models/phase.rs` 调用
//! - 使用 `models/cell.rs`, `models/symmetry.rs`

use crate::models::{CellParameters, Symmetry};

/// 单条衍射线的 1/d²；未知晶系返回 `None`
pub fn inverse_d_squared(
    symmetry: &Symmetry,
    cell: &CellParameters,
    h: i32,
    k: i32,
    l: i32,
) -> Option<f64> {
    let (h, k, l) = (h as f64, k as f64, l as f64);
    let CellParameters {
        a,
        b,
        c,
        alpha,
        beta,
        gamma,
    } = *cell;

    let d2inv = match symmetry.crystal_system() {
        Symmetry::Cubic => (h * h + k * k + l * l) / (a * a),
        Symmetry::Tetragonal => (h * h + k * k) / (a * a) + l * l / (c * c),
        Symmetry::Orthorhombic => h * h / (a * a) + k * k / (b * b) + l * l / (c * c),
        Symmetry::Hexagonal | Symmetry::Trigonal => {
            (h * h + h * k + k * k) * 4.0 / 3.0 / (a * a) + l * l / (c * c)
        }
        Symmetry::Rhombohedral => {
            let alpha = alpha.to_radians();
            let cos_alpha = alpha.cos();
            let tan_half = (0.5 * alpha).tan();
            ((1.0 + cos_alpha)
                * ((h * h + k * k + l * l) - (1.0 - tan_half * tan_half) * (h * k + k * l + l * h)))
                / (a * a * (1.0 + cos_alpha - 2.0 * cos_alpha * cos_alpha))
        }
        Symmetry::Monoclinic => {
            let beta = beta.to_radians();
            let sin2_beta = beta.sin().powi(2);
            let cos_beta = beta.cos();
            h * h / (sin2_beta * a * a) + k * k / (b * b) + l * l / (sin2_beta * c * c)
                - 2.0 * h * l * cos_beta / (a * c * sin2_beta)
        }
        Symmetry::Triclinic => {
            let (alpha, beta, gamma) = (alpha.to_radians(), beta.to_radians(), gamma.to_radians());
            let (cos_a, cos_b, cos_g) = (alpha.cos(), beta.cos(), gamma.cos());

            let volume = a
                * b
                * c
                * (1.0 - cos_a * cos_a - cos_b * cos_b - cos_g * cos_g
                    + 2.0 * cos_a * cos_b * cos_g)
                    .sqrt();

            let s11 = (b * c * alpha.sin()).powi(2);
            let s22 = (a * c * beta.sin()).powi(2);
            let s33 = (a * b * gamma.sin()).powi(2);
            let s12 = a * b * c * c * (cos_a * cos_b - cos_g);
            let s23 = a * a * b * c * (cos_b * cos_g - cos_a);
            let s31 = a * b * b * c * (cos_g * cos_a - cos_b);

            (s11 * h * h
                + s22 * k * k
                + s33 * l * l
                + 2.0 * s12 * h * k
                + 2.0 * s23 * k * l
                + 2.0 * s31 * l * h)
                / (volume * volume)
        }
        Symmetry::Unknown(_) => return None,
    };

    Some(d2inv)
}

/// 批量计算 d 间距（Å）
pub fn d_spacings<I>(symmetry: &Symmetry, cell: &CellParameters, hkls: I) -> Vec<f64>
where
    I: IntoIterator<Item = [i32; 3]>,
{
    if !symmetry.is_known() {
        log::error!("Unknown crystal symmetry '{}', using d = 1 Å", symmetry);
    }

    hkls.into_iter()
        .map(|[h, k, l]| {
            let d2inv = inverse_d_squared(symmetry, cell, h, k, l).unwrap_or(1.0);
            (1.0 / d2inv).sqrt()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d_of(symmetry: &Symmetry, cell: &CellParameters, hkl: [i32; 3]) -> f64 {
        d_spacings(symmetry, cell, [hkl])[0]
    }

    #[test]
    fn test_cubic_distance_law() {
        let cell = CellParameters::cubic(4.0786);
        assert_relative_eq!(d_of(&Symmetry::Cubic, &cell, [1, 1, 0]), 2.884, epsilon = 1e-3);
        for hkl in [[1, 1, 1], [2, 0, 0], [3, 1, 1], [1, 1, 3]] {
            let n = ((hkl[0] * hkl[0] + hkl[1] * hkl[1] + hkl[2] * hkl[2]) as f64).sqrt();
            assert_relative_eq!(d_of(&Symmetry::Cubic, &cell, hkl), 4.0786 / n, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tetragonal_and_orthorhombic_agree() {
        let cell = CellParameters::new(4.0, 4.0, 6.0, 90.0, 90.0, 90.0);
        let d_tet = d_of(&Symmetry::Tetragonal, &cell, [1, 2, 3]);
        let d_ortho = d_of(&Symmetry::Orthorhombic, &cell, [1, 2, 3]);
        assert_relative_eq!(d_tet, d_ortho, epsilon = 1e-12);
    }

    #[test]
    fn test_hexagonal_matches_triclinic() {
        let cell = CellParameters::new(3.2, 3.2, 5.2, 90.0, 90.0, 120.0);
        for hkl in [[1, 0, 0], [1, 0, 1], [1, 1, 2], [2, -1, 3]] {
            let d_hex = d_of(&Symmetry::Hexagonal, &cell, hkl);
            let d_tri = d_of(&Symmetry::Triclinic, &cell, hkl);
            assert_relative_eq!(d_hex, d_tri, epsilon = 1e-9);
            assert_eq!(d_hex, d_of(&Symmetry::Trigonal, &cell, hkl));
        }
    }

    #[test]
    fn test_rhombohedral_matches_triclinic() {
        let cell = CellParameters::new(5.43, 5.43, 5.43, 55.3, 55.3, 55.3);
        for hkl in [[1, 0, 0], [1, 1, 0], [2, 1, 1], [1, -1, 0]] {
            let d_rh = d_of(&Symmetry::Rhombohedral, &cell, hkl);
            let d_tri = d_of(&Symmetry::Triclinic, &cell, hkl);
            assert_relative_eq!(d_rh, d_tri, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_monoclinic_matches_triclinic_for_sign_flipped_h() {
        let cell = CellParameters::new(9.7, 8.9, 5.3, 90.0, 105.8, 90.0);
        for hkl in [[2, 2, 1], [-2, 2, 1]] {
            let d_mono = d_of(&Symmetry::Monoclinic, &cell, hkl);
            let d_tri = d_of(&Symmetry::Triclinic, &cell, hkl);
            assert_relative_eq!(d_mono, d_tri, epsilon = 1e-9);
        }
        // β ≠ 90° 时 (221) 与 (-221) 不等价
        let d_pos = d_of(&Symmetry::Monoclinic, &cell, [2, 2, 1]);
        let d_neg = d_of(&Symmetry::Monoclinic, &cell, [-2, 2, 1]);
        assert!((d_pos - d_neg).abs() > 1e-3);
    }

    #[test]
    fn test_unknown_symmetry_falls_back_to_unit_d() {
        let cell = CellParameters::cubic(4.0);
        let sym = Symmetry::Unknown("FOO".to_string());
        assert!(inverse_d_squared(&sym, &cell, 1, 1, 1).is_none());
        assert_eq!(d_spacings(&sym, &cell, [[1, 1, 1], [2, 0, 0]]), vec![1.0, 1.0]);
    }
}
