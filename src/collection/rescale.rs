//! # 衍射线高度缩放
//!
//! 把物相衍射线的相对强度缩放到当前可见的图谱强度范围内，
//! 供界面在每次平移/缩放时绘制竖线标记。
//!
//! ## 规则
//! - max_intensity = min(可见 x 范围内图谱的最大强度, y_range 上限)
//! - baseline = y0 + 0.05·(y1 − y0)，不小于 0
//! - scale = (max_intensity − baseline) / 可见范围内衍射线的最大强度
//! - 可见范围内没有衍射线时 scale = 1；scale ≤ 0 时取 0.01
//!
//! ## 依赖关系
//! - 被 `collection/mod.rs` 使用
//! - 由 `parsers/pattern.rs` 实现 `Spectrum`

use ndarray::{Array1, ArrayView1};

/// scale 的下限，保证缩放后的线高不低于基线
pub const MIN_SCALE_FACTOR: f64 = 0.01;

/// 基线在可见强度范围中的相对位置
const BASELINE_FRACTION: f64 = 0.05;

/// 图谱数据来源
pub trait Spectrum {
    /// 返回 (x, y)，两者长度相同
    fn data(&self) -> (&[f64], &[f64]);
}

/// 缩放后的衍射线
#[derive(Debug, Clone, PartialEq)]
pub struct RescaledReflections {
    /// 线位置，单位与请求一致
    pub positions: Array1<f64>,
    /// 缩放后的线高（含基线）
    pub intensities: Array1<f64>,
    pub baseline: f64,
}

fn in_range(value: f64, range: (f64, f64)) -> bool {
    value >= range.0 && value <= range.1
}

/// 按可见范围计算缩放系数并生成线高
pub fn rescale_lines(
    positions: Array1<f64>,
    intensities: ArrayView1<f64>,
    spectrum: &dyn Spectrum,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> RescaledReflections {
    let (spec_x, spec_y) = spectrum.data();

    let spectrum_max = spec_x
        .iter()
        .zip(spec_y)
        .filter(|(x, _)| in_range(**x, x_range))
        .map(|(_, y)| *y)
        .fold(f64::NEG_INFINITY, f64::max);
    let max_intensity = if spectrum_max.is_finite() {
        spectrum_max.min(y_range.1)
    } else {
        y_range.1
    };

    let baseline = (y_range.0 + BASELINE_FRACTION * (y_range.1 - y_range.0)).max(0.0);

    let visible_max = positions
        .iter()
        .zip(intensities.iter())
        .filter(|(pos, _)| in_range(**pos, x_range))
        .map(|(_, i)| *i)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut scale_factor = if visible_max.is_finite() && visible_max != 0.0 {
        (max_intensity - baseline) / visible_max
    } else {
        1.0
    };
    if scale_factor.is_nan() || scale_factor <= 0.0 {
        scale_factor = MIN_SCALE_FACTOR;
    }

    log::debug!(
        "rescale: max_intensity = {}, baseline = {}, scale = {}",
        max_intensity,
        baseline,
        scale_factor
    );

    let intensities = intensities.mapv(|i| scale_factor * i + baseline);

    RescaledReflections {
        positions,
        intensities,
        baseline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    struct Flat {
        x: Vec<f64>,
        y: Vec<f64>,
    }

    impl Spectrum for Flat {
        fn data(&self) -> (&[f64], &[f64]) {
            (&self.x, &self.y)
        }
    }

    fn spectrum() -> Flat {
        Flat {
            x: (0..100).map(|i| i as f64 * 0.5).collect(),
            y: (0..100).map(|i| if i == 40 { 500.0 } else { 50.0 }).collect(),
        }
    }

    #[test]
    fn test_tallest_visible_line_reaches_spectrum_max() {
        let positions = array![10.0, 20.0, 30.0];
        let intensities = array![100.0, 50.0, 25.0];
        let result = rescale_lines(
            positions,
            intensities.view(),
            &spectrum(),
            (0.0, 49.5),
            (0.0, 1000.0),
        );

        assert_relative_eq!(result.baseline, 50.0);
        assert_relative_eq!(result.intensities[0], 500.0, epsilon = 1e-9);
        assert_relative_eq!(result.intensities[1], 275.0, epsilon = 1e-9);
    }

    #[test]
    fn test_max_intensity_clipped_by_view() {
        let result = rescale_lines(
            array![10.0],
            array![100.0].view(),
            &spectrum(),
            (0.0, 49.5),
            (0.0, 200.0),
        );
        assert_relative_eq!(result.baseline, 10.0);
        assert_relative_eq!(result.intensities[0], 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_no_visible_lines_uses_unit_scale() {
        let result = rescale_lines(
            array![80.0, 90.0],
            array![100.0, 40.0].view(),
            &spectrum(),
            (0.0, 49.5),
            (0.0, 1000.0),
        );
        assert_eq!(result.intensities, array![150.0, 90.0]);
    }

    #[test]
    fn test_inverted_range_floors_scale() {
        // 基线高于图谱最大值时 scale 会 ≤ 0
        let result = rescale_lines(
            array![10.0, 20.0],
            array![100.0, 30.0].view(),
            &spectrum(),
            (0.0, 49.5),
            (900.0, 1000.0),
        );
        assert_relative_eq!(result.baseline, 905.0);
        for (scaled, raw) in result.intensities.iter().zip([100.0, 30.0]) {
            assert!(*scaled >= result.baseline);
            assert_relative_eq!(*scaled, MIN_SCALE_FACTOR * raw + 905.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_negative_view_clamps_baseline() {
        let result = rescale_lines(
            array![10.0],
            array![100.0].view(),
            &spectrum(),
            (0.0, 49.5),
            (-100.0, 100.0),
        );
        assert_eq!(result.baseline, 0.0);
    }

    #[test]
    fn test_unreachable_lines_are_ignored() {
        let result = rescale_lines(
            array![f64::NAN, 10.0],
            array![100.0, 50.0].view(),
            &spectrum(),
            (0.0, 49.5),
            (0.0, 1000.0),
        );
        assert!(result.positions[0].is_nan());
        assert_relative_eq!(result.intensities[1], 500.0, epsilon = 1e-9);
    }
}
