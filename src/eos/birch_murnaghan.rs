//! # 三阶 Birch–Murnaghan 状态方程
//!
//! ## 公式
//! P(x) = 1.5·K0·(x^(7/3) − x^(5/3))·(1 + 0.75·(K0' − 4)·(x^(2/3) − 1))
//! 其中 x = V0/V
//!
//! 给定压力反解 x 时，极小化残差平方 [P(x) − P]²，初值 x = 1。
//!
//! ## 依赖关系
//! - 被 `eos/mod.rs` 调用
//! - 使用 `eos/simplex.rs` 求极小值

use super::simplex::{minimize_scalar, SimplexResult, SolverOptions};

/// 压缩比 x = V0/V 处的压力（GPa）
pub fn bm3_pressure(x: f64, k0: f64, k0p: f64) -> f64 {
    1.5 * k0
        * (x.powf(7.0 / 3.0) - x.powf(5.0 / 3.0))
        * (1.0 + 0.75 * (k0p - 4.0) * (x.powf(2.0 / 3.0) - 1.0))
}

/// 求解使 P(x) = `pressure` 的压缩比 x
pub fn solve_compression(
    pressure: f64,
    k0: f64,
    k0p: f64,
    options: &SolverOptions,
) -> SimplexResult {
    let residual = |x: f64| {
        // 负体积无物理意义
        if x <= 0.0 {
            return f64::INFINITY;
        }
        (bm3_pressure(x, k0, k0p) - pressure).powi(2)
    };

    let result = minimize_scalar(residual, 1.0, options);
    log::debug!(
        "BM3 solve: P = {:.4} GPa -> x = {:.8} ({} iterations, residual {:.3e})",
        pressure,
        result.x,
        result.iterations,
        result.fval
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_pressure_at_unit_compression() {
        assert_eq!(bm3_pressure(1.0, 166.65, 5.48), 0.0);
    }

    #[test]
    fn test_pressure_increases_with_compression() {
        let p1 = bm3_pressure(1.05, 166.65, 5.48);
        let p2 = bm3_pressure(1.10, 166.65, 5.48);
        assert!(p1 > 0.0);
        assert!(p2 > p1);
    }

    #[test]
    fn test_solve_inverts_pressure() {
        let x_true = 1.2;
        let pressure = bm3_pressure(x_true, 166.65, 5.4823);
        let result = solve_compression(pressure, 166.65, 5.4823, &SolverOptions::default());
        assert!(result.converged);
        assert_relative_eq!(result.x, x_true, epsilon = 1e-7);
    }

    #[test]
    fn test_solve_negative_target_expands() {
        let result = solve_compression(-2.0, 166.65, 5.4823, &SolverOptions::default());
        assert!(result.converged);
        assert!(result.x < 1.0);
    }
}
