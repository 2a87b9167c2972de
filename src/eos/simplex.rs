//! # 一维 Nelder–Mead 单纯形极小化
//!
//! 无导数极小化器，用于求解 Birch–Murnaghan 残差平方的极小值。
//!
//! ## 算法概述
//! 一维单纯形只有两个顶点：每一步做反射、扩张、收缩或压缩，
//! 直到两个顶点在 x 和 f 上都落在容差之内。
//! 系数取标准值 ρ = 1, χ = 2, ψ = 0.5, σ = 0.5。
//!
//! ## 依赖关系
//! - 被 `eos/birch_murnaghan.rs` 调用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

const RHO: f64 = 1.0;
const CHI: f64 = 2.0;
const PSI: f64 = 0.5;
const SIGMA: f64 = 0.5;

/// 求解器参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverOptions {
    /// 最大迭代次数
    pub max_iterations: usize,
    /// x 的绝对容差
    pub xatol: f64,
    /// f 的绝对容差
    pub fatol: f64,
    /// 初始单纯形相对步长
    pub initial_step: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            max_iterations: 1000,
            xatol: 1e-10,
            fatol: 1e-12,
            initial_step: 0.05,
        }
    }
}

/// 极小化结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplexResult {
    /// 极小点
    pub x: f64,
    /// 极小值
    pub fval: f64,
    /// 实际迭代次数
    pub iterations: usize,
    /// 是否在迭代上限之内收敛
    pub converged: bool,
}

/// 从 `x0` 出发极小化一元函数 `f`
pub fn minimize_scalar<F>(f: F, x0: f64, options: &SolverOptions) -> SimplexResult
where
    F: Fn(f64) -> f64,
{
    let second = if x0 != 0.0 {
        x0 * (1.0 + options.initial_step)
    } else {
        0.00025
    };

    // sim[0] 为最优顶点
    let mut sim = [(x0, f(x0)), (second, f(second))];
    let mut iterations = 0;

    loop {
        if sim[1].1 < sim[0].1 {
            sim.swap(0, 1);
        }

        let (x_best, f_best) = sim[0];
        let (x_worst, f_worst) = sim[1];

        if (x_worst - x_best).abs() <= options.xatol && (f_worst - f_best).abs() <= options.fatol
        {
            return SimplexResult {
                x: x_best,
                fval: f_best,
                iterations,
                converged: true,
            };
        }

        if iterations >= options.max_iterations {
            return SimplexResult {
                x: x_best,
                fval: f_best,
                iterations,
                converged: false,
            };
        }
        iterations += 1;

        // 一维时质心即最优顶点
        let xr = (1.0 + RHO) * x_best - RHO * x_worst;
        let fr = f(xr);

        if fr < f_best {
            let xe = (1.0 + RHO * CHI) * x_best - RHO * CHI * x_worst;
            let fe = f(xe);
            sim[1] = if fe < fr { (xe, fe) } else { (xr, fr) };
            continue;
        }

        let shrink = if fr < f_worst {
            let xc = (1.0 + PSI * RHO) * x_best - PSI * RHO * x_worst;
            let fc = f(xc);
            if fc <= fr {
                sim[1] = (xc, fc);
                false
            } else {
                true
            }
        } else {
            let xcc = (1.0 - PSI) * x_best + PSI * x_worst;
            let fcc = f(xcc);
            if fcc < f_worst {
                sim[1] = (xcc, fcc);
                false
            } else {
                true
            }
        };

        if shrink {
            let xs = x_best + SIGMA * (x_worst - x_best);
            sim[1] = (xs, f(xs));
        }
    }
}
