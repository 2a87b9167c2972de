//! # 状态方程模块
//!
//! 由 K0、K0' 及其温度导数计算给定 P/T 下的晶胞体积。
//!
//! ## 子模块
//! - `birch_murnaghan`: 三阶 BM 状态方程及其反解
//! - `simplex`: 一维 Nelder–Mead 极小化器
//!
//! ## 依赖关系
//! - 被 `models/phase.rs` 调用
//! - 使用 `error.rs`

pub mod birch_murnaghan;
pub mod simplex;

pub use birch_murnaghan::{bm3_pressure, solve_compression};
pub use simplex::{minimize_scalar, SimplexResult, SolverOptions};

use crate::error::{JcpdsError, Result};
use serde::{Deserialize, Serialize};

/// 室温（K），所有热修正的参考温度
pub const ROOM_TEMPERATURE: f64 = 298.0;

/// 状态方程参数
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EosParameters {
    /// 体弹模量 K0 (GPa)
    pub k0: f64,
    /// 298 K 下的 K0'
    pub k0p0: f64,
    /// dK0/dT (GPa/K)，仅保存，不参与体积计算
    pub dk0dt: f64,
    /// dK0'/dT (1/K)
    pub dk0pdt: f64,
    /// 298 K 下的热膨胀系数 (1/K)
    pub alpha_t0: f64,
    /// 热膨胀系数的温度导数 (1/K²)
    pub d_alpha_dt: f64,
}

impl EosParameters {
    /// 温度 T 下的热膨胀系数
    pub fn alpha_t(&self, temperature: f64) -> f64 {
        self.alpha_t0 + self.d_alpha_dt * (temperature - ROOM_TEMPERATURE)
    }

    /// 温度 T 下的 K0'
    pub fn k0p(&self, temperature: f64) -> f64 {
        self.k0p0 + self.dk0pdt * (temperature - ROOM_TEMPERATURE)
    }

    pub fn has_thermal_expansion(&self) -> bool {
        self.alpha_t0 != 0.0 || self.d_alpha_dt != 0.0
    }
}

/// 体积求解结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EosState {
    /// 体积 (Å³)
    pub v: f64,
    /// 当前温度下的热膨胀系数
    pub alpha_t: f64,
    /// 当前温度下的 K0'
    pub k0p: f64,
}

/// 计算 P (GPa)、T (K) 下的体积
///
/// T = 0 视为室温。负压时使用线性近似 V = V0·(1 − P/K0)，
/// 与正压的 BM3 分支并不对称；K0 ≤ 0 时直接返回 V0。
pub fn compute_volume(
    v0: f64,
    params: &EosParameters,
    pressure: f64,
    temperature: f64,
    options: &SolverOptions,
) -> Result<EosState> {
    let temperature = if temperature == 0.0 {
        ROOM_TEMPERATURE
    } else {
        temperature
    };
    let delta_t = temperature - ROOM_TEMPERATURE;

    let alpha_t = params.alpha_t(temperature);
    let k0p = params.k0p(temperature);

    let v = if pressure == 0.0 {
        v0 * (1.0 + alpha_t * delta_t)
    } else if params.k0 <= 0.0 {
        log::info!("K0 is zero, computing zero pressure volume");
        v0
    } else if pressure < 0.0 {
        v0 * (1.0 - pressure / params.k0)
    } else {
        // 热压修正
        let mod_pressure = pressure - alpha_t * params.k0 * delta_t;
        let result = solve_compression(mod_pressure, params.k0, k0p, options);
        if !result.converged || !result.x.is_finite() || result.x <= 0.0 {
            return Err(JcpdsError::EosSolverError {
                pressure,
                temperature,
                iterations: result.iterations,
            });
        }
        v0 / result.x
    };

    Ok(EosState { v, alpha_t, k0p })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gold() -> EosParameters {
        EosParameters {
            k0: 166.65,
            k0p0: 5.4823,
            dk0dt: 0.0,
            dk0pdt: 0.0,
            alpha_t0: 4.0e-5,
            d_alpha_dt: 0.0,
        }
    }

    #[test]
    fn test_ambient_volume_is_exact() {
        let state = compute_volume(67.85, &gold(), 0.0, 298.0, &SolverOptions::default()).unwrap();
        assert_eq!(state.v, 67.85);
    }

    #[test]
    fn test_zero_temperature_means_room() {
        let state = compute_volume(67.85, &gold(), 0.0, 0.0, &SolverOptions::default()).unwrap();
        assert_eq!(state.v, 67.85);
    }

    #[test]
    fn test_thermal_expansion_at_zero_pressure() {
        let state = compute_volume(100.0, &gold(), 0.0, 1298.0, &SolverOptions::default()).unwrap();
        assert_relative_eq!(state.v, 100.0 * (1.0 + 4.0e-5 * 1000.0), epsilon = 1e-12);
    }

    #[test]
    fn test_negative_pressure_linear() {
        let state = compute_volume(100.0, &gold(), -1.0, 298.0, &SolverOptions::default()).unwrap();
        assert_relative_eq!(state.v, 100.0 * (1.0 + 1.0 / 166.65), epsilon = 1e-12);
    }

    #[test]
    fn test_nonpositive_k0_falls_back_to_v0() {
        let params = EosParameters {
            k0: 0.0,
            ..gold()
        };
        let options = SolverOptions::default();
        assert_eq!(compute_volume(50.0, &params, 10.0, 298.0, &options).unwrap().v, 50.0);
        assert_eq!(compute_volume(50.0, &params, -10.0, 298.0, &options).unwrap().v, 50.0);
    }

    #[test]
    fn test_positive_pressure_matches_bm3() {
        let params = gold();
        let state = compute_volume(67.85, &params, 50.0, 298.0, &SolverOptions::default()).unwrap();
        let x = 67.85 / state.v;
        assert_relative_eq!(bm3_pressure(x, params.k0, params.k0p0), 50.0, epsilon = 1e-6);
    }

    #[test]
    fn test_derived_parameters_follow_temperature() {
        let params = EosParameters {
            dk0pdt: 1e-3,
            d_alpha_dt: 1e-8,
            ..gold()
        };
        let state = compute_volume(67.85, &params, 10.0, 1298.0, &SolverOptions::default()).unwrap();
        assert_relative_eq!(state.k0p, 5.4823 + 1.0, epsilon = 1e-12);
        assert_relative_eq!(state.alpha_t, 4.0e-5 + 1e-5, epsilon = 1e-12);
    }

    #[test]
    fn test_solver_failure_surfaces_error() {
        let options = SolverOptions {
            max_iterations: 1,
            ..SolverOptions::default()
        };
        let err = compute_volume(67.85, &gold(), 100.0, 298.0, &options).unwrap_err();
        assert!(matches!(err, JcpdsError::EosSolverError { .. }));
    }
}
