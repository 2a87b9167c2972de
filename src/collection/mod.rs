//! # 物相集合
//!
//! 管理有序的物相列表，并为每个物相缓存一份衍射线数组
//! （每行 `[d, intensity, h, k, l]`），供界面在高频重绘时直接读取。
//!
//! ## 缓存约定
//! - `add_phase` / `push_phase` 时立即生成缓存
//! - `set_pressure` / `set_temperature` / `set_pressure_temperature` 会刷新缓存
//! - `set_pressure_all` / `set_temperature_all` 不刷新，调用方需逐个调用 `get_lines_d`
//!
//! ## 依赖关系
//! - 使用 `models/phase.rs`, `xrd/conversion.rs`
//! - 子模块: rescale

pub mod rescale;

pub use rescale::{rescale_lines, RescaledReflections, Spectrum, MIN_SCALE_FACTOR};

use crate::error::{JcpdsError, Result};
use crate::models::{Phase, Reflection};
use crate::xrd::conversion::{convert_d, PatternUnit};

use ndarray::{s, Array1, Array2};
use std::path::Path;

/// 缓存数组的列
pub const COL_D: usize = 0;
pub const COL_INTENSITY: usize = 1;
pub const COL_H: usize = 2;
pub const COL_K: usize = 3;
pub const COL_L: usize = 4;

/// 物相集合
#[derive(Debug, Default)]
pub struct PhaseCollection {
    phases: Vec<Phase>,
    reflections: Vec<Array2<f64>>,
}

impl PhaseCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn phase(&self, ind: usize) -> Result<&Phase> {
        let len = self.phases.len();
        self.phases.get(ind).ok_or(JcpdsError::IndexOutOfRange {
            kind: "phase",
            index: ind,
            len,
        })
    }

    /// 直接修改物相后需调用 `get_lines_d` 刷新缓存
    pub fn phase_mut(&mut self, ind: usize) -> Result<&mut Phase> {
        let len = self.phases.len();
        self.phases.get_mut(ind).ok_or(JcpdsError::IndexOutOfRange {
            kind: "phase",
            index: ind,
            len,
        })
    }

    // ─────────────────────────────────────────────────────────────
    // 增删
    // ─────────────────────────────────────────────────────────────

    /// 从文件加载物相并追加到集合末尾
    ///
    /// 文件内容问题统一报告为 `PhaseLoadError`，I/O 错误原样返回。
    pub fn add_phase(&mut self, path: &Path) -> Result<usize> {
        let phase = Phase::from_file(path).map_err(|e| {
            if e.is_content_error() {
                log::warn!("Could not load {}: {}", path.display(), e);
                JcpdsError::PhaseLoadError {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
            } else {
                e
            }
        })?;

        Ok(self.push_phase(phase))
    }

    /// 追加已在内存中的物相，返回其下标
    pub fn push_phase(&mut self, phase: Phase) -> usize {
        self.reflections.push(lines_array(phase.reflections()));
        self.phases.push(phase);
        self.phases.len() - 1
    }

    pub fn del_phase(&mut self, ind: usize) -> Result<Phase> {
        self.check_index(ind)?;
        self.reflections.remove(ind);
        Ok(self.phases.remove(ind))
    }

    // ─────────────────────────────────────────────────────────────
    // P/T
    // ─────────────────────────────────────────────────────────────

    pub fn set_pressure(&mut self, ind: usize, pressure: f64) -> Result<()> {
        self.phase_mut(ind)?.compute_d(Some(pressure), None)?;
        self.get_lines_d(ind)?;
        Ok(())
    }

    pub fn set_temperature(&mut self, ind: usize, temperature: f64) -> Result<()> {
        self.phase_mut(ind)?.compute_d(None, Some(temperature))?;
        self.get_lines_d(ind)?;
        Ok(())
    }

    pub fn set_pressure_temperature(
        &mut self,
        ind: usize,
        pressure: f64,
        temperature: f64,
    ) -> Result<()> {
        self.phase_mut(ind)?
            .compute_d(Some(pressure), Some(temperature))?;
        self.get_lines_d(ind)?;
        Ok(())
    }

    /// 不刷新缓存
    ///
    /// 某个物相求解失败时其余物相照常更新，返回第一个错误。
    pub fn set_pressure_all(&mut self, pressure: f64) -> Result<()> {
        self.compute_all(Some(pressure), None)
    }

    /// 不刷新缓存，失败处理同 `set_pressure_all`
    pub fn set_temperature_all(&mut self, temperature: f64) -> Result<()> {
        self.compute_all(None, Some(temperature))
    }

    fn compute_all(&mut self, pressure: Option<f64>, temperature: Option<f64>) -> Result<()> {
        let mut first_error = None;
        for phase in &mut self.phases {
            if let Err(e) = phase.compute_d(pressure, temperature) {
                log::warn!("{}: {}", phase.name(), e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    // ─────────────────────────────────────────────────────────────
    // 衍射线缓存
    // ─────────────────────────────────────────────────────────────

    /// 重建并返回物相 `ind` 的衍射线数组
    pub fn get_lines_d(&mut self, ind: usize) -> Result<&Array2<f64>> {
        self.check_index(ind)?;
        self.reflections[ind] = lines_array(self.phases[ind].reflections());
        Ok(&self.reflections[ind])
    }

    /// 读取缓存，不重新计算
    pub fn cached_lines(&self, ind: usize) -> Result<&Array2<f64>> {
        self.check_index(ind)?;
        Ok(&self.reflections[ind])
    }

    /// 缓存的线位置，按 `unit` 换算
    pub fn get_phase_line_positions(
        &self,
        ind: usize,
        unit: PatternUnit,
        wavelength: f64,
    ) -> Result<Array1<f64>> {
        let lines = self.cached_lines(ind)?;
        Ok(lines
            .slice(s![.., COL_D])
            .mapv(|d| convert_d(d, unit, wavelength)))
    }

    /// 按当前可见范围缩放衍射线高度
    ///
    /// 只读取缓存，可在每次视图变化时调用。
    pub fn get_rescaled_reflections(
        &self,
        ind: usize,
        spectrum: &dyn Spectrum,
        x_range: (f64, f64),
        y_range: (f64, f64),
        wavelength: f64,
        unit: PatternUnit,
    ) -> Result<RescaledReflections> {
        let positions = self.get_phase_line_positions(ind, unit, wavelength)?;
        let lines = self.cached_lines(ind)?;

        Ok(rescale_lines(
            positions,
            lines.slice(s![.., COL_INTENSITY]),
            spectrum,
            x_range,
            y_range,
        ))
    }

    // ─────────────────────────────────────────────────────────────
    // 文件与衍射线编辑
    // ─────────────────────────────────────────────────────────────

    /// 从原文件重新加载物相，保留 P/T
    pub fn reload(&mut self, ind: usize) -> Result<()> {
        self.phase_mut(ind)?.reload_file()?;
        self.get_lines_d(ind)?;
        Ok(())
    }

    pub fn save_phase(&mut self, ind: usize, path: &Path) -> Result<()> {
        self.phase_mut(ind)?.save_file(path)
    }

    /// 追加一条空衍射线 (0 0 0)
    pub fn add_reflection(&mut self, ind: usize) -> Result<()> {
        self.phase_mut(ind)?.add_reflection(0, 0, 0, 0.0, 0.0);
        self.get_lines_d(ind)?;
        Ok(())
    }

    pub fn delete_reflection(&mut self, ind: usize, r_ind: usize) -> Result<Reflection> {
        let removed = self.phase_mut(ind)?.remove_reflection(r_ind)?;
        self.get_lines_d(ind)?;
        Ok(removed)
    }

    /// 替换衍射线后按当前 P/T 重新计算 d
    pub fn update_reflection(
        &mut self,
        ind: usize,
        r_ind: usize,
        reflection: Reflection,
    ) -> Result<()> {
        let phase = self.phase_mut(ind)?;
        phase.update_reflection(r_ind, reflection)?;
        phase.compute_d(None, None)?;
        self.get_lines_d(ind)?;
        Ok(())
    }

    fn check_index(&self, ind: usize) -> Result<()> {
        self.phase(ind).map(|_| ())
    }
}

/// 构建 `[d, intensity, h, k, l]` 数组
fn lines_array(reflections: &[Reflection]) -> Array2<f64> {
    let mut lines = Array2::zeros((reflections.len(), 5));
    for (mut row, r) in lines.rows_mut().into_iter().zip(reflections) {
        row[COL_D] = r.d;
        row[COL_INTENSITY] = r.intensity;
        row[COL_H] = r.h as f64;
        row[COL_K] = r.k as f64;
        row[COL_L] = r.l as f64;
    }
    lines
}
