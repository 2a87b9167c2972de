//! # JCPDS 物相数据模型
//!
//! 聚合晶胞参数、状态方程参数和衍射线列表，负责在 P/T 变化时
//! 重新计算体积、晶胞棱长与 d 间距，并维护 "已修改" 标志。
//!
//! ## 计算流程
//! 1. `compute_v0`: 按晶系约束补全零压晶胞，计算 V0
//! 2. `compute_volume`: 由状态方程求 P/T 下的 V
//! 3. `compute_d`: 棱长按 (V/V0)^(1/3) 各向同性缩放（角度不变），
//!    再按晶系公式计算每条线的 d
//!
//! ## 依赖关系
//! - 被 `collection/`, `library.rs` 和命令行使用
//! - 使用 `eos/` 求体积，`xrd/dspacing.rs` 求 d 间距
//! - 使用 `parsers/jcpds.rs` 读写文件

use super::reflection::{argsort, Reflection, SortKey};
use super::{CellParameters, Symmetry};
use crate::eos::{self, EosParameters, SolverOptions, ROOM_TEMPERATURE};
use crate::error::{JcpdsError, Result};
use crate::parsers::jcpds::{self, JcpdsRecord};
use crate::xrd::dspacing;

use std::fs;
use std::path::{Path, PathBuf};

/// JCPDS 物相
///
/// 所有跟踪字段只能通过 setter 修改，setter 同时置位 `modified`。
#[derive(Debug, Clone)]
pub struct Phase {
    path: Option<PathBuf>,
    name: String,
    version: String,
    comments: Vec<String>,

    symmetry: Symmetry,
    /// 零压晶胞
    cell0: CellParameters,
    v0: f64,
    /// 当前 P/T 下的晶胞（角度取零压值）
    cell: CellParameters,
    v: f64,

    eos: EosParameters,
    /// 当前温度下的 K0'
    k0p: f64,
    /// 当前温度下的热膨胀系数
    alpha_t: f64,

    /// 压力 (GPa)
    pressure: f64,
    /// 温度 (K)
    temperature: f64,

    reflections: Vec<Reflection>,
    modified: bool,
    solver_options: SolverOptions,
}

impl Default for Phase {
    fn default() -> Self {
        Phase {
            path: None,
            name: String::new(),
            version: "4".to_string(),
            comments: Vec::new(),
            symmetry: Symmetry::default(),
            cell0: CellParameters::default(),
            v0: 0.0,
            cell: CellParameters::default(),
            v: 0.0,
            eos: EosParameters::default(),
            k0p: 0.0,
            alpha_t: 0.0,
            pressure: 0.0,
            temperature: ROOM_TEMPERATURE,
            reflections: Vec::new(),
            modified: false,
            solver_options: SolverOptions::default(),
        }
    }
}

impl Phase {
    /// 创建空物相
    pub fn new() -> Self {
        Self::default()
    }

    /// 从文件创建物相
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut phase = Phase::new();
        phase.load_file(path)?;
        Ok(phase)
    }

    // ─────────────────────────────────────────────────────────────
    // 文件读写
    // ─────────────────────────────────────────────────────────────

    /// 读取 JCPDS 文件，完全替换当前状态
    ///
    /// 文件中的 d0 列只作参考：加载后 d0 被名义晶胞算出的 d 覆盖。
    /// 解析失败时当前状态保持不变。
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let record = jcpds::parse_jcpds_file(path)?;

        let mut phase = Phase::from_record(record);
        phase.solver_options = self.solver_options;
        phase.set_path(path);

        phase.compute_v0()?;
        phase.cell = phase.cell0;
        phase.v = phase.v0;
        phase.compute_d(None, None)?;
        for reflection in &mut phase.reflections {
            reflection.d0 = reflection.d;
        }
        phase.modified = false;

        log::debug!(
            "Loaded {} ({}, {} reflections, V0 = {:.4})",
            path.display(),
            phase.symmetry,
            phase.reflections.len(),
            phase.v0
        );

        *self = phase;
        Ok(())
    }

    /// 以 version 4 格式保存
    pub fn save_file(&mut self, path: &Path) -> Result<()> {
        let content = jcpds::to_jcpds_string(self);
        fs::write(path, content).map_err(|e| JcpdsError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;

        self.set_path(path);
        self.modified = false;
        Ok(())
    }

    /// 从原文件重新加载，保留当前的压力和温度
    pub fn reload_file(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| JcpdsError::Other("Phase has no file to reload".to_string()))?;

        let (pressure, temperature) = (self.pressure, self.temperature);
        self.load_file(&path)?;
        self.compute_d(Some(pressure), Some(temperature))
    }

    fn from_record(record: JcpdsRecord) -> Self {
        Phase {
            version: record.version,
            comments: record.comments,
            symmetry: record.symmetry,
            cell0: record.cell,
            eos: record.eos,
            k0p: record.eos.k0p0,
            alpha_t: record.eos.alpha_t0,
            reflections: record.reflections,
            ..Phase::default()
        }
    }

    fn set_path(&mut self, path: &Path) {
        self.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        self.path = Some(path.to_path_buf());
    }

    // ─────────────────────────────────────────────────────────────
    // 计算
    // ─────────────────────────────────────────────────────────────

    /// 按晶系约束补全零压晶胞并计算 V0
    pub fn compute_v0(&mut self) -> Result<()> {
        self.cell0 = self.cell0.constrained(&self.symmetry);
        self.v0 = self.cell0.volume();

        if !(self.v0.is_finite() && self.v0 > 0.0) {
            return Err(JcpdsError::DegenerateCell {
                reason: format!(
                    "zero-pressure volume is {} for {} cell {:?}",
                    self.v0, self.symmetry, self.cell0
                ),
            });
        }
        Ok(())
    }

    /// 计算 P/T 下的体积；给定的 P/T 会被记录下来
    pub fn compute_volume(&mut self, pressure: Option<f64>, temperature: Option<f64>) -> Result<()> {
        if let Some(p) = pressure {
            self.pressure = p;
        }
        if let Some(t) = temperature {
            self.temperature = t;
        }

        let state = eos::compute_volume(
            self.v0,
            &self.eos,
            self.pressure,
            self.temperature,
            &self.solver_options,
        )?;

        self.v = state.v;
        self.alpha_t = state.alpha_t;
        self.k0p = state.k0p;
        Ok(())
    }

    /// 计算 P/T 下每条衍射线的 d
    pub fn compute_d(&mut self, pressure: Option<f64>, temperature: Option<f64>) -> Result<()> {
        self.compute_volume(pressure, temperature)?;

        if self.v0.is_nan() || self.v0 <= 0.0 {
            return Err(JcpdsError::DegenerateCell {
                reason: format!("cannot scale cell with V0 = {}", self.v0),
            });
        }

        let ratio = (self.v / self.v0).cbrt();
        self.cell = self.cell0.scaled(ratio);

        let ds = dspacing::d_spacings(
            &self.symmetry,
            &self.cell,
            self.reflections.iter().map(Reflection::hkl),
        );
        for (reflection, d) in self.reflections.iter_mut().zip(ds) {
            reflection.d = d;
        }
        Ok(())
    }

    /// 用零压晶胞计算每条衍射线的 d0
    pub fn compute_d0(&mut self) {
        let ds = dspacing::d_spacings(
            &self.symmetry,
            &self.cell0,
            self.reflections.iter().map(Reflection::hkl),
        );
        for (reflection, d0) in self.reflections.iter_mut().zip(ds) {
            reflection.d0 = d0;
        }
    }

    /// 修改参数后重新计算 V0 与当前 P/T 下的 d
    pub fn recompute(&mut self) -> Result<()> {
        self.compute_v0()?;
        self.compute_d0();
        self.compute_d(None, None)
    }

    pub fn has_thermal_expansion(&self) -> bool {
        self.eos.has_thermal_expansion()
    }

    // ─────────────────────────────────────────────────────────────
    // 衍射线操作
    // ─────────────────────────────────────────────────────────────

    pub fn add_reflection(&mut self, h: i32, k: i32, l: i32, intensity: f64, d: f64) {
        self.reflections.push(Reflection::new(h, k, l, intensity, d));
        self.modified = true;
    }

    pub fn remove_reflection(&mut self, ind: usize) -> Result<Reflection> {
        self.check_reflection_index(ind)?;
        self.modified = true;
        Ok(self.reflections.remove(ind))
    }

    pub fn delete_reflection(&mut self, ind: usize) -> Result<Reflection> {
        self.remove_reflection(ind)
    }

    pub fn update_reflection(&mut self, ind: usize, reflection: Reflection) -> Result<()> {
        self.check_reflection_index(ind)?;
        self.reflections[ind] = reflection;
        self.modified = true;
        Ok(())
    }

    pub fn clear_reflections(&mut self) {
        self.reflections.clear();
        self.modified = true;
    }

    /// 按下标序列重排衍射线，不改变 `modified`
    pub fn reorder_reflections(&mut self, indices: &[usize]) -> Result<()> {
        let len = self.reflections.len();
        let mut seen = vec![false; len];
        for &i in indices {
            if i >= len || seen[i] {
                return Err(JcpdsError::InvalidArgument(format!(
                    "{:?} is not a permutation of 0..{}",
                    indices, len
                )));
            }
            seen[i] = true;
        }
        if indices.len() != len {
            return Err(JcpdsError::InvalidArgument(format!(
                "expected {} indices, got {}",
                len,
                indices.len()
            )));
        }

        self.reflections = indices.iter().map(|&i| self.reflections[i]).collect();
        Ok(())
    }

    /// 稳定排序；`reversed` 为下标序列整体倒序
    pub fn sort_reflections(&mut self, key: SortKey, reversed: bool) {
        let indices = argsort(&self.reflections, key, reversed);
        self.reflections = indices.iter().map(|&i| self.reflections[i]).collect();
    }

    pub fn sort_reflections_by_h(&mut self, reversed: bool) {
        self.sort_reflections(SortKey::H, reversed);
    }

    pub fn sort_reflections_by_k(&mut self, reversed: bool) {
        self.sort_reflections(SortKey::K, reversed);
    }

    pub fn sort_reflections_by_l(&mut self, reversed: bool) {
        self.sort_reflections(SortKey::L, reversed);
    }

    pub fn sort_reflections_by_intensity(&mut self, reversed: bool) {
        self.sort_reflections(SortKey::Intensity, reversed);
    }

    pub fn sort_reflections_by_d(&mut self, reversed: bool) {
        self.sort_reflections(SortKey::D, reversed);
    }

    fn check_reflection_index(&self, ind: usize) -> Result<()> {
        if ind >= self.reflections.len() {
            return Err(JcpdsError::IndexOutOfRange {
                kind: "reflection",
                index: ind,
                len: self.reflections.len(),
            });
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // 参数修改（置位 modified）
    // ─────────────────────────────────────────────────────────────

    pub fn set_comments(&mut self, comments: Vec<String>) {
        self.comments = comments;
        self.modified = true;
    }

    pub fn set_symmetry(&mut self, symmetry: Symmetry) {
        self.symmetry = symmetry;
        self.modified = true;
    }

    pub fn set_cell0(&mut self, cell: CellParameters) {
        self.cell0 = cell;
        self.modified = true;
    }

    pub fn set_a0(&mut self, a0: f64) {
        self.cell0.a = a0;
        self.modified = true;
    }

    pub fn set_b0(&mut self, b0: f64) {
        self.cell0.b = b0;
        self.modified = true;
    }

    pub fn set_c0(&mut self, c0: f64) {
        self.cell0.c = c0;
        self.modified = true;
    }

    pub fn set_alpha0(&mut self, alpha0: f64) {
        self.cell0.alpha = alpha0;
        self.modified = true;
    }

    pub fn set_beta0(&mut self, beta0: f64) {
        self.cell0.beta = beta0;
        self.modified = true;
    }

    pub fn set_gamma0(&mut self, gamma0: f64) {
        self.cell0.gamma = gamma0;
        self.modified = true;
    }

    pub fn set_eos(&mut self, eos: EosParameters) {
        self.eos = eos;
        self.modified = true;
    }

    pub fn set_k0(&mut self, k0: f64) {
        self.eos.k0 = k0;
        self.modified = true;
    }

    pub fn set_k0p0(&mut self, k0p0: f64) {
        self.eos.k0p0 = k0p0;
        self.modified = true;
    }

    pub fn set_dk0dt(&mut self, dk0dt: f64) {
        self.eos.dk0dt = dk0dt;
        self.modified = true;
    }

    pub fn set_dk0pdt(&mut self, dk0pdt: f64) {
        self.eos.dk0pdt = dk0pdt;
        self.modified = true;
    }

    pub fn set_alpha_t0(&mut self, alpha_t0: f64) {
        self.eos.alpha_t0 = alpha_t0;
        self.modified = true;
    }

    pub fn set_d_alpha_dt(&mut self, d_alpha_dt: f64) {
        self.eos.d_alpha_dt = d_alpha_dt;
        self.modified = true;
    }

    /// 求解器参数不属于文件内容，不置位 modified
    pub fn set_solver_options(&mut self, options: SolverOptions) {
        self.solver_options = options;
    }

    // ─────────────────────────────────────────────────────────────
    // 读取
    // ─────────────────────────────────────────────────────────────

    /// 文件路径，已修改时追加 '*'
    pub fn filename(&self) -> String {
        let raw = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.decorate(raw)
    }

    /// 文件名（不含扩展名），已修改时追加 '*'
    pub fn name(&self) -> String {
        self.decorate(self.name.clone())
    }

    fn decorate(&self, mut text: String) -> String {
        if self.modified {
            text.push('*');
        }
        text
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn symmetry(&self) -> &Symmetry {
        &self.symmetry
    }

    pub fn cell0(&self) -> &CellParameters {
        &self.cell0
    }

    pub fn v0(&self) -> f64 {
        self.v0
    }

    pub fn cell(&self) -> &CellParameters {
        &self.cell
    }

    pub fn v(&self) -> f64 {
        self.v
    }

    pub fn eos(&self) -> &EosParameters {
        &self.eos
    }

    pub fn k0p(&self) -> f64 {
        self.k0p
    }

    pub fn alpha_t(&self) -> f64 {
        self.alpha_t
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn reflections(&self) -> &[Reflection] {
        &self.reflections
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn solver_options(&self) -> &SolverOptions {
        &self.solver_options
    }
}
