//! # 衍射线数据模型
//!
//! 单条 (hkl) 衍射线：强度、零压 d 间距与当前 P/T 下的 d 间距。
//!
//! ## 依赖关系
//! - 被 `models/phase.rs`, `parsers/jcpds.rs`, `collection/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 衍射线
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Reflection {
    /// Miller 指数 h
    pub h: i32,
    /// Miller 指数 k
    pub k: i32,
    /// Miller 指数 l
    pub l: i32,
    /// 相对强度（0-100）
    pub intensity: f64,
    /// 零压 d 间距（Å）
    pub d0: f64,
    /// 当前 P/T 下的 d 间距（Å）
    pub d: f64,
}

impl Reflection {
    /// 新建衍射线，d0 与 d 相同
    pub fn new(h: i32, k: i32, l: i32, intensity: f64, d: f64) -> Self {
        Reflection {
            h,
            k,
            l,
            intensity,
            d0: d,
            d,
        }
    }

    pub fn hkl(&self) -> [i32; 3] {
        [self.h, self.k, self.l]
    }
}

/// 排序键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    H,
    K,
    L,
    Intensity,
    D,
}

impl SortKey {
    fn value(&self, reflection: &Reflection) -> f64 {
        match self {
            SortKey::H => reflection.h as f64,
            SortKey::K => reflection.k as f64,
            SortKey::L => reflection.l as f64,
            SortKey::Intensity => reflection.intensity,
            SortKey::D => reflection.d,
        }
    }
}

/// 稳定 argsort：返回按键升序排列的下标，相等键保持原有相对顺序。
///
/// `reversed` 只是把得到的下标序列倒过来，并非降序排序：
/// 相等键的相对顺序也会被倒转。
pub fn argsort(reflections: &[Reflection], key: SortKey, reversed: bool) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..reflections.len()).collect();
    indices.sort_by(|&i, &j| {
        key.value(&reflections[i])
            .total_cmp(&key.value(&reflections[j]))
    });
    if reversed {
        indices.reverse();
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<Reflection> {
        vec![
            Reflection::new(1, 0, 0, 50.0, 4.0),
            Reflection::new(1, 1, 0, 20.0, 3.0),
            Reflection::new(2, 0, 0, 100.0, 2.0),
        ]
    }

    #[test]
    fn test_new_sets_d0_equal_d() {
        let r = Reflection::new(1, 1, 1, 100.0, 2.35);
        assert_eq!(r.d0, r.d);
        assert_eq!(r.hkl(), [1, 1, 1]);
    }

    #[test]
    fn test_default_is_all_zero() {
        let r = Reflection::default();
        assert_eq!(r.hkl(), [0, 0, 0]);
        assert_eq!(r.intensity, 0.0);
        assert_eq!(r.d, 0.0);
    }

    #[test]
    fn test_argsort_stable() {
        assert_eq!(argsort(&fixture(), SortKey::H, false), vec![0, 1, 2]);
        assert_eq!(argsort(&fixture(), SortKey::Intensity, false), vec![1, 0, 2]);
    }

    #[test]
    fn test_argsort_reversed_flips_ties() {
        // 两条 h = 1 的线在倒序后顺序也被倒转
        assert_eq!(argsort(&fixture(), SortKey::H, true), vec![2, 1, 0]);
    }
}
