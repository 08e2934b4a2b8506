//! # k 点数据模型
//!
//! 倒格子原胞基下的 k 向量。
//!
//! ## 依赖关系
//! - 被 `parsers/dispersion.rs`, `lgirreps/`, `symvec/` 使用
//! - 使用 `models/symop.rs`

use crate::models::SymOperation;

use std::fmt;

/// k 向量（倒格子基分量）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KVec {
    dim: usize,
    coords: [f64; 3],
}

impl KVec {
    /// 从分量切片创建（维度 = 切片长度，最多 3）
    pub fn new(coords: &[f64]) -> Self {
        let dim = coords.len().min(3);
        let mut c = [0.0; 3];
        c[..dim].copy_from_slice(&coords[..dim]);
        KVec { dim, coords: c }
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords[..self.dim]
    }

    /// -k
    pub fn negated(&self) -> KVec {
        let mut coords = self.coords;
        coords.iter_mut().for_each(|c| *c = -*c);
        KVec {
            dim: self.dim,
            coords,
        }
    }

    /// 模倒格矢等价
    pub fn is_equivalent(&self, other: &KVec, atol: f64) -> bool {
        self.dim == other.dim
            && self
                .coords()
                .iter()
                .zip(other.coords())
                .all(|(a, b)| {
                    let d = a - b;
                    (d - d.round()).abs() <= atol
                })
    }

    /// 行向量右乘旋转部分：k' = k·W
    pub fn transform(&self, op: &SymOperation) -> KVec {
        let w = op.rotation();
        let mut out = [0.0; 3];
        for (j, o) in out.iter_mut().enumerate().take(self.dim) {
            *o = (0..self.dim).map(|i| self.coords[i] * w[i][j] as f64).sum();
        }
        KVec {
            dim: self.dim,
            coords: out,
        }
    }

    /// 操作是否保持 k 不变（模倒格矢）
    pub fn is_invariant_under(&self, op: &SymOperation, atol: f64) -> bool {
        op.dim() == self.dim && self.transform(op).is_equivalent(self, atol)
    }
}

impl fmt::Display for KVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.coords().iter().map(|c| format!("{:.4}", c)).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
