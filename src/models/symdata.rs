//! # k 点对称数据重建
//!
//! 把色散表与对称本征值表合并为每个 k 点的数据：
//! 该 k 点的对称操作列表，以及按频率排序后的每条能带的对称本征值。
//!
//! ## 依赖关系
//! - 被 `symvec/` 和 `commands/` 使用
//! - 使用 `models/calculation.rs`

use crate::error::{MpbSymError, Result};
use crate::models::{CalcMeta, Dispersion, KVec, SymEigRow, SymOperation};

use num::complex::Complex64;
use std::cmp::Ordering;

/// 单个 k 点的对称数据
#[derive(Debug, Clone)]
pub struct KPointSymData {
    /// k 编号
    pub k_index: usize,

    /// k 向量
    pub kv: KVec,

    /// 对称操作（文件中的顺序）
    pub operations: Vec<SymOperation>,

    /// 升序排列的频率
    pub freqs: Vec<f64>,

    /// 对称本征值 [band][operation]，与 `freqs` 同序
    pub symeigs: Vec<Vec<Complex64>>,
}

impl KPointSymData {
    pub fn num_bands(&self) -> usize {
        self.freqs.len()
    }

    /// 恒等操作本征值与 1 的最大偏差；没有恒等操作时返回 None
    pub fn identity_deviation(&self) -> Option<f64> {
        let idx = self.operations.iter().position(|op| op.is_identity(1e-6))?;
        self.symeigs
            .iter()
            .map(|eigs| (eigs[idx] - Complex64::new(1.0, 0.0)).norm())
            .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.max(d))))
    }
}

/// 合并色散与对称本征值数据
pub fn assemble_symdata(
    meta: &CalcMeta,
    dispersion: &Dispersion,
    rows: Vec<SymEigRow>,
) -> Result<Vec<KPointSymData>> {
    let inconsistent = |reason: String| MpbSymError::InconsistentData {
        calc: meta.name.clone(),
        reason,
    };

    // 按 k 编号分组，保持首次出现顺序
    let mut groups: Vec<(usize, Vec<SymEigRow>)> = Vec::new();
    for row in rows {
        if row.operation.dim() != meta.dim {
            return Err(inconsistent(format!(
                "operation '{}' at k-point {} is {}D, expected {}D",
                row.operation,
                row.k_index,
                row.operation.dim(),
                meta.dim
            )));
        }
        match groups.iter_mut().find(|(k, _)| *k == row.k_index) {
            Some((_, group)) => group.push(row),
            None => groups.push((row.k_index, vec![row])),
        }
    }

    let mut result = Vec::with_capacity(groups.len());
    for (k_index, group) in groups {
        let pos = dispersion.position(k_index).ok_or_else(|| {
            inconsistent(format!("k-point {} missing from dispersion data", k_index))
        })?;

        let nbands = group[0].eigenvalues.len();
        if let Some(bad) = group.iter().find(|r| r.eigenvalues.len() != nbands) {
            return Err(inconsistent(format!(
                "k-point {}: operation '{}' has {} bands, expected {}",
                k_index,
                bad.operation,
                bad.eigenvalues.len(),
                nbands
            )));
        }
        if nbands > dispersion.freqs[pos].len() {
            return Err(inconsistent(format!(
                "k-point {}: {} symmetry eigenvalues but only {} frequencies",
                k_index,
                nbands,
                dispersion.freqs[pos].len()
            )));
        }

        for (i, a) in group.iter().enumerate() {
            if group[..i]
                .iter()
                .any(|b| b.operation.is_equivalent(&a.operation, 1e-6))
            {
                return Err(inconsistent(format!(
                    "k-point {}: operation '{}' listed twice",
                    k_index, a.operation
                )));
            }
        }

        // 按频率稳定排序，本征值随之重排
        let freqs = &dispersion.freqs[pos][..nbands];
        let mut perm: Vec<usize> = (0..nbands).collect();
        perm.sort_by(|&a, &b| freqs[a].partial_cmp(&freqs[b]).unwrap_or(Ordering::Equal));

        let sorted_freqs: Vec<f64> = perm.iter().map(|&b| freqs[b]).collect();
        let symeigs: Vec<Vec<Complex64>> = perm
            .iter()
            .map(|&b| group.iter().map(|r| r.eigenvalues[b]).collect())
            .collect();

        result.push(KPointSymData {
            k_index,
            kv: dispersion.kpoints[pos].1,
            operations: group.into_iter().map(|r| r.operation).collect(),
            freqs: sorted_freqs,
            symeigs,
        });
    }

    Ok(result)
}
