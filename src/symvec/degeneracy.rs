//! # 简并处理与对称向量
//!
//! - 按频率间隔把能带分成简并簇
//! - 逐簇指认不可约表示，出现分数多重度时合并下一簇（扩展能带窗口）
//! - 计算最低 N 条能带的对称向量，必要时增大 N 直到所有 k 点都得到整数
//!
//! ## 依赖关系
//! - 被 `commands/analyze/`, `commands/collect.rs` 调用
//! - 使用 `symvec/projection.rs`

use crate::error::{MpbSymError, Result};
use crate::symvec::projection::{
    band_characters, irrep_label_string, project, round_multiplicities, Projection,
};
use crate::symvec::AnalyzedKPoint;

use std::ops::Range;

/// 相邻频率差小于 `tol` 的能带归为一簇
pub fn degenerate_clusters(freqs: &[f64], tol: f64) -> Vec<Range<usize>> {
    let mut clusters = Vec::new();
    let mut start = 0;
    for b in 1..=freqs.len() {
        if b == freqs.len() || (freqs[b] - freqs[b - 1]).abs() >= tol {
            clusters.push(start..b);
            start = b;
        }
    }
    clusters
}

/// 一组能带的不可约表示指认
#[derive(Debug, Clone)]
pub struct BandGroup {
    /// 能带范围（0 起，左闭右开）
    pub bands: Range<usize>,

    /// 组内平均频率
    pub frequency: f64,

    /// 整数多重度；无法取整时为 None
    pub multiplicities: Option<Vec<u32>>,

    /// 未取整的多重度
    pub raw: Vec<f64>,

    /// 是否因分数多重度而合并了多个简并簇
    pub widened: bool,

    /// 指认标签，如 `Γ5`；无法取整时为 `?`
    pub label: String,
}

/// 单个 k 点的逐簇指认
#[derive(Debug, Clone)]
pub struct BandIrreps {
    pub k_index: usize,
    pub klabel: String,
    pub groups: Vec<BandGroup>,
}

/// 逐簇指认不可约表示
///
/// 分数多重度的簇依次并入后续簇（最多 `max_widen` 个）；始终得不到整数时
/// 只把该簇标为 `?`，从下一簇继续。
pub fn band_irreps(kp: &AnalyzedKPoint, degen_tol: f64, max_widen: usize, atol: f64) -> BandIrreps {
    let clusters = degenerate_clusters(&kp.data.freqs, degen_tol);
    let irreps = &kp.lg.irreps;

    let mut groups = Vec::new();
    let mut c = 0;
    while c < clusters.len() {
        let start = clusters[c].start;
        let widest = clusters.len().min(c.saturating_add(max_widen).saturating_add(1));

        let assigned = (c..widest).find_map(|last| {
            let bands = start..clusters[last].end;
            let projection = project(&band_characters(kp, bands.clone()), irreps);
            round_multiplicities(&projection, irreps, bands.len(), atol)
                .map(|m| (last, bands, projection, m))
        });

        match assigned {
            Some((last, bands, projection, m)) => {
                groups.push(band_group(kp, bands, projection, Some(m), last > c));
                c = last + 1;
            }
            None => {
                let bands = clusters[c].clone();
                let projection = project(&band_characters(kp, bands.clone()), irreps);
                groups.push(band_group(kp, bands, projection, None, false));
                c += 1;
            }
        }
    }

    BandIrreps {
        k_index: kp.data.k_index,
        klabel: kp.lg.klabel.clone(),
        groups,
    }
}

fn band_group(
    kp: &AnalyzedKPoint,
    bands: Range<usize>,
    projection: Projection,
    multiplicities: Option<Vec<u32>>,
    widened: bool,
) -> BandGroup {
    let frequency = kp.data.freqs[bands.clone()].iter().sum::<f64>() / bands.len() as f64;
    let label = match &multiplicities {
        Some(m) => irrep_label_string(m, &kp.lg.irreps),
        None => "?".to_string(),
    };
    BandGroup {
        bands,
        frequency,
        multiplicities,
        raw: projection.multiplicities,
        widened,
        label,
    }
}

/// 对称向量计算选项
#[derive(Debug, Clone)]
pub struct SymVecOptions {
    /// 初始能带窗口（0 起，左闭右开）
    pub bands: Range<usize>,

    /// 出现分数多重度时是否扩展窗口上界
    pub widen: bool,

    /// 窗口上界的最大值（能带数）
    pub max_bands: Option<usize>,

    /// 取整容差
    pub atol: f64,
}

/// 单个 k 点的对称向量分量
#[derive(Debug, Clone)]
pub struct KSymVec {
    pub k_index: usize,
    pub klabel: String,
    pub irrep_labels: Vec<String>,
    pub multiplicities: Vec<u32>,
}

/// 能带组在所有高对称 k 点的对称向量
#[derive(Debug, Clone)]
pub struct SymmetryVector {
    /// 最终使用的能带窗口
    pub bands: Range<usize>,

    pub entries: Vec<KSymVec>,
}

impl SymmetryVector {
    /// 按 k 点顺序拼接的多重度，末尾附能带数
    pub fn concatenated(&self) -> Vec<u32> {
        let mut v: Vec<u32> = self
            .entries
            .iter()
            .flat_map(|e| e.multiplicities.iter().copied())
            .collect();
        v.push(self.bands.len() as u32);
        v
    }

    /// 紧凑表示，如 `[Γ1, M1+M2, X1] (n=2)`
    pub fn summary(&self) -> String {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|e| {
                let nonzero: Vec<String> = e
                    .multiplicities
                    .iter()
                    .zip(&e.irrep_labels)
                    .filter(|&(&n, _)| n > 0)
                    .map(|(&n, l)| if n == 1 { l.clone() } else { format!("{}{}", n, l) })
                    .collect();
                nonzero.join("+")
            })
            .collect();
        format!("[{}] (n={})", parts.join(", "), self.bands.len())
    }
}

/// 计算能带窗口的对称向量
pub fn symmetry_vector(kpoints: &[AnalyzedKPoint], opts: &SymVecOptions) -> Result<SymmetryVector> {
    if kpoints.is_empty() {
        return Err(MpbSymError::InvalidArgument(
            "no k-points with tabulated irreps".to_string(),
        ));
    }
    if opts.bands.is_empty() {
        return Err(MpbSymError::InvalidRange(format!(
            "{}-{}",
            opts.bands.start + 1,
            opts.bands.end
        )));
    }

    let available = kpoints.iter().map(|kp| kp.num_bands()).min().unwrap_or(0);
    let limit = opts.max_bands.unwrap_or(available).min(available);
    if opts.bands.end > available {
        return Err(MpbSymError::InvalidArgument(format!(
            "band window ends at {} but only {} bands have symmetry data",
            opts.bands.end, available
        )));
    }

    let mut end = opts.bands.end;
    loop {
        let bands = opts.bands.start..end;
        let mut entries = Vec::with_capacity(kpoints.len());
        let mut failure = None;

        for kp in kpoints {
            let irreps = &kp.lg.irreps;
            let projection = project(&band_characters(kp, bands.clone()), irreps);
            match round_multiplicities(&projection, irreps, bands.len(), opts.atol) {
                Some(multiplicities) => entries.push(KSymVec {
                    k_index: kp.data.k_index,
                    klabel: kp.lg.klabel.clone(),
                    irrep_labels: irreps.iter().map(|ir| ir.label.clone()).collect(),
                    multiplicities,
                }),
                None => {
                    failure = Some((kp.lg.klabel.clone(), projection.multiplicities));
                    break;
                }
            }
        }

        match failure {
            None => return Ok(SymmetryVector { bands, entries }),
            Some(_) if opts.widen && end < limit => end += 1,
            Some((klabel, raw)) => {
                let values: Vec<String> = raw.iter().map(|v| format!("{:.3}", v)).collect();
                return Err(MpbSymError::FractionalMultiplicity {
                    klabel,
                    bands: format!("{}-{}", bands.start + 1, bands.end),
                    values: values.join(", "),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::lgirreps::{IrrepProvider, PlaneGroupTables};
    use crate::models::KPointSymData;

    use num::complex::Complex64;

    /// p4mm Γ 点：第 1 条带 A1，第 2、3 条带构成 E，第 4 条带 B1
    fn gamma_point() -> AnalyzedKPoint {
        let lg = PlaneGroupTables::new().little_groups(11, 2).unwrap()[0].clone();
        let a1 = &lg.irreps[0].characters;
        let b1 = &lg.irreps[2].characters;
        let e = &lg.irreps[4].characters;
        // E 表示拆成两条带：各取一半的迹（单独取整为 0.5）
        let half_e: Vec<Complex64> = e.iter().map(|c| c / 2.0).collect();

        let symeigs = vec![a1.clone(), half_e.clone(), half_e, b1.clone()];
        let data = KPointSymData {
            k_index: 1,
            kv: lg.kv,
            operations: lg.operations.clone(),
            freqs: vec![0.0, 0.5, 0.5 + 1e-6, 0.7],
            symeigs,
        };
        AnalyzedKPoint {
            op_order: (0..lg.order()).collect(),
            lg,
            data,
        }
    }

    #[test]
    fn test_degenerate_clusters() {
        let clusters = degenerate_clusters(&[0.1, 0.3, 0.3001, 0.3002, 0.5], 1e-3);
        assert_eq!(clusters, vec![0..1, 1..4, 4..5]);
        assert!(degenerate_clusters(&[], 1e-3).is_empty());
    }

    #[test]
    fn test_band_irreps_with_detected_degeneracy() {
        let kp = gamma_point();
        let result = band_irreps(&kp, 1e-4, 0, 1e-2);
        let labels: Vec<&str> = result.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Γ1", "Γ5", "Γ3"]);
        assert_eq!(result.groups[1].bands, 1..3);
        assert!(!result.groups[1].widened);
    }

    #[test]
    fn test_band_irreps_widens_missed_degeneracy() {
        let kp = gamma_point();
        // 容差过小，E 被拆成两簇
        let result = band_irreps(&kp, 1e-9, 1, 1e-2);
        assert_eq!(result.groups.len(), 3);
        assert_eq!(result.groups[1].label, "Γ5");
        assert!(result.groups[1].widened);

        let strict = band_irreps(&kp, 1e-9, 0, 1e-2);
        assert_eq!(strict.groups.len(), 4);
        assert_eq!(strict.groups[1].label, "?");
        assert!(strict.groups[1].multiplicities.is_none());
    }

    #[test]
    fn test_band_irreps_unresolved_cluster_stays_alone() {
        // 半个 E 与 B1 合并仍是分数，只把半个 E 标为 ?，B1 照常指认
        let mut kp = gamma_point();
        kp.data.symeigs.swap(2, 3);
        kp.data.freqs = vec![0.0, 0.5, 0.6, 0.7];

        let result = band_irreps(&kp, 1e-9, 1, 1e-2);
        let labels: Vec<&str> = result.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Γ1", "?", "Γ3", "?"]);
        assert_eq!(result.groups[1].bands, 1..2);
        assert!(!result.groups[1].widened);
        assert_eq!(result.groups[2].bands, 2..3);
    }

    #[test]
    fn test_symmetry_vector_widening() {
        let kps = vec![gamma_point()];
        let mut opts = SymVecOptions {
            bands: 0..2,
            widen: false,
            max_bands: None,
            atol: 1e-2,
        };
        assert!(matches!(
            symmetry_vector(&kps, &opts),
            Err(MpbSymError::FractionalMultiplicity { .. })
        ));

        opts.widen = true;
        let sv = symmetry_vector(&kps, &opts).unwrap();
        assert_eq!(sv.bands, 0..3);
        assert_eq!(sv.entries[0].multiplicities, vec![1, 0, 0, 0, 1]);
        assert_eq!(sv.concatenated(), vec![1, 0, 0, 0, 1, 3]);
        assert_eq!(sv.summary(), "[Γ1+Γ5] (n=3)");
    }

    #[test]
    fn test_symmetry_vector_respects_max_bands() {
        let kps = vec![gamma_point()];
        let opts = SymVecOptions {
            bands: 0..2,
            widen: true,
            max_bands: Some(2),
            atol: 1e-2,
        };
        assert!(symmetry_vector(&kps, &opts).is_err());
    }

    #[test]
    fn test_symmetry_vector_rejects_bad_window() {
        let kps = vec![gamma_point()];
        let opts = SymVecOptions {
            bands: 0..9,
            widen: false,
            max_bands: None,
            atol: 1e-2,
        };
        assert!(symmetry_vector(&kps, &opts).is_err());
        assert!(symmetry_vector(&[], &opts).is_err());
    }
}
