//! # 对称向量分析模块
//!
//! 把一次 MPB 计算的 k 点对称数据与小群不可约表示对应起来，
//! 然后按能带窗口或简并簇做投影。
//!
//! ## 子模块
//! - `matching`: 操作列表核对与重排
//! - `projection`: 特征标投影与取整
//! - `degeneracy`: 简并簇与对称向量
//! - `export`: CSV 导出
//! - `plot`: 能带图
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `lgirreps/`, `models/`

pub mod degeneracy;
pub mod export;
pub mod matching;
pub mod plot;
pub mod projection;

use crate::error::Result;
use crate::lgirreps::{find_little_group, IrrepProvider, LittleGroup};
use crate::models::{CalcMeta, KPointSymData, KVec, MpbCalculation};

use num::complex::Complex64;

/// k 向量匹配容差
const KVEC_ATOL: f64 = 1e-6;

/// 已与小群对应的 k 点
#[derive(Debug, Clone)]
pub struct AnalyzedKPoint {
    pub lg: LittleGroup,
    pub data: KPointSymData,

    /// `lg.operations[i]` 对应 `data.operations[op_order[i]]`
    pub op_order: Vec<usize>,
}

impl AnalyzedKPoint {
    pub fn klabel(&self) -> &str {
        &self.lg.klabel
    }

    pub fn num_bands(&self) -> usize {
        self.data.num_bands()
    }

    /// 第 `band` 条能带在小群第 `op` 个操作下的本征值
    pub fn eigenvalue(&self, band: usize, op: usize) -> Complex64 {
        self.data.symeigs[band][self.op_order[op]]
    }
}

/// 一次计算的分析结果
#[derive(Debug, Clone)]
pub struct Analysis {
    pub meta: CalcMeta,

    /// 有不可约表示表的 k 点，按文件顺序
    pub kpoints: Vec<AnalyzedKPoint>,

    /// 没有对应小群的 k 点 (编号, k 向量)
    pub unmatched: Vec<(usize, KVec)>,
}

/// 为每个 k 点查找小群并核对操作
pub fn analyze(
    calc: &MpbCalculation,
    provider: &dyn IrrepProvider,
    time_reversal: bool,
) -> Result<Analysis> {
    let groups = provider.little_groups_with_tr(calc.meta.sgnum, calc.meta.dim, time_reversal)?;

    let mut kpoints = Vec::new();
    let mut unmatched = Vec::new();
    for data in &calc.symdata {
        match find_little_group(&groups, &data.kv, KVEC_ATOL) {
            Some(lg) => {
                let op_order = matching::align_operations(lg, data)?;
                kpoints.push(AnalyzedKPoint {
                    lg: lg.clone(),
                    data: data.clone(),
                    op_order,
                });
            }
            None => unmatched.push((data.k_index, data.kv)),
        }
    }

    Ok(Analysis {
        meta: calc.meta.clone(),
        kpoints,
        unmatched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::lgirreps::PlaneGroupTables;
    use crate::models::{Dispersion, SymOperation};
    use crate::symvec::degeneracy::{symmetry_vector, SymVecOptions, SymmetryVector};

    /// p2 计算：Γ 与 X 点各两条能带，另有一个一般 k 点
    fn p2_calculation() -> MpbCalculation {
        let ops = |list: &[&str]| -> Vec<SymOperation> {
            list.iter()
                .map(|s| SymOperation::from_xyzt(s).unwrap())
                .collect()
        };
        let c = |re: f64| Complex64::new(re, 0.0);

        let gamma = KPointSymData {
            k_index: 1,
            kv: KVec::new(&[0.0, 0.0]),
            // 文件中 C2 在前
            operations: ops(&["-x,-y", "x,y"]),
            freqs: vec![0.0, 0.4],
            symeigs: vec![vec![c(1.0), c(1.0)], vec![c(-1.0), c(1.0)]],
        };
        let x = KPointSymData {
            k_index: 2,
            kv: KVec::new(&[0.5, 0.0]),
            operations: ops(&["x,y", "-x,-y"]),
            freqs: vec![0.3, 0.35],
            symeigs: vec![vec![c(1.0), c(-1.0)], vec![c(1.0), c(1.0)]],
        };
        let general = KPointSymData {
            k_index: 3,
            kv: KVec::new(&[0.2, 0.1]),
            operations: ops(&["x,y"]),
            freqs: vec![0.1, 0.2],
            symeigs: vec![vec![c(1.0)], vec![c(1.0)]],
        };

        MpbCalculation {
            meta: CalcMeta::new("dim2-sg2", 2, 2),
            dispersion: Dispersion::default(),
            symdata: vec![gamma, x, general],
        }
    }

    #[test]
    fn test_analyze_matches_and_reorders() {
        let calc = p2_calculation();
        let analysis = analyze(&calc, &PlaneGroupTables::new(), true).unwrap();

        assert_eq!(analysis.kpoints.len(), 2);
        assert_eq!(analysis.unmatched.len(), 1);
        assert_eq!(analysis.unmatched[0].0, 3);

        let gamma = &analysis.kpoints[0];
        assert_eq!(gamma.klabel(), "Γ");
        assert_eq!(gamma.op_order, vec![1, 0]);
        // 第 2 条带在 C2 下的本征值
        assert_eq!(gamma.eigenvalue(1, 1), Complex64::new(-1.0, 0.0));
        assert_eq!(gamma.eigenvalue(1, 0), Complex64::new(1.0, 0.0));
    }

    /// 三角晶系 K 点，单条能带按 K2 变换
    fn k2_band(sgnum: u32) -> SymmetryVector {
        let lg = PlaneGroupTables::new().little_groups(sgnum, 2).unwrap()[1].clone();
        assert_eq!(lg.klabel, "K");
        let data = KPointSymData {
            k_index: 1,
            kv: lg.kv,
            operations: lg.operations.clone(),
            freqs: vec![0.3],
            symeigs: vec![lg.irreps[1].characters.clone()],
        };
        let calc = MpbCalculation {
            meta: CalcMeta::new(format!("dim2-sg{}", sgnum), 2, sgnum),
            dispersion: Dispersion::default(),
            symdata: vec![data],
        };

        let analysis = analyze(&calc, &PlaneGroupTables::new(), true).unwrap();
        let opts = SymVecOptions {
            bands: 0..1,
            widen: false,
            max_bands: None,
            atol: 1e-2,
        };
        symmetry_vector(&analysis.kpoints, &opts).unwrap()
    }

    #[test]
    fn test_single_complex_band_at_k_without_time_reversal_partner() {
        for sgnum in [13, 14] {
            let sv = k2_band(sgnum);
            assert_eq!(sv.entries[0].irrep_labels, vec!["K1", "K2", "K3"]);
            assert_eq!(sv.entries[0].multiplicities, vec![0, 1, 0]);
        }
    }

    #[test]
    fn test_analyze_unsupported_group() {
        let mut calc = p2_calculation();
        calc.meta.sgnum = 4;
        assert!(analyze(&calc, &PlaneGroupTables::new(), true).is_err());
    }
}
