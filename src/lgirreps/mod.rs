//! # 小群不可约表示模块
//!
//! 定义小群与不可约表示的数据结构，以及不可约表示来源的 trait 接口。
//!
//! ## 子模块
//! - `characters`: 二维点群特征标生成
//! - `plane_groups`: 内置平面群表
//!
//! ## 依赖关系
//! - 被 `symvec/` 和 `commands/` 使用
//! - 使用 `models/` 的 SymOperation, KVec

pub mod characters;
pub mod plane_groups;

pub use plane_groups::PlaneGroupTables;

use crate::error::Result;
use crate::models::{KVec, SymOperation};

use num::complex::Complex64;

/// 小群不可约表示（以特征标给出）
#[derive(Debug, Clone)]
pub struct LGIrrep {
    /// 标签，如 `Γ1`、`M2M3`
    pub label: String,

    /// 维度
    pub dim: usize,

    /// 每个小群操作的特征标，顺序与 `LittleGroup::operations` 一致
    pub characters: Vec<Complex64>,

    /// 是否为时间反演合并后的物理不可约表示
    pub realified: bool,
}

impl LGIrrep {
    /// 特征标是否全部为实数
    pub fn is_real(&self, atol: f64) -> bool {
        self.characters.iter().all(|c| c.im.abs() <= atol)
    }

    /// 特征标自身的内积 ⟨χ, χ⟩
    pub fn norm_sqr(&self) -> f64 {
        self.characters.iter().map(|c| c.norm_sqr()).sum()
    }
}

/// k 点的小群及其不可约表示
#[derive(Debug, Clone)]
pub struct LittleGroup {
    /// k 点标签，如 `Γ`、`M`
    pub klabel: String,

    pub kv: KVec,

    /// 小群操作
    pub operations: Vec<SymOperation>,

    pub irreps: Vec<LGIrrep>,
}

impl LittleGroup {
    /// 群阶
    pub fn order(&self) -> usize {
        self.operations.len()
    }

    pub fn irrep_labels(&self) -> Vec<&str> {
        self.irreps.iter().map(|ir| ir.label.as_str()).collect()
    }

    /// 操作在小群中的位置（平移模晶格）
    pub fn position(&self, op: &SymOperation) -> Option<usize> {
        self.operations.iter().position(|o| o.is_equivalent(op, 1e-6))
    }

    /// 返回时间反演合并后的副本，`group_ops` 为整个空间群的操作
    pub fn realified(&self, group_ops: &[SymOperation]) -> LittleGroup {
        LittleGroup {
            irreps: realify(self, group_ops),
            ..self.clone()
        }
    }
}

/// 不可约表示来源
///
/// 为给定空间群的全部高对称 k 点提供小群与不可约表示。
pub trait IrrepProvider: Send + Sync {
    /// 空间群的全部操作（陪集代表）
    fn operations(&self, sgnum: u32, dim: usize) -> Result<Vec<SymOperation>>;

    fn little_groups(&self, sgnum: u32, dim: usize) -> Result<Vec<LittleGroup>>;

    /// 按需做时间反演合并
    fn little_groups_with_tr(
        &self,
        sgnum: u32,
        dim: usize,
        time_reversal: bool,
    ) -> Result<Vec<LittleGroup>> {
        let groups = self.little_groups(sgnum, dim)?;
        if !time_reversal {
            return Ok(groups);
        }
        let ops = self.operations(sgnum, dim)?;
        Ok(groups.iter().map(|lg| lg.realified(&ops)).collect())
    }
}

/// 时间反演下的物理不可约表示（Herring 判据，无自旋，点式群）
///
/// 取整个群中把 k 变到 -k 的操作 g；不存在时时间反演不约束该 k 点。
/// 否则对每个表示计算 W = (1/|G_k|) Σ_h χ((g h)²)：
/// - W = 1: 表示不变
/// - W = 0: 与特征标为 conj(χ(g⁻¹ h g)) 的表示合并，标签拼接（`Γ2` + `Γ4` -> `Γ2Γ4`）
/// - W = -1: 表示加倍（`Γ2Γ2`）
pub fn realify(lg: &LittleGroup, group_ops: &[SymOperation]) -> Vec<LGIrrep> {
    const ATOL: f64 = 1e-6;
    let irreps = &lg.irreps;

    let minus_k = lg.kv.negated();
    let Some(g) = group_ops
        .iter()
        .find(|op| lg.kv.transform(op).is_equivalent(&minus_k, ATOL))
    else {
        return irreps.clone();
    };
    let Some(g_inv) = group_ops.iter().find(|op| g.compose(op).is_identity(ATOL)) else {
        return irreps.clone();
    };

    let squares: Option<Vec<usize>> = lg
        .operations
        .iter()
        .map(|h| {
            let gh = g.compose(h);
            lg.position(&gh.compose(&gh))
        })
        .collect();
    let conjugated: Option<Vec<usize>> = lg
        .operations
        .iter()
        .map(|h| lg.position(&g_inv.compose(h).compose(g)))
        .collect();
    let (Some(squares), Some(conjugated)) = (squares, conjugated) else {
        return irreps.clone();
    };

    let order = lg.order() as f64;
    let mut used = vec![false; irreps.len()];
    let mut out = Vec::with_capacity(irreps.len());

    for (i, ir) in irreps.iter().enumerate() {
        if used[i] {
            continue;
        }
        used[i] = true;

        let herring = squares.iter().map(|&j| ir.characters[j]).sum::<Complex64>() / order;
        match herring.re.round() as i32 {
            1 => out.push(ir.clone()),
            -1 => out.push(LGIrrep {
                label: format!("{0}{0}", ir.label),
                dim: 2 * ir.dim,
                characters: ir.characters.iter().map(|c| c * 2.0).collect(),
                realified: true,
            }),
            _ => {
                let partner_chars: Vec<Complex64> =
                    conjugated.iter().map(|&j| ir.characters[j].conj()).collect();
                let partner = (0..irreps.len()).find(|&j| {
                    !used[j]
                        && irreps[j]
                            .characters
                            .iter()
                            .zip(&partner_chars)
                            .all(|(a, b)| (a - b).norm() <= ATOL)
                });

                match partner {
                    Some(j) => {
                        used[j] = true;
                        let other = &irreps[j];
                        out.push(LGIrrep {
                            label: format!("{}{}", ir.label, other.label),
                            dim: ir.dim + other.dim,
                            characters: ir
                                .characters
                                .iter()
                                .zip(&other.characters)
                                .map(|(a, b)| a + b)
                                .collect(),
                            realified: true,
                        });
                    }
                    None => out.push(ir.clone()),
                }
            }
        }
    }

    out
}

/// 按 k 向量查找小群
pub fn find_little_group<'a>(
    groups: &'a [LittleGroup],
    kv: &KVec,
    atol: f64,
) -> Option<&'a LittleGroup> {
    groups.iter().find(|lg| lg.kv.is_equivalent(kv, atol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realify_pairs_complex_irreps_of_c4() {
        let tables = PlaneGroupTables::new();
        let lgs = tables.little_groups(10, 2).unwrap();
        let gamma = &lgs[0];
        assert_eq!(gamma.irreps.len(), 4);

        let real = gamma.realified(&tables.operations(10, 2).unwrap());
        assert_eq!(real.irrep_labels(), vec!["Γ1", "Γ2Γ4", "Γ3"]);
        let pair = &real.irreps[1];
        assert!(pair.realified);
        assert_eq!(pair.dim, 2);
        assert!(pair.is_real(1e-10));
        // C4 操作上的特征标 i + (-i) = 0
        assert!(pair.characters[2].norm() < 1e-12);
        assert!((pair.norm_sqr() - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_realify_keeps_real_tables() {
        let tables = PlaneGroupTables::new();
        let ops = tables.operations(11, 2).unwrap();
        for lg in &tables.little_groups(11, 2).unwrap() {
            let real = lg.realified(&ops);
            assert_eq!(real.irrep_labels(), lg.irrep_labels());
            assert!(real.irreps.iter().all(|ir| !ir.realified));
        }
    }

    #[test]
    fn test_provider_time_reversal_switch() {
        let tables = PlaneGroupTables::new();
        let with_tr = tables.little_groups_with_tr(16, 2, true).unwrap();
        let without = tables.little_groups_with_tr(16, 2, false).unwrap();
        assert_eq!(without[0].irreps.len(), 6);
        assert_eq!(with_tr[0].irreps.len(), 4);
    }

    fn k_labels_with_tr(sgnum: u32) -> Vec<String> {
        let lgs = PlaneGroupTables::new()
            .little_groups_with_tr(sgnum, 2, true)
            .unwrap();
        let k = lgs.iter().find(|lg| lg.klabel == "K").unwrap();
        k.irrep_labels().iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_time_reversal_leaves_k_of_p3_alone() {
        // p3 中没有把 K 变到 -K 的操作
        assert_eq!(k_labels_with_tr(13), vec!["K1", "K2", "K3"]);
    }

    #[test]
    fn test_time_reversal_herring_real_type_in_p3m1() {
        // 镜面把 K 变到 -K，(m h)² = E，Herring 和为 1
        assert_eq!(k_labels_with_tr(14), vec!["K1", "K2", "K3"]);
    }

    #[test]
    fn test_time_reversal_pairs_k_of_p6() {
        // C2 把 K 变到 -K 且与 C3 对易，复表示成对
        assert_eq!(k_labels_with_tr(16), vec!["K1", "K2K3"]);
    }

    #[test]
    fn test_herring_doubling_label() {
        // 构造 W = -1 的情形：g = E，χ(h²) 全为 -1 的一维“表示”
        let lg = LittleGroup {
            klabel: "Γ".to_string(),
            kv: KVec::new(&[0.0, 0.0]),
            operations: vec![SymOperation::identity(2)],
            irreps: vec![LGIrrep {
                label: "Γ1".to_string(),
                dim: 1,
                characters: vec![Complex64::new(-1.0, 0.0)],
                realified: false,
            }],
        };
        let out = realify(&lg, &[SymOperation::identity(2)]);
        assert_eq!(out[0].label, "Γ1Γ1");
        assert_eq!(out[0].dim, 2);
        assert!(out[0].realified);
    }

    #[test]
    fn test_find_little_group_modulo_lattice() {
        let lgs = PlaneGroupTables::new().little_groups(11, 2).unwrap();
        let m = find_little_group(&lgs, &KVec::new(&[-0.5, 0.5]), 1e-6).unwrap();
        assert_eq!(m.klabel, "M");
        assert!(find_little_group(&lgs, &KVec::new(&[0.25, 0.0]), 1e-6).is_none());
    }
}
