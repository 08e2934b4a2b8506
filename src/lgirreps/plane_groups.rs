//! # 平面群小群不可约表示表
//!
//! 内置的不可约表示来源：二维点式（symmorphic）平面群。
//! 点式群的平移部分为零，小群表示即小余群（点群）表示。
//!
//! ## 数据来源
//! 对称操作取自 International Tables for Crystallography, Vol. A（平面群部分），
//! 有心矩形群 (cm, c2mm) 改写到原胞基 a1' = (a-b)/2, a2' = (a+b)/2。
//!
//! ## 依赖关系
//! - 被 `lgirreps/mod.rs` 导出
//! - 使用 `lgirreps/characters.rs` 生成特征标
//! - 纯静态数据

use crate::error::{MpbSymError, Result};
use crate::lgirreps::characters::{point_group_characters, Basis2D};
use crate::lgirreps::{IrrepProvider, LGIrrep, LittleGroup};
use crate::models::{KVec, SymOperation};

const SQRT3_2: f64 = 0.866_025_403_784_438_6;

/// 二维晶系
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeSystem {
    Oblique,
    Rectangular,
    CenteredRectangular,
    Square,
    Hexagonal,
}

impl LatticeSystem {
    /// 用于判定转角和镜面轴的代表性基矢（列为 a1, a2）
    pub fn basis(&self) -> Basis2D {
        match self {
            LatticeSystem::Oblique | LatticeSystem::Rectangular | LatticeSystem::Square => {
                [[1.0, 0.0], [0.0, 1.0]]
            }
            LatticeSystem::CenteredRectangular => [[0.5, 0.5], [-0.75, 0.75]],
            LatticeSystem::Hexagonal => [[1.0, -0.5], [0.0, SQRT3_2]],
        }
    }

    /// 高对称 k 点（倒格子原胞基）
    pub fn kpoints(&self) -> &'static [(&'static str, [f64; 2])] {
        match self {
            LatticeSystem::Oblique => &[
                ("Γ", [0.0, 0.0]),
                ("Y", [0.0, 0.5]),
                ("B", [0.5, 0.0]),
                ("A", [0.5, 0.5]),
            ],
            LatticeSystem::Rectangular => &[
                ("Γ", [0.0, 0.0]),
                ("X", [0.5, 0.0]),
                ("Y", [0.0, 0.5]),
                ("S", [0.5, 0.5]),
            ],
            LatticeSystem::CenteredRectangular => &[
                ("Γ", [0.0, 0.0]),
                ("Y", [0.5, 0.5]),
                ("S", [0.0, 0.5]),
            ],
            LatticeSystem::Square => &[
                ("Γ", [0.0, 0.0]),
                ("X", [0.5, 0.0]),
                ("M", [0.5, 0.5]),
            ],
            LatticeSystem::Hexagonal => &[
                ("Γ", [0.0, 0.0]),
                ("K", [1.0 / 3.0, 1.0 / 3.0]),
                ("M", [0.5, 0.0]),
            ],
        }
    }
}

/// 平面群定义
#[derive(Debug, Clone, Copy)]
pub struct PlaneGroup {
    pub number: u32,
    pub symbol: &'static str,
    pub lattice: LatticeSystem,
    /// 点操作（xyzt 三元组）
    pub operations: &'static [&'static str],
}

pub static PLANE_GROUPS: &[PlaneGroup] = &[
    PlaneGroup {
        number: 1,
        symbol: "p1",
        lattice: LatticeSystem::Oblique,
        operations: &["x,y"],
    },
    PlaneGroup {
        number: 2,
        symbol: "p2",
        lattice: LatticeSystem::Oblique,
        operations: &["x,y", "-x,-y"],
    },
    PlaneGroup {
        number: 3,
        symbol: "pm",
        lattice: LatticeSystem::Rectangular,
        operations: &["x,y", "-x,y"],
    },
    PlaneGroup {
        number: 5,
        symbol: "cm",
        lattice: LatticeSystem::CenteredRectangular,
        operations: &["x,y", "y,x"],
    },
    PlaneGroup {
        number: 6,
        symbol: "p2mm",
        lattice: LatticeSystem::Rectangular,
        operations: &["x,y", "-x,-y", "-x,y", "x,-y"],
    },
    PlaneGroup {
        number: 9,
        symbol: "c2mm",
        lattice: LatticeSystem::CenteredRectangular,
        operations: &["x,y", "-x,-y", "y,x", "-y,-x"],
    },
    PlaneGroup {
        number: 10,
        symbol: "p4",
        lattice: LatticeSystem::Square,
        operations: &["x,y", "-x,-y", "-y,x", "y,-x"],
    },
    PlaneGroup {
        number: 11,
        symbol: "p4mm",
        lattice: LatticeSystem::Square,
        operations: &[
            "x,y", "-x,-y", "-y,x", "y,-x", "-x,y", "x,-y", "y,x", "-y,-x",
        ],
    },
    PlaneGroup {
        number: 13,
        symbol: "p3",
        lattice: LatticeSystem::Hexagonal,
        operations: &["x,y", "-y,x-y", "-x+y,-x"],
    },
    PlaneGroup {
        number: 14,
        symbol: "p3m1",
        lattice: LatticeSystem::Hexagonal,
        operations: &["x,y", "-y,x-y", "-x+y,-x", "-y,-x", "-x+y,y", "x,x-y"],
    },
    PlaneGroup {
        number: 15,
        symbol: "p31m",
        lattice: LatticeSystem::Hexagonal,
        operations: &["x,y", "-y,x-y", "-x+y,-x", "y,x", "x-y,-y", "-x,-x+y"],
    },
    PlaneGroup {
        number: 16,
        symbol: "p6",
        lattice: LatticeSystem::Hexagonal,
        operations: &["x,y", "-y,x-y", "-x+y,-x", "-x,-y", "y,-x+y", "x-y,x"],
    },
    PlaneGroup {
        number: 17,
        symbol: "p6mm",
        lattice: LatticeSystem::Hexagonal,
        operations: &[
            "x,y", "-y,x-y", "-x+y,-x", "-x,-y", "y,-x+y", "x-y,x", "-y,-x", "-x+y,y", "x,x-y",
            "y,x", "x-y,-y", "-x,-x+y",
        ],
    },
];

/// 按编号查找平面群
pub fn plane_group(number: u32) -> Option<&'static PlaneGroup> {
    PLANE_GROUPS.iter().find(|g| g.number == number)
}

/// 内置平面群不可约表示表
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaneGroupTables;

impl PlaneGroupTables {
    pub fn new() -> Self {
        PlaneGroupTables
    }

    fn lookup(sgnum: u32, dim: usize) -> Result<&'static PlaneGroup> {
        match (dim, plane_group(sgnum)) {
            (2, Some(g)) => Ok(g),
            _ => Err(MpbSymError::UnsupportedSpaceGroup { sgnum, dim }),
        }
    }
}

impl IrrepProvider for PlaneGroupTables {
    fn operations(&self, sgnum: u32, dim: usize) -> Result<Vec<SymOperation>> {
        Self::lookup(sgnum, dim)?
            .operations
            .iter()
            .map(|s| SymOperation::from_xyzt(s))
            .collect()
    }

    fn little_groups(&self, sgnum: u32, dim: usize) -> Result<Vec<LittleGroup>> {
        let group = Self::lookup(sgnum, dim)?;
        let operations = self.operations(sgnum, dim)?;
        let basis = group.lattice.basis();

        let groups = group
            .lattice
            .kpoints()
            .iter()
            .map(|(klabel, coords)| {
                let kv = KVec::new(coords);
                let lg_ops: Vec<SymOperation> = operations
                    .iter()
                    .filter(|op| kv.is_invariant_under(op, 1e-8))
                    .cloned()
                    .collect();

                let irreps = point_group_characters(&lg_ops, &basis)
                    .into_iter()
                    .enumerate()
                    .map(|(i, row)| LGIrrep {
                        label: format!("{}{}", klabel, i + 1),
                        dim: row.dim,
                        characters: row.characters,
                        realified: false,
                    })
                    .collect();

                LittleGroup {
                    klabel: klabel.to_string(),
                    kv,
                    operations: lg_ops,
                    irreps,
                }
            })
            .collect();

        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use num::complex::Complex64;

    fn inner(a: &[Complex64], b: &[Complex64]) -> Complex64 {
        a.iter().zip(b).map(|(x, y)| x.conj() * y).sum()
    }

    #[test]
    fn test_operation_tables_are_closed_groups() {
        for g in PLANE_GROUPS {
            let ops: Vec<SymOperation> = g
                .operations
                .iter()
                .map(|s| SymOperation::from_xyzt(s).unwrap())
                .collect();
            for a in &ops {
                for b in &ops {
                    let ab = a.compose(b);
                    assert!(
                        ops.iter().any(|c| c.is_equivalent(&ab, 1e-8)),
                        "{}: {} ∘ {} not in group",
                        g.symbol,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_irreps_are_orthonormal_and_complete() {
        let tables = PlaneGroupTables::new();
        for g in PLANE_GROUPS {
            for lg in tables.little_groups(g.number, 2).unwrap() {
                let order = lg.order() as f64;
                let dims: usize = lg.irreps.iter().map(|ir| ir.dim * ir.dim).sum();
                assert_eq!(dims, lg.order(), "{} {}", g.symbol, lg.klabel);

                for (i, a) in lg.irreps.iter().enumerate() {
                    assert!((a.characters[0].re - a.dim as f64).abs() < 1e-10);
                    for (j, b) in lg.irreps.iter().enumerate() {
                        let expected = if i == j { order } else { 0.0 };
                        let ip = inner(&a.characters, &b.characters);
                        assert!(
                            (ip - Complex64::new(expected, 0.0)).norm() < 1e-9,
                            "{} {}: <{}|{}> = {}",
                            g.symbol,
                            lg.klabel,
                            a.label,
                            b.label,
                            ip
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_p6mm_little_group_orders() {
        let lgs = PlaneGroupTables::new().little_groups(17, 2).unwrap();
        let orders: Vec<(String, usize, usize)> = lgs
            .iter()
            .map(|lg| (lg.klabel.clone(), lg.order(), lg.irreps.len()))
            .collect();
        assert_eq!(
            orders,
            vec![
                ("Γ".to_string(), 12, 6),
                ("K".to_string(), 6, 3),
                ("M".to_string(), 4, 4),
            ]
        );
    }

    #[test]
    fn test_p3m1_and_p31m_differ_at_k() {
        let tables = PlaneGroupTables::new();
        let k14 = &tables.little_groups(14, 2).unwrap()[1];
        let k15 = &tables.little_groups(15, 2).unwrap()[1];
        assert_eq!(k14.klabel, "K");
        assert_eq!(k14.order(), 3);
        assert_eq!(k15.order(), 6);
    }

    #[test]
    fn test_centered_rectangular_kpoints() {
        let lgs = PlaneGroupTables::new().little_groups(9, 2).unwrap();
        let y = lgs.iter().find(|lg| lg.klabel == "Y").unwrap();
        let s = lgs.iter().find(|lg| lg.klabel == "S").unwrap();
        assert_eq!(y.order(), 4);
        assert_eq!(s.order(), 2);
    }

    #[test]
    fn test_unsupported_groups() {
        let tables = PlaneGroupTables::new();
        assert!(tables.little_groups(4, 2).is_err());
        assert!(tables.little_groups(12, 2).is_err());
        assert!(tables.little_groups(17, 3).is_err());
        assert!(tables.operations(7, 2).is_err());
    }

    #[test]
    fn test_group_operations() {
        let ops = PlaneGroupTables::new().operations(17, 2).unwrap();
        assert_eq!(ops.len(), 12);
        assert!(ops[0].is_identity(1e-12));
    }
}
