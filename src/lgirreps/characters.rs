//! # 二维点群特征标
//!
//! 由笛卡尔形式的旋转/镜面操作生成小余群（循环群 Cn 或二面体群 Cnv）的不可约表示特征标。
//!
//! ## 公式
//! - Cn:  χ_m(R_θ) = exp(i m θ),  m = 0..n-1
//! - Cnv: A1, A2, (n 为偶数时 B1, B2), E_m (m = 1..(n-1)/2)
//!   - 旋转:  B: cos(nθ/2),      E_m: 2cos(mθ)
//!   - 镜面:  B: ±cos(n(φ-φ₀)),  E_m: 0
//!
//!   φ 为镜面轴角，φ₀ 取操作列表中第一个镜面
//!
//! ## 依赖关系
//! - 被 `lgirreps/plane_groups.rs` 调用
//! - 使用 `models/symop.rs`

use crate::models::SymOperation;

use num::complex::Complex64;

/// 晶格基矢矩阵，列为 a1, a2 的笛卡尔分量
pub type Basis2D = [[f64; 2]; 2];

/// 笛卡尔形式的点操作
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointOp {
    /// 旋转角 θ（弧度）
    Rotation(f64),
    /// 镜面轴角 φ（弧度）
    Mirror(f64),
}

/// 单个不可约表示的维度与特征标
#[derive(Debug, Clone)]
pub struct CharacterRow {
    pub dim: usize,
    pub characters: Vec<Complex64>,
}

/// 把晶格基下的旋转部分变换到笛卡尔坐标 R = A W A⁻¹ 并分类
pub fn classify(op: &SymOperation, basis: &Basis2D) -> PointOp {
    let a = basis;
    let w = op.rotation();
    let det = a[0][0] * a[1][1] - a[0][1] * a[1][0];
    let a_inv = [
        [a[1][1] / det, -a[0][1] / det],
        [-a[1][0] / det, a[0][0] / det],
    ];

    let mut aw = [[0.0; 2]; 2];
    for i in 0..2 {
        for j in 0..2 {
            aw[i][j] = (0..2).map(|k| a[i][k] * w[k][j] as f64).sum();
        }
    }
    let mut r = [[0.0; 2]; 2];
    for i in 0..2 {
        for j in 0..2 {
            r[i][j] = (0..2).map(|k| aw[i][k] * a_inv[k][j]).sum();
        }
    }

    let angle = r[1][0].atan2(r[0][0]);
    if op.rotation_det() > 0 {
        PointOp::Rotation(angle)
    } else {
        PointOp::Mirror(angle / 2.0)
    }
}

/// 生成小余群全部不可约表示的特征标（顺序与 `ops` 一致）
pub fn point_group_characters(ops: &[SymOperation], basis: &Basis2D) -> Vec<CharacterRow> {
    let classified: Vec<PointOp> = ops.iter().map(|op| classify(op, basis)).collect();
    let n = classified
        .iter()
        .filter(|p| matches!(p, PointOp::Rotation(_)))
        .count();
    let first_mirror = classified.iter().find_map(|p| match p {
        PointOp::Mirror(phi) => Some(*phi),
        PointOp::Rotation(_) => None,
    });

    let row = |dim: usize, f: &dyn Fn(&PointOp) -> Complex64| CharacterRow {
        dim,
        characters: classified.iter().map(|p| clean(f(p))).collect(),
    };
    let real = |x: f64| Complex64::new(x, 0.0);

    let Some(phi0) = first_mirror else {
        // 循环群 Cn
        return (0..n)
            .map(|m| {
                row(1, &|p| match p {
                    PointOp::Rotation(theta) => Complex64::from_polar(1.0, m as f64 * theta),
                    PointOp::Mirror(_) => Complex64::new(0.0, 0.0),
                })
            })
            .collect();
    };

    // 二面体群 Cnv
    let nf = n as f64;
    let mut rows = vec![
        row(1, &|_| real(1.0)),
        row(1, &|p| match p {
            PointOp::Rotation(_) => real(1.0),
            PointOp::Mirror(_) => real(-1.0),
        }),
    ];
    if n % 2 == 0 {
        for sign in [1.0, -1.0] {
            rows.push(row(1, &|p| match p {
                PointOp::Rotation(theta) => real((nf * theta / 2.0).cos()),
                PointOp::Mirror(phi) => real(sign * (nf * (phi - phi0)).cos()),
            }));
        }
    }
    for m in 1..=(n.saturating_sub(1) / 2) {
        let mf = m as f64;
        rows.push(row(2, &|p| match p {
            PointOp::Rotation(theta) => real(2.0 * (mf * theta).cos()),
            PointOp::Mirror(_) => real(0.0),
        }));
    }
    rows
}

/// 消除浮点噪声：接近整数的分量取整
fn clean(z: Complex64) -> Complex64 {
    let snap = |x: f64| {
        if (x - x.round()).abs() < 1e-10 {
            x.round() + 0.0
        } else {
            x
        }
    };
    Complex64::new(snap(z.re), snap(z.im))
}
