//! # 不可约表示投影
//!
//! 对能带窗口内的对称本征值求和得到特征标，投影到各不可约表示并取整。
//!
//! ## 公式
//! χ(g) = Σ_{b ∈ 窗口} ⟨ψ_b|g|ψ_b⟩
//! n_α  = ⟨χ_α, χ⟩ / ⟨χ_α, χ_α⟩，  ⟨a, b⟩ = Σ_g conj(a_g) b_g
//!
//! 分母取 ⟨χ_α, χ_α⟩ 而非群阶，时间反演合并的表示也适用。
//!
//! ## 依赖关系
//! - 被 `symvec/degeneracy.rs` 调用
//! - 使用 `lgirreps/` 的 LGIrrep

use crate::lgirreps::LGIrrep;
use crate::symvec::AnalyzedKPoint;

use num::complex::Complex64;
use std::ops::Range;

/// 投影结果（未取整）
#[derive(Debug, Clone)]
pub struct Projection {
    /// 每个不可约表示的多重度实部
    pub multiplicities: Vec<f64>,

    /// 每个不可约表示的多重度虚部（理想情况为 0）
    pub imaginary: Vec<f64>,
}

/// 能带窗口的特征标（小群操作顺序）
pub fn band_characters(kp: &AnalyzedKPoint, bands: Range<usize>) -> Vec<Complex64> {
    (0..kp.lg.order())
        .map(|op| bands.clone().map(|b| kp.eigenvalue(b, op)).sum::<Complex64>())
        .collect()
}

/// 将特征标投影到各不可约表示
pub fn project(chars: &[Complex64], irreps: &[LGIrrep]) -> Projection {
    let (multiplicities, imaginary): (Vec<f64>, Vec<f64>) = irreps
        .iter()
        .map(|ir| {
            let overlap: Complex64 = ir
                .characters
                .iter()
                .zip(chars)
                .map(|(a, b)| a.conj() * b)
                .sum();
            let n = overlap / ir.norm_sqr();
            (n.re, n.im)
        })
        .unzip();

    Projection {
        multiplicities,
        imaginary,
    }
}

/// 取整为非负整数多重度
///
/// 只有当所有值都在 `atol` 内接近非负整数、虚部小于 `atol`，
/// 且 Σ n_α·dim_α 等于窗口能带数时才返回 Some。
pub fn round_multiplicities(
    projection: &Projection,
    irreps: &[LGIrrep],
    num_bands: usize,
    atol: f64,
) -> Option<Vec<u32>> {
    let mut rounded = Vec::with_capacity(projection.multiplicities.len());
    for (&re, &im) in projection.multiplicities.iter().zip(&projection.imaginary) {
        let r = re.round();
        if (re - r).abs() > atol || im.abs() > atol || r < 0.0 {
            return None;
        }
        rounded.push(r as u32);
    }

    let total: usize = rounded
        .iter()
        .zip(irreps)
        .map(|(&n, ir)| n as usize * ir.dim)
        .sum();
    (total == num_bands).then_some(rounded)
}

/// 多重度转为标签串，如 `2Γ1+Γ2Γ4`
pub fn irrep_label_string(multiplicities: &[u32], irreps: &[LGIrrep]) -> String {
    let parts: Vec<String> = multiplicities
        .iter()
        .zip(irreps)
        .filter(|&(&n, _)| n > 0)
        .map(|(&n, ir)| {
            if n == 1 {
                ir.label.clone()
            } else {
                format!("{}{}", n, ir.label)
            }
        })
        .collect();

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join("+")
    }
}
