//! # 对称操作数据模型
//!
//! Seitz 记号 `{W|w}` 表示的空间群操作，基矢为晶格基。
//! 与 xyzt 三元组字符串互相转换（如 `-y,x-y`、`x+1/2,-y`）。
//!
//! ## 依赖关系
//! - 被 `parsers/symeigs.rs`, `lgirreps/` 和 `symvec/` 使用
//! - 无外部模块依赖

use crate::error::{MpbSymError, Result};

use std::fmt;

const AXES: [char; 3] = ['x', 'y', 'z'];

/// 对称操作 `{W|w}`
#[derive(Debug, Clone, PartialEq)]
pub struct SymOperation {
    /// 维度 (1-3)
    dim: usize,
    /// 旋转部分 W（仅左上 dim×dim 有效）
    rotation: [[i32; 3]; 3],
    /// 平移部分 w（分数坐标）
    translation: [f64; 3],
}

impl SymOperation {
    /// 恒等操作
    pub fn identity(dim: usize) -> Self {
        let mut rotation = [[0; 3]; 3];
        for (i, row) in rotation.iter_mut().enumerate().take(dim) {
            row[i] = 1;
        }
        SymOperation {
            dim,
            rotation,
            translation: [0.0; 3],
        }
    }

    /// 解析 xyzt 三元组，分量个数决定维度
    pub fn from_xyzt(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(',').collect();
        let dim = parts.len();
        if !(1..=3).contains(&dim) {
            return Err(MpbSymError::InvalidOperation(s.to_string()));
        }

        let mut rotation = [[0; 3]; 3];
        let mut translation = [0.0; 3];
        for (i, part) in parts.iter().enumerate() {
            let (row, shift) = parse_component(part, dim)
                .ok_or_else(|| MpbSymError::InvalidOperation(s.to_string()))?;
            rotation[i] = row;
            translation[i] = shift;
        }

        Ok(SymOperation {
            dim,
            rotation,
            translation,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn rotation(&self) -> &[[i32; 3]; 3] {
        &self.rotation
    }

    pub fn translation(&self) -> &[f64] {
        &self.translation[..self.dim]
    }

    /// 是否为恒等操作（忽略整数平移）
    pub fn is_identity(&self, atol: f64) -> bool {
        self.is_equivalent(&SymOperation::identity(self.dim), atol)
    }

    /// 复合操作 self ∘ other = {W₁W₂ | W₁w₂ + w₁}
    pub fn compose(&self, other: &SymOperation) -> SymOperation {
        let d = self.dim;
        let mut rotation = [[0; 3]; 3];
        let mut translation = [0.0; 3];
        for i in 0..d {
            for j in 0..d {
                rotation[i][j] = (0..d).map(|k| self.rotation[i][k] * other.rotation[k][j]).sum();
            }
            translation[i] = self.translation[i]
                + (0..d)
                    .map(|k| self.rotation[i][k] as f64 * other.translation[k])
                    .sum::<f64>();
        }
        SymOperation {
            dim: d,
            rotation,
            translation,
        }
    }

    /// 旋转部分的行列式
    pub fn rotation_det(&self) -> i32 {
        let w = &self.rotation;
        match self.dim {
            1 => w[0][0],
            2 => w[0][0] * w[1][1] - w[0][1] * w[1][0],
            _ => {
                w[0][0] * (w[1][1] * w[2][2] - w[1][2] * w[2][1])
                    - w[0][1] * (w[1][0] * w[2][2] - w[1][2] * w[2][0])
                    + w[0][2] * (w[1][0] * w[2][1] - w[1][1] * w[2][0])
            }
        }
    }

    /// 旋转部分相同，平移部分模晶格平移相等
    pub fn is_equivalent(&self, other: &SymOperation, atol: f64) -> bool {
        if self.dim != other.dim {
            return false;
        }
        let d = self.dim;
        for i in 0..d {
            if self.rotation[i][..d] != other.rotation[i][..d] {
                return false;
            }
            let diff = self.translation[i] - other.translation[i];
            if (diff - diff.round()).abs() > atol {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for SymOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let components: Vec<String> = (0..self.dim)
            .map(|i| format_component(&self.rotation[i][..self.dim], self.translation()[i]))
            .collect();
        write!(f, "{}", components.join(","))
    }
}

/// 解析单个分量，如 `-x+y` 或 `x+1/2`
fn parse_component(s: &str, dim: usize) -> Option<([i32; 3], f64)> {
    let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() {
        return None;
    }

    // 按 +/- 切分，保留符号
    let mut terms: Vec<String> = Vec::new();
    let mut current = String::new();
    for (i, c) in s.chars().enumerate() {
        if (c == '+' || c == '-') && i > 0 {
            terms.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    terms.push(current);

    let mut row = [0; 3];
    let mut shift = 0.0;
    for term in &terms {
        let (sign, body) = match term.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, term.strip_prefix('+').unwrap_or(term)),
        };
        if body.is_empty() {
            return None;
        }

        let last = body.chars().last()?;
        if let Some(axis) = AXES.iter().position(|&a| a == last.to_ascii_lowercase()) {
            if axis >= dim {
                return None;
            }
            let coef_str = &body[..body.len() - 1];
            let coef: i32 = match coef_str.trim_end_matches('*') {
                "" => 1,
                c => c.parse().ok()?,
            };
            row[axis] += sign * coef;
        } else {
            shift += sign as f64 * parse_fraction(body)?;
        }
    }

    Some((row, shift))
}

/// 解析分数或小数，如 `1/2`、`0.25`
fn parse_fraction(s: &str) -> Option<f64> {
    match s.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().ok()?;
            let den: f64 = den.parse().ok()?;
            if den == 0.0 {
                None
            } else {
                Some(num / den)
            }
        }
        None => s.parse().ok(),
    }
}

fn format_component(row: &[i32], shift: f64) -> String {
    let mut out = String::new();
    for (axis, &c) in row.iter().enumerate() {
        if c == 0 {
            continue;
        }
        if c < 0 {
            out.push('-');
        } else if !out.is_empty() {
            out.push('+');
        }
        if c.abs() != 1 {
            out.push_str(&c.abs().to_string());
        }
        out.push(AXES[axis]);
    }

    if shift.abs() > 1e-10 {
        if shift > 0.0 && !out.is_empty() {
            out.push('+');
        } else if shift < 0.0 {
            out.push('-');
        }
        out.push_str(&format_fraction(shift.abs()));
    }

    if out.is_empty() {
        out.push('0');
    }
    out
}

/// 常见晶体学分母 (2, 3, 4, 6) 写成分数，否则写小数
fn format_fraction(v: f64) -> String {
    for den in [1, 2, 3, 4, 6] {
        let num = v * den as f64;
        if (num - num.round()).abs() < 1e-8 {
            return if den == 1 {
                format!("{}", num.round() as i64)
            } else {
                format!("{}/{}", num.round() as i64, den)
            };
        }
    }
    format!("{}", v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_threefold_rotation() {
        let op = SymOperation::from_xyzt("-y,x-y").unwrap();
        assert_eq!(op.dim(), 2);
        assert_eq!(op.rotation()[0][..2], [0, -1]);
        assert_eq!(op.rotation()[1][..2], [1, -1]);
        assert_eq!(op.rotation_det(), 1);
    }

    #[test]
    fn test_threefold_cubes_to_identity() {
        let op = SymOperation::from_xyzt("-y,x-y").unwrap();
        let cubed = op.compose(&op).compose(&op);
        assert!(cubed.is_identity(1e-8));
        assert!(!op.compose(&op).is_identity(1e-8));
    }

    #[test]
    fn test_parse_translation() {
        let op = SymOperation::from_xyzt("x+1/2, -y").unwrap();
        assert!((op.translation()[0] - 0.5).abs() < 1e-12);
        assert_eq!(op.rotation()[1][..2], [0, -1]);
        assert_eq!(op.to_string(), "x+1/2,-y");
    }

    #[test]
    fn test_equivalence_modulo_lattice() {
        let a = SymOperation::from_xyzt("-x+1,-y").unwrap();
        let b = SymOperation::from_xyzt("-x,-y").unwrap();
        assert!(a.is_equivalent(&b, 1e-6));
        let c = SymOperation::from_xyzt("-x+1/2,-y").unwrap();
        assert!(!c.is_equivalent(&b, 1e-6));
    }

    #[test]
    fn test_display_round_trip() {
        for s in ["x,y", "-x+y,-x", "x-y,-y", "y,-x+y", "-x,-y,z"] {
            let op = SymOperation::from_xyzt(s).unwrap();
            assert_eq!(op.to_string(), s);
        }
    }

    #[test]
    fn test_invalid_operations() {
        assert!(SymOperation::from_xyzt("x,q").is_err());
        assert!(SymOperation::from_xyzt("x,z").is_err());
        assert!(SymOperation::from_xyzt("x,y,z,x").is_err());
        assert!(SymOperation::from_xyzt("x,").is_err());
    }

    #[test]
    fn test_mirror_determinant() {
        let m = SymOperation::from_xyzt("y,x").unwrap();
        assert_eq!(m.rotation_det(), -1);
        assert!(m.compose(&m).is_identity(1e-8));
    }
}
