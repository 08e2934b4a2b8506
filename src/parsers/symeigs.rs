//! # MPB 对称本征值文件解析器
//!
//! 解析 `<calc>-symeigs.out`：每行是一个 k 点上一个对称操作对所有能带的本征值。
//!
//! ## 格式说明
//! ```text
//! k index, operation, band 1, band 2, ...
//! 1, "x,y", 1+0i, 1+0i, ...
//! 1, "-y,x-y", -0.5+0.866i, 1.0-2.1e-5im, ...
//! ```
//! 操作为 xyzt 三元组，含逗号时需加引号。
//! 复数写作 `a`、`a+bi`、`a-bim`、`bi`，虚数单位可为 `i`/`im`/`j`。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/calculation.rs`, `models/symop.rs`
//! - 使用 `csv` 读取逗号分隔数据

use crate::error::{MpbSymError, Result};
use crate::models::{SymEigRow, SymOperation};

use num::complex::Complex64;
use std::fs;
use std::path::Path;

/// 解析对称本征值文件
pub fn parse_symeigs_file(path: &Path) -> Result<Vec<SymEigRow>> {
    let content = fs::read_to_string(path).map_err(|e| MpbSymError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_symeigs_content(&content, &path.display().to_string())
}

/// 从字符串内容解析对称本征值
pub fn parse_symeigs_content(content: &str, source_name: &str) -> Result<Vec<SymEigRow>> {
    let parse_error = |line: Option<u64>, reason: String| MpbSymError::ParseError {
        format: "symeigs".to_string(),
        path: source_name.to_string(),
        reason: match line {
            Some(l) => format!("line {}: {}", l, reason),
            None => reason,
        },
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line());

        // 表头行
        let k_index: usize = match record.get(0).and_then(|f| f.parse().ok()) {
            Some(k) => k,
            None => continue,
        };

        if record.len() < 3 {
            return Err(parse_error(
                line,
                format!("expected at least 3 columns, found {}", record.len()),
            ));
        }

        let op_str = &record[1];
        let operation = SymOperation::from_xyzt(op_str)
            .map_err(|e| parse_error(line, e.to_string()))?;

        let eigenvalues: Vec<Complex64> = record
            .iter()
            .skip(2)
            .map(|s| parse_complex(s).map_err(|e| parse_error(line, e.to_string())))
            .collect::<Result<_>>()?;

        rows.push(SymEigRow {
            k_index,
            operation,
            eigenvalues,
        });
    }

    if rows.is_empty() {
        return Err(parse_error(None, "no symmetry eigenvalues found".to_string()));
    }

    Ok(rows)
}

/// 解析复数字面量
pub fn parse_complex(s: &str) -> Result<Complex64> {
    let invalid = || MpbSymError::InvalidComplex(s.to_string());
    let t: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if t.is_empty() {
        return Err(invalid());
    }

    let body = ["im", "i", "j"]
        .iter()
        .find_map(|unit| t.strip_suffix(unit));

    let Some(body) = body else {
        let re: f64 = t.parse().map_err(|_| invalid())?;
        return Ok(Complex64::new(re, 0.0));
    };
    let body = body.trim_end_matches('*');

    // 实部与虚部的分界：最后一个不属于指数的 +/-
    let bytes = body.as_bytes();
    let split = (1..bytes.len())
        .rev()
        .find(|&i| (bytes[i] == b'+' || bytes[i] == b'-') && !matches!(bytes[i - 1], b'e' | b'E'));

    let (re_str, im_str) = match split {
        Some(i) => (&body[..i], &body[i..]),
        None => ("", body),
    };

    let re: f64 = if re_str.is_empty() {
        0.0
    } else {
        re_str.parse().map_err(|_| invalid())?
    };
    let im: f64 = match im_str {
        "" | "+" => 1.0,
        "-" => -1.0,
        v => v.parse().map_err(|_| invalid())?,
    };

    Ok(Complex64::new(re, im))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Complex64, re: f64, im: f64) -> bool {
        (a.re - re).abs() < 1e-12 && (a.im - im).abs() < 1e-12
    }

    #[test]
    fn test_parse_complex_forms() {
        assert!(close(parse_complex("1").unwrap(), 1.0, 0.0));
        assert!(close(parse_complex("-0.5+0.866i").unwrap(), -0.5, 0.866));
        assert!(close(parse_complex("1.0-2.5e-5im").unwrap(), 1.0, -2.5e-5));
        assert!(close(parse_complex("1e-3+1E+2j").unwrap(), 1e-3, 100.0));
        assert!(close(parse_complex("-2i").unwrap(), 0.0, -2.0));
        assert!(close(parse_complex("i").unwrap(), 0.0, 1.0));
        assert!(close(parse_complex("3 - im").unwrap(), 3.0, -1.0));
        assert!(close(parse_complex("0.5+0.1*im").unwrap(), 0.5, 0.1));
    }

    #[test]
    fn test_parse_complex_rejects_garbage() {
        assert!(parse_complex("").is_err());
        assert!(parse_complex("abc").is_err());
        assert!(parse_complex("1+2k").is_err());
    }

    #[test]
    fn test_parse_symeigs_rows() {
        let content = r#"k index, operation, band 1, band 2
1, "x,y", 1+0i, 1+0i
1, "-x,-y", 1+0i, -1+0i
2, "x,y", 1, 1
"#;
        let rows = parse_symeigs_content(content, "test").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].k_index, 1);
        assert_eq!(rows[1].operation.to_string(), "-x,-y");
        assert!(close(rows[1].eigenvalues[1], -1.0, 0.0));
        assert_eq!(rows[2].k_index, 2);
    }

    #[test]
    fn test_parse_symeigs_errors() {
        assert!(parse_symeigs_content("1, \"x,y\"\n", "test").is_err());
        assert!(parse_symeigs_content("1, \"x,q\", 1\n", "test").is_err());
        assert!(parse_symeigs_content("1, \"x,y\", 1+zi\n", "test").is_err());
        assert!(parse_symeigs_content("k index, operation\n", "test").is_err());
    }
}
