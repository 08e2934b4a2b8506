//! # MPB 色散文件解析器
//!
//! 解析 `<calc>-dispersion.out`，即 MPB `freqs:` 输出行。
//!
//! ## 格式说明
//! ```text
//! freqs:, k index, k1, k2, k3, kmag/2pi, band 1, band 2, ...   # 表头，跳过
//! freqs:, 1, 0, 0, 0, 0, 0, 0.5412, 0.5412, ...
//! ```
//! 前缀 `freqs:`（以及 `tefreqs:`/`tmfreqs:`）可有可无。
//! k 分量固定为三列，只保留前 D 个。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/calculation.rs`
//! - 使用 `csv` 读取逗号分隔数据

use crate::error::{MpbSymError, Result};
use crate::models::{Dispersion, KVec};

use std::fs;
use std::path::Path;

/// k 编号、三个 k 分量、|k|/2π
const LEADING_COLUMNS: usize = 5;

/// 解析色散文件
pub fn parse_dispersion_file(path: &Path, dim: usize) -> Result<Dispersion> {
    let content = fs::read_to_string(path).map_err(|e| MpbSymError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_dispersion_content(&content, &path.display().to_string(), dim)
}

/// 从字符串内容解析色散数据
pub fn parse_dispersion_content(
    content: &str,
    source_name: &str,
    dim: usize,
) -> Result<Dispersion> {
    let parse_error = |line: Option<u64>, reason: String| MpbSymError::ParseError {
        format: "dispersion".to_string(),
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

    let mut kpoints: Vec<(usize, KVec)> = Vec::new();
    let mut freqs: Vec<Vec<f64>> = Vec::new();

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line());

        let fields: Vec<&str> = record.iter().collect();
        let fields = match fields.first() {
            Some(f) if f.ends_with("freqs:") => &fields[1..],
            _ => &fields[..],
        };

        // 表头行或空行
        let k_index: usize = match fields.first().and_then(|f| f.parse().ok()) {
            Some(k) => k,
            None => continue,
        };

        if fields.len() <= LEADING_COLUMNS {
            return Err(parse_error(
                line,
                format!(
                    "expected at least {} columns, found {}",
                    LEADING_COLUMNS + 1,
                    fields.len()
                ),
            ));
        }

        let parse_f64 = |s: &str| {
            s.parse::<f64>()
                .map_err(|_| parse_error(line, format!("invalid number '{}'", s)))
        };

        let k: Vec<f64> = fields[1..1 + dim.min(3)]
            .iter()
            .map(|s| parse_f64(*s))
            .collect::<Result<_>>()?;
        let row: Vec<f64> = fields[LEADING_COLUMNS..]
            .iter()
            .map(|s| parse_f64(*s))
            .collect::<Result<_>>()?;

        if let Some(first) = freqs.first() {
            if row.len() != first.len() {
                return Err(parse_error(
                    line,
                    format!("{} bands, expected {}", row.len(), first.len()),
                ));
            }
        }
        if kpoints.iter().any(|(i, _)| *i == k_index) {
            return Err(parse_error(line, format!("duplicate k index {}", k_index)));
        }

        kpoints.push((k_index, KVec::new(&k)));
        freqs.push(row);
    }

    if kpoints.is_empty() {
        return Err(parse_error(None, "no frequency data found".to_string()));
    }

    Ok(Dispersion { kpoints, freqs })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"freqs:, k index, k1, k2, k3, kmag/2pi, tm band 1, tm band 2, tm band 3
freqs:, 1, 0, 0, 0, 0, 0, 0.5614, 0.5614
freqs:, 2, 0.5, 0, 0, 0.5, 0.2871, 0.4460, 0.5729
freqs:, 3, 0.5, 0.5, 0, 0.7071, 0.3311, 0.3311, 0.6102
"#;

    #[test]
    fn test_parse_mpb_freqs() {
        let disp = parse_dispersion_content(SAMPLE, "test", 2).unwrap();
        assert_eq!(disp.kpoints.len(), 3);
        assert_eq!(disp.num_bands(), 3);
        assert_eq!(disp.kpoints[1].0, 2);
        assert_eq!(disp.kpoints[2].1.coords(), &[0.5, 0.5]);
        assert!((disp.freqs[1][2] - 0.5729).abs() < 1e-12);
        assert_eq!(disp.position(3), Some(2));
    }

    #[test]
    fn test_parse_without_prefix() {
        let content = "1, 0.0, 0.0, 0.0, 0.0, 0.1, 0.2\n\n2, 0.5, 0.0, 0.0, 0.5, 0.3, 0.4\n";
        let disp = parse_dispersion_content(content, "test", 2).unwrap();
        assert_eq!(disp.kpoints.len(), 2);
        assert_eq!(disp.freqs[1], vec![0.3, 0.4]);
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let content = "1, 0, 0, 0, 0, 0.1, 0.2\n2, 0.5, 0, 0, 0.5, 0.3\n";
        assert!(parse_dispersion_content(content, "test", 2).is_err());
    }

    #[test]
    fn test_parse_rejects_short_rows_and_bad_numbers() {
        assert!(parse_dispersion_content("1, 0, 0, 0, 0\n", "test", 2).is_err());
        assert!(parse_dispersion_content("1, 0, 0, 0, 0, abc\n", "test", 2).is_err());
    }

    #[test]
    fn test_parse_rejects_empty_and_duplicates() {
        assert!(parse_dispersion_content("freqs:, k index, k1\n", "test", 2).is_err());
        let dup = "1, 0, 0, 0, 0, 0.1\n1, 0.5, 0, 0, 0.5, 0.2\n";
        assert!(parse_dispersion_content(dup, "test", 2).is_err());
    }
}
