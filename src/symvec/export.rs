//! # 分析结果导出
//!
//! 导出对称向量和逐簇指认到 CSV。
//!
//! ## 支持格式
//! - 对称向量: calc, n_bands, klabel, irrep, multiplicity（每个不可约表示一行）
//! - 逐簇指认: calc, k_index, klabel, band_start, band_end, frequency, irreps, widened
//!
//! ## 依赖关系
//! - 被 `commands/analyze/`, `commands/collect.rs` 调用
//! - 使用 `symvec/degeneracy.rs` 的结果结构
//! - 使用 `csv` + `serde` 写入

use crate::error::{MpbSymError, Result};
use crate::symvec::degeneracy::{BandIrreps, SymmetryVector};

use serde::Serialize;
use std::path::Path;

/// 对称向量 CSV 的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymVecRecord {
    pub calc: String,
    pub n_bands: usize,
    pub klabel: String,
    pub irrep: String,
    pub multiplicity: u32,
}

/// 逐簇指认 CSV 的一行
#[derive(Debug, Clone, Serialize)]
struct BandRecord<'a> {
    calc: &'a str,
    k_index: usize,
    klabel: &'a str,
    band_start: usize,
    band_end: usize,
    frequency: String,
    irreps: &'a str,
    widened: bool,
}

/// 对称向量展开为 CSV 行
pub fn symvec_records(calc: &str, sv: &SymmetryVector) -> Vec<SymVecRecord> {
    sv.entries
        .iter()
        .flat_map(|e| {
            e.irrep_labels
                .iter()
                .zip(&e.multiplicities)
                .map(move |(label, &n)| SymVecRecord {
                    calc: calc.to_string(),
                    n_bands: sv.bands.len(),
                    klabel: e.klabel.clone(),
                    irrep: label.clone(),
                    multiplicity: n,
                })
        })
        .collect()
}

/// 写出对称向量记录
pub fn records_to_csv(records: &[SymVecRecord], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush().map_err(|e| MpbSymError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

/// 导出单次计算的对称向量
pub fn symvec_to_csv(calc: &str, sv: &SymmetryVector, output_path: &Path) -> Result<()> {
    records_to_csv(&symvec_records(calc, sv), output_path)
}

/// 导出逐簇指认（能带编号从 1 开始，闭区间）
pub fn band_irreps_to_csv(calc: &str, results: &[BandIrreps], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for kres in results {
        for group in &kres.groups {
            wtr.serialize(BandRecord {
                calc,
                k_index: kres.k_index,
                klabel: &kres.klabel,
                band_start: group.bands.start + 1,
                band_end: group.bands.end,
                frequency: format!("{:.6}", group.frequency),
                irreps: &group.label,
                widened: group.widened,
            })?;
        }
    }

    wtr.flush().map_err(|e| MpbSymError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    Ok(())
}
