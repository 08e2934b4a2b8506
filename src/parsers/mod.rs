//! # 解析器模块
//!
//! 提供 MPB 输出文件和计算名称的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: calcname, dispersion, symeigs

pub mod calcname;
pub mod dispersion;
pub mod symeigs;

use crate::error::{MpbSymError, Result};
use crate::models::{assemble_symdata, MpbCalculation};
use std::path::Path;

/// 读取一次计算的两个输出文件并重建每个 k 点的对称数据
///
/// `path` 为不带后缀的计算路径，如 `runs/dim2-sg17-1-res32-te`，
/// 也可以是该计算的任一输出文件。
pub fn read_calculation(path: &Path) -> Result<MpbCalculation> {
    let stem = calcname::calc_stem(path).unwrap_or_else(|| path.to_path_buf());
    let stem = stem.as_path();
    let name = stem
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| MpbSymError::InvalidArgument(format!("{}", stem.display())))?;
    let meta = calcname::parse_calcname(name)?;

    let disp_path = calcname::dispersion_path(stem);
    let eigs_path = calcname::symeigs_path(stem);
    for p in [&disp_path, &eigs_path] {
        if !p.exists() {
            return Err(MpbSymError::FileNotFound {
                path: p.display().to_string(),
            });
        }
    }

    let dispersion = dispersion::parse_dispersion_file(&disp_path, meta.dim)?;
    let rows = symeigs::parse_symeigs_file(&eigs_path)?;
    let symdata = assemble_symdata(&meta, &dispersion, rows)?;

    Ok(MpbCalculation {
        meta,
        dispersion,
        symdata,
    })
}
