//! # 计算名称解析器
//!
//! 从计算名称中提取维度、空间群编号等元数据。
//!
//! ## 命名约定
//! ```text
//! dim2-sg17-1-res32-te
//! │    │    │ │     └── 偏振 (te/tm, 可选)
//! │    │    │ └──────── 网格分辨率 (可选)
//! │    │    └────────── 运行编号 (可选, 紧跟 sg)
//! │    └─────────────── 空间群编号
//! └──────────────────── 维度
//! ```
//! 输出文件为 `<name>-dispersion.out` 与 `<name>-symeigs.out`。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 和 `commands/` 使用
//! - 使用 `models/calculation.rs`

use crate::error::{MpbSymError, Result};
use crate::models::{CalcMeta, Polarization};

use regex::Regex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const DISPERSION_SUFFIX: &str = "-dispersion.out";
pub const SYMEIGS_SUFFIX: &str = "-symeigs.out";

static DIM_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^dim(\d+)$").unwrap());
static SG_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^sg(\d+)$").unwrap());
static RES_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^res(\d+)$").unwrap());

/// 解析计算名称（可带目录和输出后缀）
pub fn parse_calcname(name: &str) -> Result<CalcMeta> {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name);
    let base = base
        .strip_suffix(DISPERSION_SUFFIX)
        .or_else(|| base.strip_suffix(SYMEIGS_SUFFIX))
        .unwrap_or(base);

    let invalid = |reason: &str| MpbSymError::InvalidCalcName {
        name: base.to_string(),
        reason: reason.to_string(),
    };

    let mut dim: Option<usize> = None;
    let mut sgnum: Option<u32> = None;
    let mut id: Option<u32> = None;
    let mut resolution: Option<u32> = None;
    let mut polarization: Option<Polarization> = None;
    let mut after_sg = false;

    for token in base.split('-') {
        let token_lower = token.to_lowercase();
        if let Some(cap) = DIM_TOKEN.captures(&token_lower) {
            dim = Some(cap[1].parse().map_err(|_| invalid("bad dimension"))?);
            after_sg = false;
        } else if let Some(cap) = SG_TOKEN.captures(&token_lower) {
            sgnum = Some(cap[1].parse().map_err(|_| invalid("bad space group number"))?);
            after_sg = true;
        } else if let Some(cap) = RES_TOKEN.captures(&token_lower) {
            resolution = Some(cap[1].parse().map_err(|_| invalid("bad resolution"))?);
            after_sg = false;
        } else if token_lower == "te" {
            polarization = Some(Polarization::Te);
        } else if token_lower == "tm" {
            polarization = Some(Polarization::Tm);
        } else if after_sg {
            id = token.parse().ok();
            after_sg = false;
        }
    }

    let dim = dim.ok_or_else(|| invalid("missing 'dim<D>' token"))?;
    let sgnum = sgnum.ok_or_else(|| invalid("missing 'sg<N>' token"))?;

    let max_sgnum = match dim {
        1 => 2,
        2 => 17,
        3 => 230,
        _ => return Err(invalid("dimension must be 1, 2 or 3")),
    };
    if sgnum < 1 || sgnum > max_sgnum {
        return Err(invalid(&format!(
            "space group {} out of range 1..={} for {}D",
            sgnum, max_sgnum, dim
        )));
    }

    Ok(CalcMeta {
        id,
        resolution,
        polarization,
        ..CalcMeta::new(base, dim, sgnum)
    })
}

/// `<stem>-dispersion.out`
pub fn dispersion_path(stem: &Path) -> PathBuf {
    with_suffix(stem, DISPERSION_SUFFIX)
}

/// `<stem>-symeigs.out`
pub fn symeigs_path(stem: &Path) -> PathBuf {
    with_suffix(stem, SYMEIGS_SUFFIX)
}

/// 从输出文件路径恢复计算路径前缀
pub fn calc_stem(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let base = name
        .strip_suffix(DISPERSION_SUFFIX)
        .or_else(|| name.strip_suffix(SYMEIGS_SUFFIX))?;
    Some(path.with_file_name(base))
}

fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut s = OsString::from(stem.as_os_str());
    s.push(suffix);
    PathBuf::from(s)
}
