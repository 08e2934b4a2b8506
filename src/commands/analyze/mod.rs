//! # analyze 命令实现
//!
//! 单次计算分析入口，包含两个子命令：
//! - `symvec`: 能带窗口的对称向量
//! - `bands`: 逐简并簇的不可约表示指认
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 定义的参数
//! - 使用 `parsers/`, `symvec/`
//! - 子模块: symvec, bands

pub mod bands;
pub mod symvec;

use crate::cli::analyze::{AnalyzeArgs, AnalyzeCommands};
use crate::error::Result;
use crate::lgirreps::PlaneGroupTables;
use crate::models::MpbCalculation;
use crate::parsers;
use crate::symvec::{self as sv, Analysis};
use crate::utils::output;

use std::path::Path;

/// 恒等操作本征值偏离 1 超过该值时警告
const IDENTITY_WARN_TOL: f64 = 1e-3;

/// 执行 analyze 命令
pub fn execute(args: AnalyzeArgs) -> Result<()> {
    match args.command {
        AnalyzeCommands::Symvec(symvec_args) => symvec::execute(symvec_args),
        AnalyzeCommands::Bands(bands_args) => bands::execute(bands_args),
    }
}

/// 读取计算、查找小群并打印概要与警告
fn load_analysis(calc_path: &Path, time_reversal: bool) -> Result<(MpbCalculation, Analysis)> {
    let calc = parsers::read_calculation(calc_path)?;
    let meta = &calc.meta;

    output::print_info(&format!(
        "Calculation '{}': {}D, space group {}, {} k-points ({} with symmetry data)",
        meta.name,
        meta.dim,
        meta.sgnum,
        calc.dispersion.kpoints.len(),
        calc.symdata.len()
    ));
    if let Some(pol) = meta.polarization {
        output::print_info(&format!("Polarization: {}", pol));
    }

    let analysis = sv::analyze(&calc, &PlaneGroupTables::new(), time_reversal)?;
    for kp in &analysis.kpoints {
        output::print_info(&format!(
            "k-point {} = {} {}, order {}: {}",
            kp.data.k_index,
            kp.klabel(),
            kp.lg.kv,
            kp.lg.order(),
            kp.lg.irrep_labels().join(", ")
        ));
    }
    report_warnings(&calc, &analysis);
    Ok((calc, analysis))
}

/// 数据质量相关的警告
fn report_warnings(calc: &MpbCalculation, analysis: &Analysis) {
    for (k_index, kv) in &analysis.unmatched {
        output::print_warning(&format!(
            "k-point {} {} is not a tabulated high-symmetry point, skipped",
            k_index, kv
        ));
    }

    let total_bands = calc.dispersion.num_bands();
    for kp in &analysis.kpoints {
        if let Some(dev) = kp.data.identity_deviation() {
            if dev > IDENTITY_WARN_TOL {
                output::print_warning(&format!(
                    "{}: identity eigenvalues deviate from 1 by up to {:.2e} (check resolution)",
                    kp.klabel(),
                    dev
                ));
            }
        }
        if kp.num_bands() < total_bands {
            output::print_warning(&format!(
                "{}: symmetry data covers {} of {} bands",
                kp.klabel(),
                kp.num_bands(),
                total_bands
            ));
        }
    }
}
