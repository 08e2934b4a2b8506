//! # symvec 子命令实现
//!
//! 计算能带窗口在所有高对称 k 点的对称向量。
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 的 SymvecArgs
//! - 使用 `symvec/degeneracy.rs`, `symvec/export.rs`
//! - 使用 `utils/output.rs`

use super::load_analysis;
use crate::cli::analyze::SymvecArgs;
use crate::error::{MpbSymError, Result};
use crate::symvec::degeneracy::{symmetry_vector, SymVecOptions, SymmetryVector};
use crate::symvec::export;
use crate::utils::output;

use std::ops::Range;

/// 执行 symvec 子命令
pub fn execute(args: SymvecArgs) -> Result<()> {
    output::print_header("Symmetry Vector");

    let bands = match &args.band_range {
        Some(range) => parse_band_range(range)?,
        None => {
            if args.bands == 0 {
                return Err(MpbSymError::InvalidArgument(
                    "--bands must be at least 1".to_string(),
                ));
            }
            0..args.bands
        }
    };

    let (_, analysis) = load_analysis(&args.calc, !args.no_time_reversal)?;

    let opts = SymVecOptions {
        bands: bands.clone(),
        widen: args.widen,
        max_bands: args.max_bands,
        atol: args.atol,
    };
    let sv = symmetry_vector(&analysis.kpoints, &opts)?;

    if sv.bands != bands {
        output::print_warning(&format!(
            "Band window widened from {} to {} to reach integer multiplicities",
            format_range(&bands),
            format_range(&sv.bands)
        ));
    }

    print_symvec_table(&sv);
    println!();
    output::print_success(&format!("Bands {}: {}", format_range(&sv.bands), sv.summary()));
    output::print_info(&format!(
        "Vector: [{}]",
        sv.concatenated()
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    ));

    if let Some(path) = &args.output_csv {
        export::symvec_to_csv(&analysis.meta.name, &sv, path)?;
        output::print_done(&format!("Symmetry vector written to '{}'", path.display()));
    }

    Ok(())
}

/// 解析能带范围 `a-b`（1 起，闭区间），返回 0 起的左闭右开区间
fn parse_band_range(range: &str) -> Result<Range<usize>> {
    let parts: Vec<&str> = range.split('-').collect();
    if parts.len() != 2 {
        return Err(MpbSymError::InvalidRange(range.to_string()));
    }

    let start: usize = parts[0]
        .trim()
        .parse()
        .map_err(|_| MpbSymError::InvalidRange(range.to_string()))?;
    let end: usize = parts[1]
        .trim()
        .parse()
        .map_err(|_| MpbSymError::InvalidRange(range.to_string()))?;

    if start < 1 || end < start {
        return Err(MpbSymError::InvalidRange(range.to_string()));
    }

    Ok(start - 1..end)
}

/// 0 起区间显示为 1 起闭区间
fn format_range(r: &Range<usize>) -> String {
    format!("{}-{}", r.start + 1, r.end)
}

/// 打印对称向量表格
fn print_symvec_table(sv: &SymmetryVector) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct IrrepRow {
        #[tabled(rename = "k")]
        klabel: String,
        #[tabled(rename = "k index")]
        k_index: usize,
        #[tabled(rename = "Irrep")]
        irrep: String,
        #[tabled(rename = "n")]
        multiplicity: u32,
    }

    let rows: Vec<IrrepRow> = sv
        .entries
        .iter()
        .flat_map(|e| {
            e.irrep_labels
                .iter()
                .zip(&e.multiplicities)
                .map(move |(label, &n)| IrrepRow {
                    klabel: e.klabel.clone(),
                    k_index: e.k_index,
                    irrep: label.clone(),
                    multiplicity: n,
                })
        })
        .collect();

    println!("{}", Table::new(rows));
}
