//! # collect 命令实现
//!
//! 批量计算目录下所有 MPB 计算的对称向量。
//!
//! ## 功能
//! - 按模式收集 `-dispersion.out` 文件
//! - 并行读取、查找小群并计算对称向量
//! - 缺少对称本征值文件的计算跳过，出错的计算单独报告
//! - 合并为单个 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/collect.rs` 定义的参数
//! - 使用 `batch/`, `parsers/`, `symvec/`
//! - 使用 `utils/output.rs`

use crate::batch::{BatchResult, BatchRunner, FileCollector, ProcessResult};
use crate::cli::collect::CollectArgs;
use crate::error::{MpbSymError, Result};
use crate::lgirreps::{IrrepProvider, PlaneGroupTables};
use crate::parsers::{self, calcname};
use crate::symvec;
use crate::symvec::degeneracy::{symmetry_vector, SymVecOptions};
use crate::symvec::export::{self, SymVecRecord};
use crate::utils::output;

use std::path::Path;

/// 执行 collect 命令
pub fn execute(args: CollectArgs) -> Result<()> {
    output::print_header("Collecting Symmetry Vectors");

    if !args.dir.is_dir() {
        return Err(MpbSymError::DirectoryNotFound {
            path: args.dir.display().to_string(),
        });
    }
    if args.bands == 0 {
        return Err(MpbSymError::InvalidArgument(
            "--bands must be at least 1".to_string(),
        ));
    }

    let files = FileCollector::new(args.dir.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();
    if files.is_empty() {
        return Err(MpbSymError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }

    let runner = BatchRunner::new(args.jobs).with_progress(!args.no_progress);
    output::print_info(&format!(
        "Found {} calculations, using {} threads",
        files.len(),
        runner.jobs()
    ));

    let tables = PlaneGroupTables::new();
    let opts = SymVecOptions {
        bands: 0..args.bands,
        widen: args.widen,
        max_bands: args.max_bands,
        atol: args.atol,
    };
    let time_reversal = !args.no_time_reversal;

    let result: BatchResult<Vec<SymVecRecord>> = runner.run(files, |path| {
        process_calculation(path, &tables, &opts, time_reversal)
    })?;

    let records: Vec<SymVecRecord> = result
        .outputs
        .iter()
        .flat_map(|(_, recs)| recs.iter().cloned())
        .collect();

    for (name, reason) in &result.skips {
        output::print_skip(&format!("{}: {}", name, reason));
    }
    for (name, err) in &result.failures {
        output::print_warning(&format!("{}: {}", name, err));
    }

    if records.is_empty() {
        output::print_warning("No symmetry vectors computed.");
    } else {
        export::records_to_csv(&records, &args.output)?;
        output::print_done(&format!(
            "Wrote {} rows to '{}'",
            records.len(),
            args.output.display()
        ));
    }

    output::print_separator();
    output::print_info(&format!(
        "Total: {}  Success: {}  Skipped: {}  Failed: {}",
        result.total(),
        result.success(),
        result.skipped(),
        result.failed()
    ));

    Ok(())
}

/// 单个计算的流水线
fn process_calculation(
    dispersion_file: &Path,
    provider: &dyn IrrepProvider,
    opts: &SymVecOptions,
    time_reversal: bool,
) -> ProcessResult<Vec<SymVecRecord>> {
    let name = dispersion_file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| dispersion_file.display().to_string());

    let Some(stem) = calcname::calc_stem(dispersion_file) else {
        return ProcessResult::Skipped(name, "not an MPB dispersion file".to_string());
    };
    if !calcname::symeigs_path(&stem).exists() {
        return ProcessResult::Skipped(name, "no symmetry eigenvalue file".to_string());
    }

    let run = || -> Result<(String, Vec<SymVecRecord>)> {
        let calc = parsers::read_calculation(&stem)?;
        let analysis = symvec::analyze(&calc, provider, time_reversal)?;
        let sv = symmetry_vector(&analysis.kpoints, opts)?;
        let calc_name = analysis.meta.name;
        let records = export::symvec_records(&calc_name, &sv);
        Ok((calc_name, records))
    };

    match run() {
        Ok((calc_name, records)) => ProcessResult::Success(calc_name, records),
        Err(MpbSymError::UnsupportedSpaceGroup { sgnum, dim }) => ProcessResult::Skipped(
            name,
            format!("no irrep tables for space group {} in {}D", sgnum, dim),
        ),
        Err(e) => ProcessResult::Failed(name, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    const DISPERSION: &str = "freqs:, 1, 0, 0, 0, 0, 0.0, 0.40
freqs:, 2, 0.25, 0.1, 0, 0.3, 0.2, 0.45
freqs:, 3, 0.5, 0, 0, 0.5, 0.30, 0.35
";

    const SYMEIGS: &str = r#"1, "x,y", 1, 1
1, "-x,-y", 1, -1
3, "x,y", 1, 1
3, "-x,-y", -1, 1
"#;

    fn opts(bands: usize) -> SymVecOptions {
        SymVecOptions {
            bands: 0..bands,
            widen: false,
            max_bands: None,
            atol: 1e-2,
        }
    }

    #[test]
    fn test_process_calculation() {
        let dir = std::env::temp_dir().join(format!("mpbsym-collect-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let stem = dir.join("dim2-sg2-1");
        fs::write(calcname::dispersion_path(&stem), DISPERSION).unwrap();
        fs::write(calcname::symeigs_path(&stem), SYMEIGS).unwrap();
        fs::write(dir.join("dim2-sg2-2-dispersion.out"), DISPERSION).unwrap();

        let tables = PlaneGroupTables::new();
        match process_calculation(&calcname::dispersion_path(&stem), &tables, &opts(1), true) {
            ProcessResult::Success(name, records) => {
                assert_eq!(name, "dim2-sg2-1");
                // Γ 与 B 点各 2 个表示
                assert_eq!(records.len(), 4);
                assert_eq!(records[0].klabel, "Γ");
                assert_eq!(records[0].multiplicity, 1);
                assert_eq!(records[2].klabel, "B");
                assert_eq!(records[3].multiplicity, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert!(matches!(
            process_calculation(&dir.join("dim2-sg2-2-dispersion.out"), &tables, &opts(1), true),
            ProcessResult::Skipped(..)
        ));
        assert!(matches!(
            process_calculation(&calcname::dispersion_path(&stem), &tables, &opts(5), true),
            ProcessResult::Failed(..)
        ));

        fs::remove_dir_all(&dir).ok();
    }
}
