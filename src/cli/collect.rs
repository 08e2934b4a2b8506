//! # collect 子命令 CLI 定义
//!
//! 批量计算目录下所有 MPB 计算的对称向量并合并为一个 CSV
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/collect.rs`

use clap::Args;
use std::path::PathBuf;

/// collect 子命令参数
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Directory containing MPB output files
    pub dir: PathBuf,

    /// Glob pattern for dispersion files
    #[arg(long, default_value = "*-dispersion.out")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Number of lowest bands in the band window
    #[arg(short = 'n', long, default_value_t = 1)]
    pub bands: usize,

    /// Add bands to the window until every k-point has integer multiplicities
    #[arg(long, default_value_t = false)]
    pub widen: bool,

    /// Upper limit on the window end when widening
    #[arg(long)]
    pub max_bands: Option<usize>,

    /// Tolerance for rounding multiplicities to integers
    #[arg(long, env = "MPBSYM_ATOL", default_value_t = 1e-2)]
    pub atol: f64,

    /// Keep complex irreps separate instead of pairing them under time reversal
    #[arg(long, default_value_t = false)]
    pub no_time_reversal: bool,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Filename for the combined CSV
    #[arg(short, long, default_value = "symmetry_vectors.csv")]
    pub output: PathBuf,
}
