//! # analyze 子命令 CLI 定义
//!
//! 单次计算分析入口，包含两个子命令：
//! - `symvec`: 能带窗口的对称向量
//! - `bands`: 逐简并簇的不可约表示指认
//!
//! `<CALC>` 为不带后缀的计算路径，如 `runs/dim2-sg11-1-res32-tm`，
//! 也可直接给出 `-dispersion.out` 或 `-symeigs.out` 文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/analyze/` 相应模块

use clap::{Args, Subcommand};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// Analyze 主命令
// ─────────────────────────────────────────────────────────────

/// analyze 主命令参数
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(subcommand)]
    pub command: AnalyzeCommands,
}

/// analyze 子命令
#[derive(Subcommand, Debug)]
pub enum AnalyzeCommands {
    /// Symmetry vector of the lowest bands (or a band range)
    Symvec(SymvecArgs),

    /// Irrep labels of every degenerate band cluster at each k-point
    Bands(BandsArgs),
}

// ─────────────────────────────────────────────────────────────
// symvec 子命令
// ─────────────────────────────────────────────────────────────

/// symvec 子命令参数
#[derive(Args, Debug)]
pub struct SymvecArgs {
    /// Calculation path without suffix (or one of its output files)
    pub calc: PathBuf,

    /// Number of lowest bands in the band window
    #[arg(short = 'n', long, default_value_t = 1)]
    pub bands: usize,

    /// Band range instead of the lowest bands (1-based, inclusive, e.g. '3-4')
    #[arg(long, conflicts_with = "bands")]
    pub band_range: Option<String>,

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

    /// Write the symmetry vector to a CSV file
    #[arg(long)]
    pub output_csv: Option<PathBuf>,
}

// ─────────────────────────────────────────────────────────────
// bands 子命令
// ─────────────────────────────────────────────────────────────

/// bands 子命令参数
#[derive(Args, Debug)]
pub struct BandsArgs {
    /// Calculation path without suffix (or one of its output files)
    pub calc: PathBuf,

    /// Frequency difference below which neighbouring bands are degenerate
    #[arg(long, env = "MPBSYM_DEGEN_TOL", default_value_t = 1e-4)]
    pub degen_tol: f64,

    /// Maximum number of extra clusters merged into a fractional group
    #[arg(long, default_value_t = 2)]
    pub max_widen: usize,

    /// Tolerance for rounding multiplicities to integers
    #[arg(long, env = "MPBSYM_ATOL", default_value_t = 1e-2)]
    pub atol: f64,

    /// Keep complex irreps separate instead of pairing them under time reversal
    #[arg(long, default_value_t = false)]
    pub no_time_reversal: bool,

    /// Write the band groups to a CSV file
    #[arg(long)]
    pub output_csv: Option<PathBuf>,

    /// Draw the band diagram (PNG, or SVG for a .svg path)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Title for the plot (default: calculation name)
    #[arg(long)]
    pub title: Option<String>,
}
