//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `analyze`: 分析单次计算（嵌套子命令）
//!   - `symvec`: 能带窗口的对称向量
//!   - `bands`: 逐简并簇的不可约表示指认
//! - `irreps`: 打印平面群的小群特征标表
//! - `collect`: 批量计算目录下所有计算的对称向量
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: analyze, irreps, collect

pub mod analyze;
pub mod collect;
pub mod irreps;

use clap::{Parser, Subcommand};

/// mpbsym - MPB 光子能带对称性分析
#[derive(Parser)]
#[command(name = "mpbsym")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Symmetry-vector analysis of MPB photonic band structures", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze the symmetry eigenvalues of one MPB calculation
    Analyze(analyze::AnalyzeArgs),

    /// Print little groups and irrep character tables of a plane group
    Irreps(irreps::IrrepsArgs),

    /// Compute symmetry vectors for every calculation in a directory
    Collect(collect::CollectArgs),
}
