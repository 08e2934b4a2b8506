//! # irreps 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/irreps.rs`

use clap::Args;

/// irreps 子命令参数
#[derive(Args, Debug)]
pub struct IrrepsArgs {
    /// Plane group number (1-17)
    #[arg(long)]
    pub sgnum: u32,

    /// Dimension
    #[arg(long, default_value_t = 2)]
    pub dim: usize,

    /// Keep complex irreps separate instead of pairing them under time reversal
    #[arg(long, default_value_t = false)]
    pub no_time_reversal: bool,
}
