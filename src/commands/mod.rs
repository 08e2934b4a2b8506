//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `symvec/`, `utils/`
//! - 子模块: analyze, irreps, collect

pub mod analyze;
pub mod collect;
pub mod irreps;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Analyze(args) => analyze::execute(args),
        Commands::Irreps(args) => irreps::execute(args),
        Commands::Collect(args) => collect::execute(args),
    }
}
