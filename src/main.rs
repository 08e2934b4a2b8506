//! # mpbsym - MPB 光子能带对称性分析工具
//!
//! 读取 MPB 输出的色散与对称本征值，结合小群不可约表示计算对称向量，
//! 用于光子晶体能带拓扑的判定。
//!
//! ## 子命令
//! - `analyze` - 分析单次计算
//!   - `symvec` - 能带窗口的对称向量
//!   - `bands`  - 逐简并簇的不可约表示指认
//! - `irreps`  - 打印平面群的小群特征标表
//! - `collect` - 批量计算目录下所有计算的对称向量
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (MPB 输出与计算名称解析)
//!   │     ├── lgirreps/  (小群不可约表示)
//!   │     ├── symvec/    (投影与对称向量)
//!   │     ├── batch/     (批量并行处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod lgirreps;
mod models;
mod parsers;
mod symvec;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
