//! # 数据模型模块
//!
//! 定义对称操作、k 向量、MPB 计算结果等数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `lgirreps/`, `symvec/` 和 `commands/` 使用
//! - 子模块: symop, kvec, calculation, symdata

pub mod calculation;
pub mod kvec;
pub mod symdata;
pub mod symop;

pub use calculation::{CalcMeta, Dispersion, MpbCalculation, Polarization, SymEigRow};
pub use kvec::KVec;
pub use symdata::{assemble_symdata, KPointSymData};
pub use symop::SymOperation;
