//! # 统一错误处理模块
//!
//! 定义 mpbsym 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// mpbsym 统一错误类型
#[derive(Error, Debug)]
pub enum MpbSymError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Invalid calculation name '{name}': {reason}")]
    InvalidCalcName { name: String, reason: String },

    #[error("Invalid symmetry operation '{0}'")]
    InvalidOperation(String),

    #[error("Invalid complex number '{0}'")]
    InvalidComplex(String),

    #[error("Inconsistent MPB output for {calc}: {reason}")]
    InconsistentData { calc: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 群论错误
    // ─────────────────────────────────────────────────────────────
    #[error("No tabulated little-group irreps for space group {sgnum} in {dim}D")]
    UnsupportedSpaceGroup { sgnum: u32, dim: usize },

    #[error("Operator mismatch at k-point {klabel}: {reason}")]
    OperatorMismatch { klabel: String, reason: String },

    #[error("Fractional multiplicities at k-point {klabel} for bands {bands}: {values}")]
    FractionalMultiplicity {
        klabel: String,
        bands: String,
        values: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, MpbSymError>;
