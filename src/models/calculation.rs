//! # MPB 计算数据模型
//!
//! 存储从计算名称和 MPB 输出文件中提取的信息。
//!
//! ## 依赖关系
//! - 被 `parsers/` 填充
//! - 被 `models/symdata.rs` 和 `commands/` 使用

use crate::models::{KVec, SymOperation};

use num::complex::Complex64;

/// 二维光子晶体的偏振
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarization {
    Te,
    Tm,
}

impl std::fmt::Display for Polarization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarization::Te => write!(f, "TE"),
            Polarization::Tm => write!(f, "TM"),
        }
    }
}

/// 计算名称中的元数据
#[derive(Debug, Clone, PartialEq)]
pub struct CalcMeta {
    /// 计算名称（不含目录和后缀）
    pub name: String,

    /// 维度
    pub dim: usize,

    /// 空间群（平面群）编号
    pub sgnum: u32,

    /// 运行编号
    pub id: Option<u32>,

    /// 网格分辨率
    pub resolution: Option<u32>,

    /// 偏振（仅二维）
    pub polarization: Option<Polarization>,
}

impl CalcMeta {
    pub fn new(name: impl Into<String>, dim: usize, sgnum: u32) -> Self {
        CalcMeta {
            name: name.into(),
            dim,
            sgnum,
            id: None,
            resolution: None,
            polarization: None,
        }
    }
}

/// 色散数据：每个 k 点的频率
#[derive(Debug, Clone, Default)]
pub struct Dispersion {
    /// (k 编号, k 向量)，按文件顺序
    pub kpoints: Vec<(usize, KVec)>,

    /// 频率 [k][band]
    pub freqs: Vec<Vec<f64>>,
}

impl Dispersion {
    /// 能带数
    pub fn num_bands(&self) -> usize {
        self.freqs.first().map(|f| f.len()).unwrap_or(0)
    }

    /// 按 k 编号查找行号
    pub fn position(&self, k_index: usize) -> Option<usize> {
        self.kpoints.iter().position(|(i, _)| *i == k_index)
    }
}

/// 对称本征值文件中的一行
#[derive(Debug, Clone)]
pub struct SymEigRow {
    /// k 编号（与色散文件对应）
    pub k_index: usize,

    /// 对称操作
    pub operation: SymOperation,

    /// 每条能带的对称本征值
    pub eigenvalues: Vec<Complex64>,
}

/// 一次 MPB 计算的全部解析结果
#[derive(Debug, Clone)]
pub struct MpbCalculation {
    /// 计算元数据
    pub meta: CalcMeta,

    /// 完整色散（含未计算对称性的 k 点）
    pub dispersion: Dispersion,

    /// 计算了对称本征值的 k 点
    pub symdata: Vec<crate::models::KPointSymData>,
}
