//! # 对称操作一致性校验
//!
//! 核对 MPB 输出中每个 k 点的操作列表与小群操作列表是否一致，
//! 并给出把 MPB 顺序映射到小群顺序的索引。
//!
//! ## 依赖关系
//! - 被 `symvec/mod.rs` 调用
//! - 使用 `lgirreps/`, `models/symdata.rs`

use crate::error::{MpbSymError, Result};
use crate::lgirreps::LittleGroup;
use crate::models::KPointSymData;

/// 操作平移部分比较容差
const OP_ATOL: f64 = 1e-6;

/// 返回 `order`，使 `lg.operations[i]` 对应 `data.operations[order[i]]`
pub fn align_operations(lg: &LittleGroup, data: &KPointSymData) -> Result<Vec<usize>> {
    let mismatch = |reason: String| MpbSymError::OperatorMismatch {
        klabel: lg.klabel.clone(),
        reason,
    };

    if lg.operations.len() != data.operations.len() {
        return Err(mismatch(format!(
            "little group has {} operations, MPB output has {}",
            lg.operations.len(),
            data.operations.len()
        )));
    }

    let mut order = Vec::with_capacity(lg.operations.len());
    for op in &lg.operations {
        let idx = data
            .operations
            .iter()
            .position(|o| o.is_equivalent(op, OP_ATOL))
            .ok_or_else(|| mismatch(format!("operation '{}' missing from MPB output", op)))?;
        if order.contains(&idx) {
            return Err(mismatch(format!("operation '{}' matched twice", op)));
        }
        order.push(idx);
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::lgirreps::{IrrepProvider, PlaneGroupTables};
    use crate::models::{KVec, SymOperation};

    fn kdata(ops: &[&str]) -> KPointSymData {
        KPointSymData {
            k_index: 1,
            kv: KVec::new(&[0.5, 0.0]),
            operations: ops
                .iter()
                .map(|s| SymOperation::from_xyzt(s).unwrap())
                .collect(),
            freqs: vec![],
            symeigs: vec![],
        }
    }

    fn square_x() -> LittleGroup {
        let lgs = PlaneGroupTables::new().little_groups(11, 2).unwrap();
        lgs.into_iter().find(|lg| lg.klabel == "X").unwrap()
    }

    #[test]
    fn test_align_reordered_operations() {
        let lg = square_x();
        let ops: Vec<String> = lg.operations.iter().map(|o| o.to_string()).collect();
        assert_eq!(ops, vec!["x,y", "-x,-y", "-x,y", "x,-y"]);

        let data = kdata(&["x,-y", "x,y", "-x,y", "-x,-y"]);
        assert_eq!(align_operations(&lg, &data).unwrap(), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_align_rejects_missing_operation() {
        let lg = square_x();
        let data = kdata(&["x,y", "-x,-y", "-x,y", "y,x"]);
        assert!(matches!(
            align_operations(&lg, &data),
            Err(MpbSymError::OperatorMismatch { .. })
        ));
    }

    #[test]
    fn test_align_rejects_count_mismatch() {
        let lg = square_x();
        let data = kdata(&["x,y", "-x,-y"]);
        assert!(align_operations(&lg, &data).is_err());
    }
}
