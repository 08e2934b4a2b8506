//! # irreps 命令实现
//!
//! 打印平面群各高对称 k 点的小群操作与特征标表。
//!
//! ## 依赖关系
//! - 使用 `cli/irreps.rs` 定义的参数
//! - 使用 `lgirreps/`
//! - 使用 `utils/output.rs`

use crate::cli::irreps::IrrepsArgs;
use crate::error::Result;
use crate::lgirreps::plane_groups::plane_group;
use crate::lgirreps::{IrrepProvider, LittleGroup, PlaneGroupTables};
use crate::utils::output;

use num::complex::Complex64;
use tabled::builder::Builder;

/// 执行 irreps 命令
pub fn execute(args: IrrepsArgs) -> Result<()> {
    let tables = PlaneGroupTables::new();
    let groups = tables.little_groups_with_tr(args.sgnum, args.dim, !args.no_time_reversal)?;

    let title = match plane_group(args.sgnum) {
        Some(pg) if args.dim == 2 => format!("Plane group {} ({})", pg.number, pg.symbol),
        _ => format!("Space group {} ({}D)", args.sgnum, args.dim),
    };
    output::print_header(&title);

    for lg in &groups {
        print_character_table(lg);
        println!();
    }

    output::print_done(&format!(
        "{} k-points, {} irreps{}",
        groups.len(),
        groups.iter().map(|g| g.irreps.len()).sum::<usize>(),
        if args.no_time_reversal {
            ""
        } else {
            " (time-reversal paired)"
        }
    ));

    Ok(())
}

/// 打印单个小群的特征标表
fn print_character_table(lg: &LittleGroup) {
    output::print_info(&format!(
        "{} = {}, order {}",
        lg.klabel,
        lg.kv,
        lg.order()
    ));

    let mut builder = Builder::default();
    let mut header = vec!["Irrep".to_string(), "dim".to_string(), "TR".to_string()];
    header.extend(lg.operations.iter().map(|op| op.to_string()));
    builder.push_record(header);

    for ir in &lg.irreps {
        let tr = if ir.realified {
            "merged"
        } else if !ir.is_real(1e-9) {
            "complex"
        } else {
            ""
        };
        let mut row = vec![ir.label.clone(), ir.dim.to_string(), tr.to_string()];
        row.extend(ir.characters.iter().map(|c| format_character(*c)));
        builder.push_record(row);
    }

    println!("{}", builder.build());
}

/// 特征标的紧凑表示
fn format_character(c: Complex64) -> String {
    const ATOL: f64 = 1e-9;
    let fmt = |x: f64| {
        if (x - x.round()).abs() < ATOL {
            format!("{}", x.round() as i64)
        } else {
            format!("{:.3}", x)
        }
    };

    if c.im.abs() < ATOL {
        fmt(c.re)
    } else if c.re.abs() < ATOL {
        format!("{}i", fmt(c.im))
    } else {
        let sign = if c.im < 0.0 { '-' } else { '+' };
        format!("{}{}{}i", fmt(c.re), sign, fmt(c.im.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_character() {
        assert_eq!(format_character(Complex64::new(2.0, 0.0)), "2");
        assert_eq!(format_character(Complex64::new(-1.0, 1e-12)), "-1");
        assert_eq!(format_character(Complex64::new(0.0, -1.0)), "-1i");
        assert_eq!(format_character(Complex64::new(-0.5, 0.866_025_403_784)), "-0.500+0.866i");
    }
}
