//! # bands 子命令实现
//!
//! 在每个高对称 k 点按简并簇指认不可约表示，可选导出 CSV 和能带图。
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 的 BandsArgs
//! - 使用 `symvec/degeneracy.rs`, `symvec/export.rs`, `symvec/plot.rs`
//! - 使用 `utils/output.rs`

use super::load_analysis;
use crate::cli::analyze::BandsArgs;
use crate::error::Result;
use crate::symvec::degeneracy::{band_irreps, BandIrreps};
use crate::symvec::export;
use crate::symvec::plot::{self, PlotOptions};
use crate::utils::output;

/// 执行 bands 子命令
pub fn execute(args: BandsArgs) -> Result<()> {
    output::print_header("Band Irreps");

    let (calc, analysis) = load_analysis(&args.calc, !args.no_time_reversal)?;

    let results: Vec<BandIrreps> = analysis
        .kpoints
        .iter()
        .map(|kp| band_irreps(kp, args.degen_tol, args.max_widen, args.atol))
        .collect();

    print_band_table(&results);

    let unresolved: usize = results
        .iter()
        .flat_map(|r| &r.groups)
        .filter(|g| g.multiplicities.is_none())
        .count();
    if unresolved > 0 {
        output::print_warning(&format!(
            "{} band group(s) have fractional multiplicities (try a larger --max-widen or --degen-tol)",
            unresolved
        ));
    }

    if let Some(path) = &args.output_csv {
        export::band_irreps_to_csv(&analysis.meta.name, &results, path)?;
        output::print_done(&format!("Band irreps written to '{}'", path.display()));
    }

    if let Some(path) = &args.plot {
        let opts = PlotOptions {
            title: args.title.clone().unwrap_or_else(|| analysis.meta.name.clone()),
            ..PlotOptions::default()
        };
        plot::generate_band_plot(&calc.dispersion, &results, path, &opts)?;
        output::print_done(&format!("Band diagram saved to '{}'", path.display()));
    }

    Ok(())
}

/// 打印逐簇指认表格
fn print_band_table(results: &[BandIrreps]) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct GroupRow {
        #[tabled(rename = "k")]
        klabel: String,
        #[tabled(rename = "Bands")]
        bands: String,
        #[tabled(rename = "Frequency")]
        frequency: String,
        #[tabled(rename = "Irreps")]
        irreps: String,
        #[tabled(rename = "Raw")]
        raw: String,
    }

    let rows: Vec<GroupRow> = results
        .iter()
        .flat_map(|r| {
            r.groups.iter().map(move |g| GroupRow {
                klabel: r.klabel.clone(),
                bands: if g.bands.len() == 1 {
                    format!("{}", g.bands.start + 1)
                } else {
                    format!("{}-{}", g.bands.start + 1, g.bands.end)
                },
                frequency: format!("{:.5}", g.frequency),
                irreps: if g.widened {
                    format!("{} *", g.label)
                } else {
                    g.label.clone()
                },
                raw: if g.multiplicities.is_some() {
                    String::new()
                } else {
                    g.raw
                        .iter()
                        .map(|v| format!("{:.2}", v))
                        .collect::<Vec<_>>()
                        .join(" ")
                },
            })
        })
        .collect();

    println!("{}", Table::new(rows));
    output::print_info("'*' marks groups merged across a missed degeneracy");
}
