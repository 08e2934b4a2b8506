//! # 能带图生成
//!
//! 使用 `plotters` 绘制色散曲线，并在高对称 k 点标注不可约表示。
//!
//! ## 功能
//! - 横轴为色散文件中的 k 点序号，纵轴为频率 (c/a)
//! - 高对称 k 点画竖线并标注 k 标签
//! - 可选在每个简并簇旁标注指认结果
//! - 支持 PNG 和 SVG 输出（按扩展名选择）
//!
//! ## 依赖关系
//! - 被 `commands/analyze/bands.rs` 调用
//! - 使用 `models/calculation.rs` 的 Dispersion
//! - 使用 `symvec/degeneracy.rs` 的 BandIrreps

use crate::error::{MpbSymError, Result};
use crate::models::Dispersion;
use crate::symvec::degeneracy::BandIrreps;

use plotters::prelude::*;
use std::path::Path;

/// 图表选项
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,

    /// 是否标注不可约表示
    pub label_irreps: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions {
            title: String::new(),
            width: 900,
            height: 700,
            label_irreps: true,
        }
    }
}

/// 生成能带图，`.svg` 后缀输出 SVG，其余输出 PNG
pub fn generate_band_plot(
    dispersion: &Dispersion,
    irreps: &[BandIrreps],
    output_path: &Path,
    opts: &PlotOptions,
) -> Result<()> {
    if dispersion.kpoints.is_empty() {
        return Err(MpbSymError::InvalidArgument(
            "dispersion has no k-points to plot".to_string(),
        ));
    }

    let use_svg = output_path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if use_svg {
        let root = SVGBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_band_chart(&root, dispersion, irreps, opts)?;
        root.present()
            .map_err(|e| MpbSymError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_band_chart(&root, dispersion, irreps, opts)?;
        root.present()
            .map_err(|e| MpbSymError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 频率轴范围，上方留 10% 空白放标签
fn frequency_range(dispersion: &Dispersion) -> (f64, f64) {
    let max = dispersion
        .freqs
        .iter()
        .flatten()
        .copied()
        .fold(0.0_f64, f64::max);
    let top = if max > 0.0 { max * 1.1 } else { 1.0 };
    (0.0, top)
}

/// 绘制能带图的核心逻辑
fn draw_band_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    dispersion: &Dispersion,
    irreps: &[BandIrreps],
    opts: &PlotOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| MpbSymError::Other(format!("{:?}", e)))?;

    let n_k = dispersion.kpoints.len();
    let x_max = (n_k.max(2) - 1) as f64;
    let (y_min, y_max) = frequency_range(dispersion);

    let mut chart = ChartBuilder::on(root)
        .caption(&opts.title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .map_err(|e| MpbSymError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("k-point")
        .y_desc("Frequency (c/a)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| MpbSymError::Other(format!("{:?}", e)))?;

    // 高对称 k 点竖线与标签
    let mark_color = RGBColor(150, 150, 150);
    for kres in irreps {
        let Some(pos) = dispersion.position(kres.k_index) else {
            continue;
        };
        let x = pos as f64;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x, y_min), (x, y_max)],
                mark_color.stroke_width(1),
            )))
            .map_err(|e| MpbSymError::Other(format!("{:?}", e)))?;
        chart
            .draw_series(std::iter::once(Text::new(
                kres.klabel.clone(),
                (x, y_max * 0.98),
                ("sans-serif", 18).into_font().color(&BLACK),
            )))
            .map_err(|e| MpbSymError::Other(format!("{:?}", e)))?;
    }

    // 色散曲线
    let line_color = RGBColor(0, 102, 204);
    for band in 0..dispersion.num_bands() {
        chart
            .draw_series(LineSeries::new(
                dispersion
                    .freqs
                    .iter()
                    .enumerate()
                    .map(|(i, f)| (i as f64, f[band])),
                line_color.stroke_width(2),
            ))
            .map_err(|e| MpbSymError::Other(format!("{:?}", e)))?;
    }

    if opts.label_irreps {
        let text_style = ("sans-serif", 12).into_font().color(&RED);
        for kres in irreps {
            let Some(pos) = dispersion.position(kres.k_index) else {
                continue;
            };
            for group in &kres.groups {
                chart
                    .draw_series(std::iter::once(Text::new(
                        group.label.clone(),
                        (pos as f64 + 0.2, group.frequency),
                        text_style.clone(),
                    )))
                    .map_err(|e| MpbSymError::Other(format!("{:?}", e)))?;
            }
        }
    }

    Ok(())
}
