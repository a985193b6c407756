use std::fs;
use std::path::Path;

use plotters::prelude::*;

use crate::report::{ChartSpec, ReportError, Series};

const LINE_WIDTH: u32 = 2;

/// Writes `series` as an SVG line chart. Legend entries follow slice order.
/// On a log-scaled y axis non-positive values are dropped.
pub fn render_chart(path: &Path, spec: &ChartSpec, series: &[Series]) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let render_err = |err: &dyn std::fmt::Display| ReportError::Render {
        path: path.to_path_buf(),
        message: err.to_string(),
    };

    let y_range = if spec.log_y {
        log_range(&spec.y_range)
    } else {
        spec.y_range.clone()
    };

    let root = SVGBackend::new(path, spec.size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render_err(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(spec.x_range.clone(), y_range)
        .map_err(|e| render_err(&e))?;

    let log_y = spec.log_y;
    let y_formatter = |v: &f64| {
        if log_y {
            format!("{:.1e}", 10f64.powf(*v))
        } else {
            format!("{v:.2}")
        }
    };
    chart
        .configure_mesh()
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .y_label_formatter(&y_formatter)
        .draw()
        .map_err(|e| render_err(&e))?;

    for (idx, s) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let points: Vec<(f64, f64)> = if log_y {
            s.points
                .iter()
                .filter(|(_, y)| *y > 0.0)
                .map(|&(x, y)| (x, y.log10()))
                .collect()
        } else {
            s.points.clone()
        };
        if points.is_empty() {
            tracing::warn!(series = %s.label, "nothing to draw");
        }
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(LINE_WIDTH)))
            .map_err(|e| render_err(&e))?
            .label(s.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| render_err(&e))?;
    root.present().map_err(|e| render_err(&e))?;

    tracing::info!(path = %path.display(), series = series.len(), "wrote chart");
    Ok(())
}

fn log_range(range: &std::ops::Range<f64>) -> std::ops::Range<f64> {
    let lo = if range.start > 0.0 { range.start } else { 1e-3 };
    let hi = if range.end > lo { range.end } else { lo * 10.0 };
    lo.log10()..hi.log10()
}
