//! Probability histogram: binning, SVG rendering and storage under the
//! plot directory.

use chrono::{DateTime, TimeZone};
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::HistogramBin;

pub const DEFAULT_BINS: usize = 20;
const BAR_COLOR: RGBColor = RGBColor(0x33, 0x66, 0xcc);

static PLOT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Counts probabilities into `bins` equal-width bins over [0, 100]. The last
/// bin is closed so 100 lands in it; out-of-range values are clamped.
pub fn histogram(probabilities: &[f64], bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let width = 100.0 / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: i as f64 * width,
            end: (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for p in probabilities.iter().filter(|p| p.is_finite()) {
        let v = p.clamp(0.0, 100.0);
        let idx = ((v / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Draws the histogram as an SVG document.
pub fn render_histogram_svg(bins: &[HistogramBin]) -> Result<String, Box<dyn Error>> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (800, 480)).into_drawing_area();
        root.fill(&WHITE)?;

        let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;
        let mut chart = ChartBuilder::on(&root)
            .caption("Distribution of Admission Probabilities", ("sans-serif", 24.0))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0..100.0, 0.0..(y_max * 1.1))?;

        chart
            .configure_mesh()
            .x_desc("Admission Probability (%)")
            .y_desc("Number of Colleges")
            .x_label_formatter(&|v| format!("{:.0}", v))
            .y_label_formatter(&|v| format!("{:.0}", v))
            .draw()?;

        chart.draw_series(bins.iter().filter(|b| b.count > 0).map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BAR_COLOR.filled())
        }))?;

        root.present()?;
    }
    Ok(svg)
}

/// Writes `svg` as `plot_<timestamp>_<seq>.svg` in `dir` and returns the
/// file name. The sequence number keeps requests within the same second
/// from overwriting each other's chart.
pub fn write_plot<Tz: TimeZone>(dir: &Path, svg: &str, now: &DateTime<Tz>) -> Result<String, Box<dyn Error>>
where
    Tz::Offset: std::fmt::Display,
{
    std::fs::create_dir_all(dir)?;
    let seq = PLOT_SEQ.fetch_add(1, Ordering::Relaxed);
    let name = format!("plot_{}_{}.svg", now.format("%Y%m%d_%H%M%S"), seq);
    std::fs::write(dir.join(&name), svg)?;
    Ok(name)
}

/// URL the page loads a plot from. Plot directories inside the static
/// directory are reached through `/static`, any other through `/plots`.
pub fn plot_url(static_dir: &Path, plot_dir: &Path, name: &str) -> String {
    match plot_dir.strip_prefix(static_dir) {
        Ok(rel) => {
            let mut parts: Vec<String> = vec!["static".to_string()];
            parts.extend(rel.components().map(|c| c.as_os_str().to_string_lossy().into_owned()));
            parts.push(name.to_string());
            parts.join("/")
        }
        Err(_) => format!("plots/{}", name),
    }
}
