//! SVG scatter chart for flattened rows.
//!
//! Each series is drawn from its own column of a [`RowIndex`], sharing the
//! bitrate axis. Series are painted in ascending style layer, so uniform
//! lines end up beneath tuned ones whatever their position in the legend.
//! Supports light and dark mode via CSS media queries.

use std::fmt::Write as _;

use crate::metric;
use crate::rows::RowIndex;
use crate::series::{PointShape, SeriesDefinition};

/// Colors for series whose style leaves the color open.
pub const PALETTE: [&str; 6] = ["#3498db", "#e74c3c", "#27ae60", "#e67e22", "#9b59b6", "#16a085"];

/// Chart configuration.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Chart title.
    pub title: String,
    /// X-axis label.
    pub x_label: String,
    /// Y-axis label.
    pub y_label: String,
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: "datarate in kbps".to_string(),
            y_label: String::new(),
            width: 900,
            height: 600,
        }
    }
}

impl ChartConfig {
    /// Configuration with the y-axis labelled for `metric`.
    ///
    /// Unrecognized metrics are labelled with their raw name.
    #[must_use]
    pub fn for_metric(metric: &str) -> Self {
        Self {
            y_label: metric::units_for(metric).unwrap_or(metric).to_string(),
            ..Self::default()
        }
    }

    /// Sets the chart title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the chart dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Render `rows` (flattened from `series`) as an SVG document.
///
/// Returns an empty string when no series has a drawable point.
#[must_use]
pub fn render_svg(series: &[SeriesDefinition], rows: &RowIndex, config: &ChartConfig) -> String {
    let traces: Vec<(usize, Vec<(f64, f64)>)> = (0..series.len())
        .map(|i| (i, rows.points(i).collect::<Vec<_>>()))
        .filter(|(_, points)| !points.is_empty())
        .collect();
    if traces.is_empty() {
        return String::new();
    }

    let all_points = || traces.iter().flat_map(|(_, p)| p.iter().copied());
    let (min_x, max_x) = bounds_with_padding(all_points().map(|(x, _)| x), 0.05);
    let (min_y, max_y) = bounds_with_padding(all_points().map(|(_, y)| y), 0.05);

    let margin_top = 50;
    let margin_right = 180;
    let margin_bottom = 70;
    let margin_left = 90;
    let width = config.width.max(margin_left + margin_right + 1);
    let height = config.height.max(margin_top + margin_bottom + 1);
    let plot_width = width - margin_left - margin_right;
    let plot_height = height - margin_top - margin_bottom;

    let scale_x = |v: f64| -> f64 {
        f64::from(margin_left) + (v - min_x) / (max_x - min_x) * f64::from(plot_width)
    };
    let scale_y = |v: f64| -> f64 {
        f64::from(margin_top) + (1.0 - (v - min_y) / (max_y - min_y)) * f64::from(plot_height)
    };

    let mut svg = String::with_capacity(8192);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
        width, height
    );
    svg.push_str(
        r#"<style>
  :root { --bg-color: #ffffff; --text-color: #1a1a1a; --grid-color: #e0e0e0; --axis-color: #333333; }
  @media (prefers-color-scheme: dark) {
    :root { --bg-color: #1a1a1a; --text-color: #e0e0e0; --grid-color: #404040; --axis-color: #b0b0b0; }
  }
  .background { fill: var(--bg-color); }
  .title { font: bold 18px system-ui, sans-serif; fill: var(--text-color); }
  .axis-label { font: 13px system-ui, sans-serif; fill: var(--text-color); }
  .tick-label { font: 11px system-ui, sans-serif; fill: var(--text-color); }
  .legend { font: 13px system-ui, sans-serif; fill: var(--text-color); }
  .grid { stroke: var(--grid-color); stroke-width: 1; }
  .axis { stroke: var(--axis-color); stroke-width: 1.5; }
</style>
"#,
    );
    let _ = writeln!(
        svg,
        r#"<rect class="background" width="{}" height="{}"/>"#,
        width, height
    );
    if !config.title.is_empty() {
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="30" text-anchor="middle" class="title">{}</text>"#,
            f64::from(width) / 2.0,
            escape(&config.title)
        );
    }

    // Grid and tick labels
    for i in 0..=5 {
        let frac = f64::from(i) / 5.0;
        let x_val = min_x + frac * (max_x - min_x);
        let y_val = min_y + frac * (max_y - min_y);
        let x = scale_x(x_val);
        let y = scale_y(y_val);
        let _ = writeln!(
            svg,
            r#"<line x1="{x:.2}" y1="{margin_top}" x2="{x:.2}" y2="{}" class="grid"/>"#,
            height - margin_bottom
        );
        let _ = writeln!(
            svg,
            r#"<line x1="{margin_left}" y1="{y:.2}" x2="{}" y2="{y:.2}" class="grid"/>"#,
            width - margin_right
        );
        let _ = writeln!(
            svg,
            r#"<text x="{x:.2}" y="{}" text-anchor="middle" class="tick-label">{x_val:.0}</text>"#,
            height - margin_bottom + 20
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{:.2}" text-anchor="end" class="tick-label">{y_val:.2}</text>"#,
            margin_left - 10,
            y + 4.0
        );
    }

    // Axes
    let _ = writeln!(
        svg,
        r#"<line x1="{margin_left}" y1="{0}" x2="{1}" y2="{0}" class="axis"/>"#,
        height - margin_bottom,
        width - margin_right
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{margin_left}" y1="{margin_top}" x2="{margin_left}" y2="{}" class="axis"/>"#,
        height - margin_bottom
    );
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle" class="axis-label">{}</text>"#,
        f64::from(width) / 2.0,
        height - 20,
        escape(&config.x_label)
    );
    let _ = writeln!(
        svg,
        r#"<text x="25" y="{0}" text-anchor="middle" class="axis-label" transform="rotate(-90 25 {0})">{1}</text>"#,
        f64::from(height) / 2.0,
        escape(&config.y_label)
    );

    // Traces, bottom layer first
    let mut order: Vec<usize> = (0..traces.len()).collect();
    order.sort_by_key(|&t| series[traces[t].0].style.layer);
    for t in order {
        let (index, points) = &traces[t];
        let style = &series[*index].style;
        let color = series_color(series, *index);

        let mut path = String::new();
        for (i, &(x, y)) in points.iter().enumerate() {
            let prefix = if i == 0 { "M" } else { " L" };
            let _ = write!(path, "{} {:.2},{:.2}", prefix, scale_x(x), scale_y(y));
        }
        let dash = if style.is_dashed() {
            let pattern: Vec<String> = style.dash.iter().map(u32::to_string).collect();
            format!(r#" stroke-dasharray="{}""#, pattern.join(","))
        } else {
            String::new()
        };
        let _ = writeln!(
            svg,
            r#"<path d="{path}" stroke="{color}" stroke-width="1"{dash} fill="none"/>"#
        );
        for &(x, y) in points {
            marker(&mut svg, style.point_shape, scale_x(x), scale_y(y), 4.0, color);
        }
    }

    // Legend, in series order
    let legend_x = width - margin_right + 15;
    let legend_y = margin_top + 20;
    for (i, (index, _)) in traces.iter().enumerate() {
        let s = &series[*index];
        let y_offset = legend_y + i as u32 * 25;
        marker(
            &mut svg,
            s.style.point_shape,
            f64::from(legend_x + 10),
            f64::from(y_offset + 5),
            5.0,
            series_color(series, *index),
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" class="legend">{}</text>"#,
            legend_x + 24,
            y_offset + 9,
            escape(&s.title)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn series_color(series: &[SeriesDefinition], index: usize) -> &str {
    series[index]
        .style
        .color
        .as_deref()
        .unwrap_or(PALETTE[index % PALETTE.len()])
}

fn marker(svg: &mut String, shape: PointShape, x: f64, y: f64, r: f64, color: &str) {
    match shape {
        PointShape::Circle => {
            let _ = writeln!(svg, r#"<circle cx="{x:.2}" cy="{y:.2}" r="{r}" fill="{color}"/>"#);
        }
        PointShape::Triangle => {
            let _ = writeln!(
                svg,
                r#"<polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="{color}"/>"#,
                x,
                y - r,
                x - r,
                y + r,
                x + r,
                y + r
            );
        }
    }
}

/// Calculates min/max bounds with padding; a zero range is widened by one.
fn bounds_with_padding(values: impl Iterator<Item = f64>, padding: f64) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let range = max - min;
    if range > 0.0 {
        (min - range * padding, max + range * padding)
    } else {
        (min - 1.0, max + 1.0)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DetailRecord, EncodingResult};
    use crate::series::SeriesStyle;

    fn line(title: &str, style: SeriesStyle, points: &[(f64, f64)]) -> SeriesDefinition {
        let records = points
            .iter()
            .map(|&(b, p)| DetailRecord::new("c", EncodingResult::new(b).with_metric("psnr", p)))
            .collect();
        SeriesDefinition::new(title, records, style)
    }

    #[test]
    fn test_render_basic() {
        let series = vec![
            line("vp9 tuned", SeriesStyle::tuned("blue"), &[(100.0, 30.0), (200.0, 34.0)]),
            line("vp9 uniform", SeriesStyle::uniform("blue"), &[(120.0, 29.0)]),
        ];
        let rows = RowIndex::flatten(&series, "psnr");
        let svg = render_svg(&series, &rows, &ChartConfig::for_metric("psnr").with_title("a.y4m"));

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains("a.y4m"));
        assert!(svg.contains("datarate in kbps"));
        assert!(svg.contains("Quality in decibels PSNR"));
        assert!(svg.contains(r#"stroke-dasharray="5,10""#));
        assert!(svg.contains("<polygon"));
        // Uniform (layer 0) is painted before the tuned line.
        let uniform = svg.find(r#"fill="none"/>"#).unwrap();
        let dashed = svg.find("stroke-dasharray").unwrap();
        assert!(uniform < dashed);
    }

    #[test]
    fn test_render_nothing_drawable() {
        let series = vec![line("x264", SeriesStyle::solid("red"), &[(100.0, 30.0)])];
        let rows = RowIndex::flatten(&series, "cpu_unused");
        assert!(render_svg(&series, &rows, &ChartConfig::default()).is_empty());
        assert!(render_svg(&[], &RowIndex::default(), &ChartConfig::default()).is_empty());
    }

    #[test]
    fn test_titles_escaped() {
        let series = vec![line("a&b<c>", SeriesStyle::default(), &[(1.0, 2.0)])];
        let rows = RowIndex::flatten(&series, "psnr");
        let svg = render_svg(&series, &rows, &ChartConfig::for_metric("psnr"));
        assert!(svg.contains("a&amp;b&lt;c&gt;"));
        assert!(svg.contains(PALETTE[0]));
    }
}
