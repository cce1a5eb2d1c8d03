//! Radar chart of actual vs ideal soil values, rendered as inline SVG.
//!
//! Values are already on a 0-100 scale. Anything above 100 is drawn on the
//! outer ring so one outlier cannot shrink the rest of the chart.

use crate::crops::ComparisonChart;

const LABEL_MARGIN: f64 = 70.0;
const RINGS: [f64; 4] = [25.0, 50.0, 75.0, 100.0];
const ACTUAL_COLOR: &str = "#2e7d32";
const IDEAL_COLOR: &str = "#0066cc";

struct Geometry {
    cx: f64,
    cy: f64,
    radius: f64,
    axes: usize,
}

impl Geometry {
    /// Point for `value` (0-100) on axis `i`, first axis pointing up.
    fn point(&self, i: usize, value: f64) -> (f64, f64) {
        let angle = -std::f64::consts::FRAC_PI_2
            + i as f64 * 2.0 * std::f64::consts::PI / self.axes as f64;
        let r = self.radius * value.clamp(0.0, 100.0) / 100.0;
        (self.cx + r * angle.cos(), self.cy + r * angle.sin())
    }

    fn polygon(&self, values: impl Iterator<Item = f64>) -> String {
        values
            .enumerate()
            .map(|(i, v)| {
                let (x, y) = self.point(i, v);
                format!("{:.1},{:.1}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl ComparisonChart {
    /// Square SVG document `size` pixels wide.
    pub fn to_svg(&self, size: u32) -> String {
        let size_f = size as f64;
        let geo = Geometry {
            cx: size_f / 2.0,
            cy: size_f / 2.0,
            radius: (size_f / 2.0 - LABEL_MARGIN).max(10.0),
            axes: self.points.len().max(1),
        };
        let crop = escape(&self.crop);

        let mut parts = vec![format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {s} {s}" width="{s}" height="{s}" role="img" aria-label="Soil vs ideal conditions for {crop}">"#,
            s = size,
            crop = crop
        )];

        if self.points.len() >= 3 {
            for ring in RINGS {
                let outline = geo.polygon(std::iter::repeat(ring).take(self.points.len()));
                parts.push(format!(
                    r##"<polygon points="{}" fill="none" stroke="#d0d0d0"/>"##,
                    outline
                ));
            }

            for (i, p) in self.points.iter().enumerate() {
                parts.push(axis_with_label(&geo, i, p.metric));
            }

            let ideal = geo.polygon(self.points.iter().map(|p| p.ideal));
            let actual = geo.polygon(self.points.iter().map(|p| p.actual));
            parts.push(format!(
                r#"<polygon points="{}" fill="{c}" fill-opacity="0.2" stroke="{c}" stroke-width="2" stroke-dasharray="4 3"/>"#,
                ideal,
                c = IDEAL_COLOR
            ));
            parts.push(format!(
                r#"<polygon points="{}" fill="{c}" fill-opacity="0.35" stroke="{c}" stroke-width="2"/>"#,
                actual,
                c = ACTUAL_COLOR
            ));
        }

        let ly = size_f - 16.0;
        parts.push(legend_entry(10.0, ly, ACTUAL_COLOR, "Your soil"));
        parts.push(legend_entry(110.0, ly, IDEAL_COLOR, &format!("Ideal for {}", crop)));
        parts.push("</svg>".to_string());

        parts.concat()
    }
}

/// Spoke from the centre to the outer ring, with its metric label.
fn axis_with_label(geo: &Geometry, i: usize, metric: &str) -> String {
    let (x, y) = geo.point(i, 100.0);
    let anchor = if (x - geo.cx).abs() < 1.0 {
        "middle"
    } else if x > geo.cx {
        "start"
    } else {
        "end"
    };
    let dx = (x - geo.cx).signum() * 6.0;
    let dy = if y < geo.cy { -6.0 } else { 14.0 };

    let line = format!(
        r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#d0d0d0"/>"##,
        geo.cx, geo.cy, x, y
    );
    let label = format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="{}">{}</text>"#,
        x + dx,
        y + dy,
        anchor,
        escape(metric)
    );
    line + &label
}

/// `text` must already be escaped.
fn legend_entry(x: f64, baseline: f64, color: &str, text: &str) -> String {
    format!(
        r#"<rect x="{:.0}" y="{:.1}" width="12" height="12" fill="{}"/><text x="{:.0}" y="{:.1}" font-size="12">{}</text>"#,
        x,
        baseline - 10.0,
        color,
        x + 18.0,
        baseline,
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crops::{comparison_chart, ChartPoint};
    use crate::soil::SoilSample;

    fn chart() -> ComparisonChart {
        let sample = SoilSample {
            ph: 6.2,
            organic_carbon: 1.8,
            nitrogen: 1.1,
            clay: 25.0,
            sand: 45.0,
            silt: 30.0,
        };
        comparison_chart(&sample, "Corn")
    }

    #[test]
    fn test_svg_structure() {
        let svg = chart().to_svg(400);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        // four rings plus ideal and actual
        assert_eq!(svg.matches("<polygon").count(), 6);
        assert_eq!(svg.matches("<line").count(), 6);
        assert!(svg.contains("Organic C (%)"));
        assert!(svg.contains("Ideal for Corn"));
    }

    #[test]
    fn test_out_of_scale_values_are_clamped() {
        let chart = ComparisonChart {
            crop: "Rice".to_string(),
            points: (0..6)
                .map(|i| ChartPoint {
                    metric: "m",
                    actual: if i == 0 { 500.0 } else { 10.0 },
                    ideal: 50.0,
                })
                .collect(),
        };
        let geo = Geometry { cx: 200.0, cy: 200.0, radius: 130.0, axes: 6 };
        assert_eq!(geo.point(0, 500.0), geo.point(0, 100.0));
        assert!(chart.to_svg(400).contains("</svg>"));
    }

    #[test]
    fn test_crop_name_is_escaped() {
        let mut c = chart();
        c.crop = "<b>&".to_string();
        let svg = c.to_svg(300);
        assert!(svg.contains("&lt;b&gt;&amp;"));
        assert!(!svg.contains("<b>"));
    }
}
