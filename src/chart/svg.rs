use html_escape::encode_text;

use super::RenderedChart;

/// Colours and font for the SVG output.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    pub background: String,
    pub grid: String,
    pub axis: String,
    pub text: String,
    pub text_secondary: String,
    pub line: String,
    pub marker: String,
    pub font_family: String,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            grid: "#e2e8f0".to_string(),
            axis: "#94a3b8".to_string(),
            text: "#1e293b".to_string(),
            text_secondary: "#64748b".to_string(),
            line: "#1f77b4".to_string(),
            marker: "#1f77b4".to_string(),
            font_family: "system-ui, -apple-system, sans-serif".to_string(),
        }
    }
}

impl RenderedChart {
    /// Standalone SVG document for the chart.
    pub fn to_svg(&self, theme: &ChartTheme) -> String {
        let layout = &self.layout;
        let width = layout.width;
        let height = layout.height;
        let left = layout.margin_left;
        let top = layout.margin_top;
        let right = left + layout.plot_width();
        let bottom = top + layout.plot_height();

        let mut svg = String::new();

        svg.push_str(&format!(
            r#"<svg viewBox="0 0 {width} {height}" width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg" role="img">"#
        ));
        svg.push_str(&format!(
            r#"<rect x="0" y="0" width="{width}" height="{height}" fill="{}"/>"#,
            theme.background
        ));

        // Title
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="16" fill="{}" font-family="{}">{}</text>"#,
            width / 2.0,
            top / 2.0 + 6.0,
            theme.text,
            theme.font_family,
            encode_text(&self.title)
        ));

        // Horizontal gridlines + severity labels
        for tick in &self.y_ticks {
            svg.push_str(&format!(
                r#"<line x1="{left:.1}" y1="{y:.1}" x2="{right:.1}" y2="{y:.1}" stroke="{}" stroke-width="1"/>"#,
                theme.grid,
                y = tick.position
            ));
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="11" fill="{}" font-family="{}">{}</text>"#,
                left - 8.0,
                tick.position + 4.0,
                theme.text_secondary,
                theme.font_family,
                encode_text(&tick.label)
            ));
        }

        // Axes
        svg.push_str(&format!(
            r#"<line x1="{left:.1}" y1="{bottom:.1}" x2="{right:.1}" y2="{bottom:.1}" stroke="{}" stroke-width="1.5"/>"#,
            theme.axis
        ));
        svg.push_str(&format!(
            r#"<line x1="{left:.1}" y1="{top:.1}" x2="{left:.1}" y2="{bottom:.1}" stroke="{}" stroke-width="1.5"/>"#,
            theme.axis
        ));

        // Date ticks, rotated 45°
        for tick in &self.x_ticks {
            let x = tick.position;
            let y = bottom + 14.0;
            svg.push_str(&format!(
                r#"<line x1="{x:.1}" y1="{bottom:.1}" x2="{x:.1}" y2="{:.1}" stroke="{}" stroke-width="1"/>"#,
                bottom + 4.0,
                theme.axis
            ));
            svg.push_str(&format!(
                r#"<text x="{x:.1}" y="{y:.1}" text-anchor="end" font-size="10" fill="{}" font-family="{}" transform="rotate(-45 {x:.1} {y:.1})">{}</text>"#,
                theme.text_secondary,
                theme.font_family,
                encode_text(&tick.label)
            ));
        }

        // Axis labels
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12" fill="{}" font-family="{}">{}</text>"#,
            (left + right) / 2.0,
            height - 10.0,
            theme.text,
            theme.font_family,
            encode_text(&self.x_label)
        ));
        let y_label_y = (top + bottom) / 2.0;
        svg.push_str(&format!(
            r#"<text x="16" y="{y_label_y:.1}" text-anchor="middle" font-size="12" fill="{}" font-family="{}" transform="rotate(-90 16 {y_label_y:.1})">{}</text>"#,
            theme.text,
            theme.font_family,
            encode_text(&self.y_label)
        ));

        // Series line
        svg.push_str(&format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            self.to_svg_path(),
            theme.line
        ));

        // Markers and annotations
        for point in &self.points {
            svg.push_str(&format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="4" fill="{}"/>"#,
                point.x, point.y, theme.marker
            ));
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="8" fill="{}" font-family="{}">{}</text>"#,
                point.label_x,
                point.label_y,
                theme.text,
                theme.font_family,
                encode_text(&point.label)
            ));
        }

        svg.push_str("</svg>");
        svg
    }
}
