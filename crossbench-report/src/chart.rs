//! Hand-assembled SVG charts.
//!
//! A horizontal mean-bar chart for `plot` and a five-number box/whisker
//! chart for `boxplot`. Failed implementations render as an "N/A" row so
//! the chart stays honest about partial results.

const MARGIN_LEFT: f64 = 180.0;
const MARGIN_TOP: f64 = 70.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 30.0;
const BAR_COLOR: &str = "#3b6fb6";
const BOX_COLOR: &str = "#6aa3d8";

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn header(width: u32, height: u32, title: &str, subtitle: &str) -> String {
    format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" ",
            "viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">\n",
            "<rect width=\"{w}\" height=\"{h}\" fill=\"white\"/>\n",
            "<text x=\"{cx}\" y=\"24\" text-anchor=\"middle\" font-size=\"18\">{title}</text>\n",
            "<text x=\"{cx}\" y=\"44\" text-anchor=\"middle\" font-size=\"12\" ",
            "fill=\"#555\">({subtitle})</text>\n",
        ),
        w = width,
        h = height,
        cx = width / 2,
        title = xml_escape(title),
        subtitle = xml_escape(subtitle),
    )
}

/// Render a horizontal mean-bar chart.
///
/// Entries are drawn top to bottom in the order given; `None` values
/// (failed implementations) render a label with "N/A" and no bar.
pub fn render_bar_chart(
    title: &str,
    subtitle: &str,
    entries: &[(String, Option<f64>)],
    width: u32,
    height: u32,
) -> String {
    let mut svg = header(width, height, title, subtitle);

    let plot_width = width as f64 - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = height as f64 - MARGIN_TOP - MARGIN_BOTTOM;
    let rows = entries.len().max(1) as f64;
    let row_height = plot_height / rows;
    let bar_height = (row_height * 0.6).min(40.0);

    let max_value = entries
        .iter()
        .filter_map(|(_, v)| *v)
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);

    for (index, (name, value)) in entries.iter().enumerate() {
        let row_top = MARGIN_TOP + index as f64 * row_height;
        let bar_y = row_top + (row_height - bar_height) / 2.0;
        let label_y = row_top + row_height / 2.0 + 4.0;

        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"13\">{}</text>\n",
            MARGIN_LEFT - 10.0,
            label_y,
            xml_escape(name),
        ));

        match value {
            Some(v) => {
                let bar_width = (v / max_value) * plot_width;
                svg.push_str(&format!(
                    "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>\n",
                    MARGIN_LEFT, bar_y, bar_width, bar_height, BAR_COLOR,
                ));
                svg.push_str(&format!(
                    "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\">{:.3} s</text>\n",
                    MARGIN_LEFT + bar_width + 6.0,
                    label_y,
                    v,
                ));
            }
            None => {
                svg.push_str(&format!(
                    "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" fill=\"#999\">N/A</text>\n",
                    MARGIN_LEFT + 6.0,
                    label_y,
                ));
            }
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Five-number summary of a duration series: min, q1, median, q3, max.
fn five_number_summary(durations: &[f64]) -> (f64, f64, f64, f64, f64) {
    let mut sorted = durations.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let quantile = |q: f64| -> f64 {
        if sorted.len() == 1 {
            return sorted[0];
        }
        let position = q * (sorted.len() - 1) as f64;
        let low = position.floor() as usize;
        let high = position.ceil() as usize;
        let fraction = position - low as f64;
        sorted[low] + (sorted[high] - sorted[low]) * fraction
    };
    (
        sorted[0],
        quantile(0.25),
        quantile(0.5),
        quantile(0.75),
        sorted[sorted.len() - 1],
    )
}

/// Render a box/whisker distribution chart, one box per implementation.
///
/// Implementations with no recorded durations (failures) get an "N/A"
/// column instead of a box.
pub fn render_box_chart(
    title: &str,
    subtitle: &str,
    series: &[(String, Vec<f64>)],
    width: u32,
    height: u32,
) -> String {
    let mut svg = header(width, height, title, subtitle);

    let plot_width = width as f64 - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = height as f64 - MARGIN_TOP - MARGIN_BOTTOM - 20.0;
    let columns = series.len().max(1) as f64;
    let column_width = plot_width / columns;
    let box_width = (column_width * 0.4).min(60.0);

    let max_value = series
        .iter()
        .flat_map(|(_, durations)| durations.iter().copied())
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);

    let baseline = MARGIN_TOP + plot_height;
    let y_of = |value: f64| baseline - (value / max_value) * plot_height;

    for (index, (name, durations)) in series.iter().enumerate() {
        let center = MARGIN_LEFT + (index as f64 + 0.5) * column_width;

        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"13\">{}</text>\n",
            center,
            baseline + 18.0,
            xml_escape(name),
        ));

        if durations.is_empty() {
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\" \
                 fill=\"#999\">N/A</text>\n",
                center,
                baseline - plot_height / 2.0,
            ));
            continue;
        }

        let (min, q1, median, q3, max) = five_number_summary(durations);
        let half = box_width / 2.0;

        // Whiskers
        svg.push_str(&format!(
            "<line x1=\"{c:.1}\" y1=\"{:.1}\" x2=\"{c:.1}\" y2=\"{:.1}\" stroke=\"#333\"/>\n",
            y_of(max),
            y_of(q3),
            c = center,
        ));
        svg.push_str(&format!(
            "<line x1=\"{c:.1}\" y1=\"{:.1}\" x2=\"{c:.1}\" y2=\"{:.1}\" stroke=\"#333\"/>\n",
            y_of(q1),
            y_of(min),
            c = center,
        ));

        // Interquartile box and median line
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" \
             stroke=\"#333\"/>\n",
            center - half,
            y_of(q3),
            box_width,
            (y_of(q1) - y_of(q3)).max(1.0),
            BOX_COLOR,
        ));
        svg.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#111\" \
             stroke-width=\"2\"/>\n",
            center - half,
            center + half,
            y = y_of(median),
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_chart_labels_every_entry() {
        let entries = vec![
            ("rust".to_string(), Some(0.5)),
            ("python".to_string(), None),
        ];
        let svg = render_bar_chart("Results", "5 repetitions", &entries, 800, 400);

        assert!(svg.contains("rust"));
        assert!(svg.contains("python"));
        assert!(svg.contains("N/A"));
        assert!(svg.contains("0.500 s"));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn box_chart_handles_empty_series() {
        let series = vec![
            ("c".to_string(), vec![0.4, 0.6, 0.5, 0.7]),
            ("broken".to_string(), vec![]),
        ];
        let svg = render_box_chart("Results", "4 repetitions", &series, 800, 400);

        assert!(svg.contains("broken"));
        assert!(svg.contains("N/A"));
    }

    #[test]
    fn five_number_summary_is_ordered() {
        let (min, q1, median, q3, max) = five_number_summary(&[5.0, 1.0, 3.0, 2.0, 4.0]);
        assert_eq!(min, 1.0);
        assert_eq!(median, 3.0);
        assert_eq!(max, 5.0);
        assert!(q1 <= median && median <= q3);
    }

    #[test]
    fn titles_are_escaped() {
        let svg = render_bar_chart("a < b", "x & y", &[], 400, 200);
        assert!(svg.contains("a &lt; b"));
        assert!(svg.contains("x &amp; y"));
    }
}
