//! HTML cross-tab table rendering.

use crate::result::round3;

const STYLE: &str = "table { border-collapse: collapse; font-family: sans-serif; } \
caption { font-size: 1.1em; padding: 8px; } \
th, td { border: 1px solid #999; padding: 6px 12px; text-align: right; } \
th { background: #eee; } td.na { color: #999; }";

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("<td>{:.3} s</td>", round3(v)),
        None => "<td class=\"na\">N/A</td>".to_string(),
    }
}

/// Render a cross-tab of implementations (rows) against metric columns.
///
/// `rows` pairs each implementation with one value per column; `None`
/// cells render as "N/A" (a failed implementation).
pub fn render_cross_tab(
    title: &str,
    columns: &[String],
    rows: &[(String, Vec<Option<f64>>)],
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\n");
    html.push_str(&format!("<style>{}</style>\n", STYLE));
    html.push_str("</head><body>\n<table>\n");
    html.push_str(&format!("<caption>{}</caption>\n", html_escape(title)));

    html.push_str("<tr><th></th>");
    for column in columns {
        html.push_str(&format!("<th>{}</th>", html_escape(column)));
    }
    html.push_str("</tr>\n");

    for (name, values) in rows {
        html.push_str(&format!("<tr><th>{}</th>", html_escape(name)));
        for column_index in 0..columns.len() {
            let value = values.get(column_index).copied().flatten();
            html.push_str(&format_cell(value));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>\n</body></html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_tab_renders_values_and_na() {
        let columns = vec!["md5".to_string(), "sha1".to_string()];
        let rows = vec![
            ("c".to_string(), vec![Some(0.25), Some(0.5)]),
            ("python".to_string(), vec![Some(1.0), None]),
        ];
        let html = render_cross_tab("Checksum results", &columns, &rows);

        assert!(html.contains("<caption>Checksum results</caption>"));
        assert!(html.contains("<th>md5</th>"));
        assert!(html.contains("0.250 s"));
        assert!(html.contains("N/A"));
    }

    #[test]
    fn short_rows_pad_with_na() {
        let columns = vec!["md5".to_string(), "sha1".to_string()];
        let rows = vec![("c".to_string(), vec![Some(0.25)])];
        let html = render_cross_tab("t", &columns, &rows);

        assert_eq!(html.matches("N/A").count(), 1);
    }
}
