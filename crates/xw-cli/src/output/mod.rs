use serde::Serialize;
use serde_json::Value;
use xw_report::{ReportKind, ReportPage};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response in the requested format.
///
/// Tables are built from the JSON shape: an array of objects becomes one row
/// per object, an object becomes key/value rows.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => Ok(render_value_table(serde_json::to_value(value)?)),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Render a report page. Tables use the report's column titles and show
/// markup as plain text.
pub fn render_page(
    report: &ReportKind,
    page: &ReportPage,
    start: i64,
    format: OutputFormat,
) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(page, format);
    }
    let headers: Vec<&str> = report.columns.iter().map(|c| c.title).collect();
    let rows: Vec<Vec<String>> = page
        .data
        .iter()
        .map(|row| row.iter().map(|cell| plain_text(cell)).collect())
        .collect();
    let mut out = table::render_table(&headers, &rows, ui::prefs().term_width);
    let first = start.max(0);
    let shown = i64::try_from(page.data.len()).unwrap_or(i64::MAX);
    out.push_str(&format!(
        "\n\n{} rows {}-{} of {} (filtered from {})",
        report.name,
        if shown == 0 { 0 } else { first + 1 },
        first + shown,
        page.records_filtered,
        page.records_total
    ));
    Ok(out)
}

fn render_value_table(value: Value) -> String {
    let width = ui::prefs().term_width;
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                return String::from("(no rows)");
            }
            let mut headers = Vec::<String>::new();
            for map in items.iter().filter_map(Value::as_object) {
                for key in map.keys() {
                    if !headers.contains(key) {
                        headers.push(key.clone());
                    }
                }
            }
            if headers.is_empty() {
                let rows: Vec<Vec<String>> = items.iter().map(|v| vec![cell_text(v)]).collect();
                return table::render_table(&["value"], &rows, width);
            }
            let rows: Vec<Vec<String>> = items
                .iter()
                .map(|item| {
                    headers
                        .iter()
                        .map(|h| item.get(h).map_or_else(|| String::from("-"), cell_text))
                        .collect()
                })
                .collect();
            let refs: Vec<&str> = headers.iter().map(String::as_str).collect();
            table::render_table(&refs, &rows, width)
        }
        Value::Object(map) => {
            let rows: Vec<Vec<String>> = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell_text(value)])
                .collect();
            table::render_table(&["key", "value"], &rows, width)
        }
        scalar => cell_text(&scalar),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// `<a href="..">12</a><br />13` → `12; 13`
fn plain_text(cell: &str) -> String {
    let cell = cell.replace("<br />", "; ");
    let mut out = String::with_capacity(cell.len());
    let mut in_tag = false;
    for ch in cell.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        rows: u32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&Row { name: "x", rows: 7 }, OutputFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["rows"], 7);
    }

    #[test]
    fn raw_render_is_single_line() {
        let out = render(&vec![Row { name: "x", rows: 7 }], OutputFormat::Raw).unwrap();
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_has_one_row_per_item() {
        let out = render(
            &vec![Row { name: "a", rows: 1 }, Row { name: "b", rows: 2 }],
            OutputFormat::Table,
        )
        .unwrap();
        assert!(out.starts_with("name"));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn markup_becomes_plain_text() {
        assert_eq!(
            plain_text("<a href=\"https://x/1\">1</a><br /><a href=\"https://x/2\">2</a>"),
            "1; 2"
        );
        assert_eq!(plain_text("Bird (5)"), "Bird (5)");
    }
}
