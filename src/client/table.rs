//! Generic result-table rendering.
//!
//! Columns come from the keys of the first row; every later row is read in
//! that column order.

use chrono::{DateTime, Local, NaiveDateTime};
use serde_json::Value;

use crate::domain::row::Row;

pub const NO_DATA: &str = "No data to display.";

const DISPLAY_FORMAT: &str = "%d.%m.%Y, %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    Empty(String),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Rows out of a decoded response body; anything but an array of objects
/// yields no rows.
pub fn rows_from_value(value: Option<Value>) -> Vec<Row> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(row) => Some(row),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

pub fn render_rows(rows: &[Row]) -> TableView {
    let Some(first) = rows.first() else {
        return TableView::Empty(NO_DATA.to_string());
    };
    let headers: Vec<String> = first.keys().cloned().collect();
    let body = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|h| render_value(row.get(h)))
                .collect()
        })
        .collect();
    TableView::Table {
        headers,
        rows: body,
    }
}

pub fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => format_timestamp(s).unwrap_or_else(|| s.clone()),
        Some(other) => other.to_string(),
    }
}

/// `None` unless `s` is an ISO `YYYY-MM-DDTHH:MM:SS` timestamp. Offset-carrying
/// values are shown in local time; naive values are taken as already local.
pub fn format_timestamp(s: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
}

impl TableView {
    /// Plain-text layout with columns padded to their widest cell.
    pub fn to_text(&self) -> String {
        let (headers, rows) = match self {
            TableView::Empty(message) => return message.clone(),
            TableView::Table { headers, rows } => (headers, rows),
        };

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = Vec::with_capacity(rows.len() + 2);
        out.push(line(headers.as_slice()));
        out.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        out.extend(rows.iter().map(|row| line(row.as_slice())));
        out.join("\n")
    }
}
