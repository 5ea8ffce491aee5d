use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::Tabular;

/// Render a command acknowledgement. Table format lays an object out as
/// key/value pairs; anything else falls back to pretty JSON.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => match serde_json::to_value(value)? {
            Value::Object(map) => {
                let pairs: Vec<(String, String)> = map
                    .into_iter()
                    .map(|(key, value)| (key, cell(&value)))
                    .collect();
                Ok(table::render_pairs(&pairs))
            }
            other => Ok(serde_json::to_string_pretty(&other)?),
        },
    }
}

/// Format for documents that do not fit a table: raw stays raw, anything
/// else becomes pretty JSON.
#[must_use]
pub const fn structured(format: OutputFormat) -> OutputFormat {
    match format {
        OutputFormat::Raw => OutputFormat::Raw,
        OutputFormat::Json | OutputFormat::Table => OutputFormat::Json,
    }
}

pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print `rows` as a table, or `value` as JSON for the machine formats.
pub fn output_table<T, R>(value: &T, rows: &[R], format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize,
    R: Tabular,
{
    let rendered = match format {
        OutputFormat::Table => table::render_rows(rows, ui::prefs().table_color),
        OutputFormat::Json | OutputFormat::Raw => render(value, format)?,
    };
    println!("{rendered}");
    Ok(())
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
