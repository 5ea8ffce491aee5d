use pb_core::{NodeOutcome, OutcomeStatus};
use pb_sync::FeatureSummary;

/// A value that prints as one table row.
pub trait Tabular {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;

    /// Column whose cells are colored by outcome.
    fn result_column() -> Option<usize> {
        None
    }
}

impl Tabular for NodeOutcome {
    const HEADERS: &'static [&'static str] = &["LEVEL", "NAME", "PARENT", "RESULT", "DETAIL"];

    fn cells(&self) -> Vec<String> {
        let (result, detail) = match &self.status {
            OutcomeStatus::Created => ("created", String::new()),
            OutcomeStatus::Failed { status, message } => {
                ("failed", format!("HTTP {status}: {message}"))
            }
        };
        vec![
            self.level.to_string(),
            self.name.clone(),
            self.parent.clone(),
            result.to_string(),
            detail,
        ]
    }

    fn result_column() -> Option<usize> {
        Some(3)
    }
}

impl Tabular for FeatureSummary {
    const HEADERS: &'static [&'static str] = &["NAME", "DESCRIPTION", "PROJECT"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone(),
            self.project.clone(),
        ]
    }
}

#[must_use]
pub fn render_rows<T: Tabular>(rows: &[T], color: bool) -> String {
    let cells: Vec<Vec<String>> = rows.iter().map(Tabular::cells).collect();
    let paint = if color { T::result_column() } else { None };
    layout(T::HEADERS, &cells, paint)
}

/// Two-column `KEY  VALUE` table for command acknowledgements.
#[must_use]
pub fn render_pairs(pairs: &[(String, String)]) -> String {
    let cells: Vec<Vec<String>> = pairs
        .iter()
        .map(|(key, value)| vec![key.clone(), value.clone()])
        .collect();
    layout(&["KEY", "VALUE"], &cells, None)
}

fn layout(headers: &[&str], rows: &[Vec<String>], paint: Option<usize>) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .fold(header.chars().count(), usize::max)
        })
        .collect();

    let header_cells: Vec<String> = headers.iter().map(ToString::to_string).collect();
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(&header_cells, &widths, None));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(rows.iter().map(|row| line(row, &widths, paint)));
    lines.join("\n")
}

fn line(cells: &[String], widths: &[usize], paint: Option<usize>) -> String {
    let joined = widths
        .iter()
        .enumerate()
        .map(|(index, width)| {
            let cell = cells.get(index).map_or("", String::as_str);
            let padded = format!("{cell:<width$}");
            if paint == Some(index) {
                colorize(cell, &padded)
            } else {
                padded
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    joined.trim_end().to_string()
}

fn colorize(result: &str, padded: &str) -> String {
    let code = match result {
        "created" => "32",
        "failed" => "31",
        _ => return padded.to_string(),
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}
