#[cfg(test)]
#[path = "results_view_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::DatabaseResult;
use crate::domain::models::DocumentMatch;
use crate::domain::models::DocumentResult;
use crate::domain::models::RenderableResult;
use crate::domain::models::ResultBanner;
use crate::domain::models::ResultBody;
use crate::domain::models::ResultTable;

fn heading(text: &str) -> Line<'static> {
    return Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ));
}

fn banner_line(banner: &ResultBanner) -> Line<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut spans = vec![
        Span::styled("Type: ", bold),
        Span::raw(banner.query_type.to_string()),
        Span::styled(" Time: ", bold),
        Span::raw(format!("{}s", banner.time)),
    ];

    if banner.from_cache {
        spans.push(Span::styled(
            " (cache)",
            Style::default().fg(Color::Cyan),
        ));
    }

    return Line::from(spans);
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    return cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| {
            let width = *width;
            return format!("{cell:<width$}");
        })
        .collect::<Vec<String>>()
        .join(" | ")
        .trim_end()
        .to_string();
}

fn table_lines(table: &ResultTable) -> Vec<Line<'static>> {
    let widths = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            return table
                .rows
                .iter()
                .filter_map(|row| return row.get(idx))
                .map(|cell| return cell.chars().count())
                .chain([column.chars().count()])
                .max()
                .unwrap_or(0);
        })
        .collect::<Vec<usize>>();

    let separator = widths
        .iter()
        .map(|width| return "-".repeat(*width))
        .collect::<Vec<String>>()
        .join("-+-");

    let mut lines = vec![
        Line::from(Span::styled(
            pad_row(&table.columns, &widths),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(separator),
    ];

    for row in table.rows.iter() {
        lines.push(Line::from(pad_row(row, &widths)));
    }

    return lines;
}

fn document_lines(document: &DocumentMatch) -> Vec<Line<'static>> {
    return vec![
        Line::from(vec![
            Span::styled(
                document.filename.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" (score: {})", document.score_label())),
        ]),
        Line::from(Span::styled(
            document.snippet.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
}

pub struct ResultsView {}

impl ResultsView {
    pub fn lines(result: Option<&RenderableResult>) -> Vec<Line<'static>> {
        let result = match result {
            Some(result) => result,
            None => return vec![Line::from("No results yet.")],
        };

        let mut lines = vec![banner_line(&result.banner), Line::from("")];

        match &result.body {
            ResultBody::Database(database) => {
                lines.push(heading("Database results"));
                match database {
                    DatabaseResult::Error(err) => {
                        lines.push(Line::from(Span::styled(
                            err.to_string(),
                            Style::default().fg(Color::Red),
                        )));
                    }
                    DatabaseResult::Rows(table) => {
                        lines.extend(table_lines(table));
                    }
                    DatabaseResult::Empty => (),
                }
            }
            ResultBody::Documents(documents) => {
                lines.push(heading("Document results"));
                match documents {
                    DocumentResult::Matches(matches) => {
                        lines.extend(matches.iter().flat_map(document_lines));
                    }
                    DocumentResult::Empty => {
                        lines.push(Line::from("No documents matched."));
                    }
                }
            }
            ResultBody::Nothing => (),
        }

        return lines;
    }

    /// Unstyled rendering used for one-shot CLI output.
    pub fn plain(result: Option<&RenderableResult>) -> Vec<String> {
        return ResultsView::lines(result)
            .iter()
            .map(|line| {
                return line
                    .spans
                    .iter()
                    .map(|span| return span.content.as_ref())
                    .collect::<String>()
                    .trim_end()
                    .to_string();
            })
            .collect();
    }
}
