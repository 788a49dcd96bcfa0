//! Human-facing output: the results table and the JSON result sheet.

use crate::models::Competition;
use crate::placement::{CompetitorResult, majority_threshold};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything needed to publish a scored competition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSheet {
    pub competition_id: String,
    pub title: String,
    pub judges: Vec<String>,
    pub majority: usize,
    pub scored_at: DateTime<Utc>,
    pub results: Vec<CompetitorResult>,
}

impl ResultSheet {
    pub fn new(competition: &Competition, results: Vec<CompetitorResult>) -> Self {
        Self {
            competition_id: competition.id.clone(),
            title: competition.title.clone(),
            judges: competition.judge_labels(),
            majority: majority_threshold(competition.judges.len()),
            scored_at: Utc::now(),
            results,
        }
    }
}

/// `1st`, `2nd`, `3rd`, `4th`... with the teens always `th`.
pub fn ordinal_suffix(place: usize) -> String {
    let suffix = match (place % 10, place % 100) {
        (1, tens) if tens != 11 => "st",
        (2, tens) if tens != 12 => "nd",
        (3, tens) if tens != 13 => "rd",
        _ => "th",
    };
    format!("{}{}", place, suffix)
}

/// Renders the standard relative placement table: one column per judge,
/// one cumulative column per rank window (`1-1`, `1-2`...), then the place.
/// The cell that decided each placement is bracketed along with the sum of
/// scores inside that window.
pub fn render_table(results: &[CompetitorResult], judge_labels: &[String]) -> String {
    let windows = results.first().map_or(0, |r| r.cumulative_counts.len());

    let mut header: Vec<String> = vec!["Competitor".to_string()];
    header.extend(judge_labels.iter().cloned());
    header.extend((1..=windows).map(|w| format!("1-{}", w)));
    header.push("Place".to_string());

    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|result| {
            let mut row = vec![result.competitor.clone()];
            row.extend(result.scores.iter().map(|s| s.to_string()));
            row.extend(result.cumulative_counts.iter().enumerate().map(|(column, count)| {
                if result.highlight_place == Some(column) {
                    format!("[{} ({})]", count, sum_through(result, column))
                } else {
                    count.to_string()
                }
            }));
            row.push(ordinal_suffix(result.place));
            row
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = String::new();
    push_row(&mut table, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    table.push_str(&rule.join("-|-"));
    table.push('\n');
    for row in &rows {
        push_row(&mut table, row, &widths);
    }
    table
}

fn push_row(table: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i == 0 {
                format!("{:<width$}", cell, width = width)
            } else {
                format!("{:>width$}", cell, width = width)
            }
        })
        .collect();
    table.push_str(padded.join(" | ").trim_end());
    table.push('\n');
}

fn sum_through(result: &CompetitorResult, column: usize) -> u64 {
    result
        .counts
        .iter()
        .take(column + 1)
        .enumerate()
        .map(|(i, &count)| count as u64 * (i as u64 + 1))
        .sum()
}
