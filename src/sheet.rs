//! Scorecard reading. A scorecard is either a JSON `Competition` or a
//! plain-text sheet:
//!
//! ```text
//! # Jack & Jill finals
//! title: Jack & Jill Finals
//! competitor: Parker & Elliot
//! competitor: Morgan & Jordan
//! J1: 1 2
//! J2: 2, 1
//! ```
//!
//! Competitor lines fix the column order; every other `label: ranks` line
//! is one judge.

use crate::error::SheetError;
use crate::models::{Competition, JudgeCard};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    static ref FIELD_LINE: Regex = Regex::new(r"^(?i)(title|competitor)\s*:\s*(.*?)\s*$").unwrap();
    static ref JUDGE_LINE: Regex = Regex::new(r"^([^:]+?)\s*:\s*([0-9][0-9,\s]*)$").unwrap();
    static ref RANK_SEPARATOR: Regex = Regex::new(r"[,\s]+").unwrap();
}

/// Parses a scorecard, auto-detecting JSON versus the plain-text format.
pub fn parse_sheet(content: &str) -> Result<Competition, SheetError> {
    let trimmed = content.trim();
    let competition = if trimmed.starts_with('{') {
        serde_json::from_str::<Competition>(trimmed)?
    } else {
        parse_text(trimmed)?
    };

    if competition.competitors.is_empty() {
        return Err(SheetError::MissingCompetitors);
    }
    if competition.judges.is_empty() {
        return Err(SheetError::MissingJudges);
    }

    debug!(
        "Read scorecard \"{}\": {} competitors, {} judges",
        competition.title,
        competition.competitors.len(),
        competition.judges.len()
    );
    Ok(competition)
}

fn parse_text(content: &str) -> Result<Competition, SheetError> {
    let mut title = String::new();
    let mut competitors = Vec::new();
    let mut judges = Vec::new();

    for (i, raw) in content.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(caps) = FIELD_LINE.captures(line) {
            let value = caps[2].to_string();
            if caps[1].eq_ignore_ascii_case("title") {
                title = value;
            } else {
                competitors.push(value);
            }
        } else if let Some(caps) = JUDGE_LINE.captures(line) {
            let ranks = parse_ranks(&caps[2], line_no)?;
            judges.push(JudgeCard {
                name: Some(caps[1].to_string()),
                ranks,
            });
        } else {
            return Err(SheetError::UnknownLine {
                line: line_no,
                content: line.to_string(),
            });
        }
    }

    Ok(Competition::new(title, competitors, judges))
}

fn parse_ranks(field: &str, line: usize) -> Result<Vec<u32>, SheetError> {
    RANK_SEPARATOR
        .split(field.trim())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u32>().map_err(|_| SheetError::BadRank {
                line,
                value: token.to_string(),
            })
        })
        .collect()
}
