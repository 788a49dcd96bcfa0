pub mod cascade;
pub mod tally;

use crate::error::ScoringError;
use crate::models::Competitor;
use log::info;
use serde::{Deserialize, Serialize};

pub use cascade::{Placement, TieBreak};
pub use tally::{CompetitorTally, Majority, majority_threshold};

/// How strictly judge rows are checked before scoring. Out-of-range ranks
/// are rejected in every mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Every judge row must be a permutation of `1..=M`.
    #[default]
    Strict,
    /// Duplicate ranks inside a row are aggregated as given.
    Permissive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    pub validation: ValidationMode,
}

/// Final standing for one competitor, with the working used to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorResult {
    pub competitor: String,
    pub scores: Vec<u32>,       // ranks received, in judge order
    pub counts: Vec<usize>,     // index r-1 = judges giving rank r
    pub cumulative_counts: Vec<usize>,
    pub majority_column: Option<usize>,
    pub cumulative_count_at_majority: usize,
    pub sum_of_scores_at_majority: u64,
    pub place: usize,
    pub highlight_place: Option<usize>,
}

/// Scores with the default (strict) options.
pub fn calculate_results(
    competitors: &[String],
    rankings: &[Vec<u32>],
) -> Result<Vec<CompetitorResult>, ScoringError> {
    calculate_results_with(competitors, rankings, &EngineOptions::default())
}

/// Ranks `competitors` from `rankings`, where `rankings[j][c]` is the rank
/// judge `j` gave competitor `c`. Results come back sorted by place.
pub fn calculate_results_with(
    competitors: &[String],
    rankings: &[Vec<u32>],
    options: &EngineOptions,
) -> Result<Vec<CompetitorResult>, ScoringError> {
    tally::validate(competitors, rankings, options.validation)?;

    info!(
        "Scoring {} competitors from {} judges (majority {})",
        competitors.len(),
        rankings.len(),
        majority_threshold(rankings.len())
    );

    let tallies = tally::aggregate(Competitor::roster(competitors), rankings);
    let placements = cascade::place_all(&tallies);

    let mut results: Vec<CompetitorResult> = placements
        .into_iter()
        .map(assemble)
        .collect();
    results.sort_by_key(|r| r.place);

    Ok(results)
}

fn assemble(placement: Placement<'_>) -> CompetitorResult {
    let tally = placement.tally;
    CompetitorResult {
        competitor: tally.competitor.name.clone(),
        scores: tally.scores.clone(),
        counts: tally.counts.clone(),
        cumulative_counts: tally.cumulative_counts.clone(),
        majority_column: tally.majority.map(|m| m.column),
        cumulative_count_at_majority: tally.majority.map_or(0, |m| m.cumulative_count),
        sum_of_scores_at_majority: tally.majority.map_or(0, |m| m.sum_of_scores),
        place: placement.place,
        highlight_place: placement.highlight,
    }
}
