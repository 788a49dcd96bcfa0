use crate::error::{DegenerateInputError, DimensionError, ScoringError};
use crate::models::Competitor;
use crate::placement::ValidationMode;
use log::{debug, warn};

/// Snapshot taken at the first column where a competitor holds a majority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Majority {
    pub column: usize,
    pub cumulative_count: usize,
    pub sum_of_scores: u64,
}

/// Working record for one competitor: the histogram of ranks it received
/// and where its majority falls.
#[derive(Debug, Clone)]
pub struct CompetitorTally {
    pub competitor: Competitor,
    pub scores: Vec<u32>,
    pub counts: Vec<usize>,
    pub cumulative_counts: Vec<usize>,
    pub majority: Option<Majority>,
}

/// Votes needed for a strict majority of `judges`.
pub fn majority_threshold(judges: usize) -> usize {
    judges / 2 + 1
}

/// Checks that the matrix is N x M with ranks inside `1..=M`. Duplicate
/// ranks inside a row are only rejected in strict mode.
pub fn validate(
    competitors: &[String],
    rankings: &[Vec<u32>],
    mode: ValidationMode,
) -> Result<(), ScoringError> {
    let expected = competitors.len();
    if expected == 0 {
        return Err(DimensionError::NoCompetitors.into());
    }
    if rankings.is_empty() {
        return Err(DimensionError::NoJudges.into());
    }

    // Every judge must rank every competitor
    for (judge, row) in rankings.iter().enumerate() {
        if row.len() != expected {
            return Err(DimensionError::RowLength {
                judge: judge + 1,
                expected,
                found: row.len(),
            }
            .into());
        }
    }

    // Ranks must fit the histogram; repeats only pass in permissive mode
    for (judge, row) in rankings.iter().enumerate() {
        let mut seen = vec![false; expected];
        for (competitor, &rank) in row.iter().enumerate() {
            if rank == 0 || rank as usize > expected {
                return Err(DegenerateInputError::RankOutOfRange {
                    judge: judge + 1,
                    competitor: competitor + 1,
                    rank,
                    max: expected,
                }
                .into());
            }
            let slot = &mut seen[rank as usize - 1];
            if *slot {
                match mode {
                    ValidationMode::Strict => {
                        return Err(DegenerateInputError::DuplicateRank {
                            judge: judge + 1,
                            rank,
                        }
                        .into());
                    }
                    ValidationMode::Permissive => {
                        warn!("Judge {} gave rank {} more than once; aggregating as-is", judge + 1, rank);
                    }
                }
            }
            *slot = true;
        }
    }

    Ok(())
}

/// Builds each competitor's histogram from a matrix that already passed
/// `validate`, then locates its majority column.
pub fn aggregate(roster: Vec<Competitor>, rankings: &[Vec<u32>]) -> Vec<CompetitorTally> {
    let columns = roster.len();
    let majority = majority_threshold(rankings.len());

    let mut tallies: Vec<CompetitorTally> = roster
        .into_iter()
        .map(|competitor| CompetitorTally {
            competitor,
            scores: Vec::with_capacity(rankings.len()),
            counts: vec![0; columns],
            cumulative_counts: vec![0; columns],
            majority: None,
        })
        .collect();

    // Count how many judges gave each rank
    for row in rankings {
        for (tally, &rank) in tallies.iter_mut().zip(row) {
            tally.scores.push(rank);
            tally.counts[rank as usize - 1] += 1;
        }
    }

    // Find where each competitor first holds a majority
    for tally in &mut tallies {
        tally.detect_majority(majority);
        debug!(
            "{}: counts {:?}, majority at {:?}",
            tally.competitor.name, tally.counts, tally.majority
        );
    }

    tallies
}

impl CompetitorTally {
    fn detect_majority(&mut self, majority: usize) {
        let mut cumulative = 0;
        let mut sum: u64 = 0;
        for (column, &count) in self.counts.iter().enumerate() {
            cumulative += count;
            sum += count as u64 * (column as u64 + 1);
            self.cumulative_counts[column] = cumulative;

            // Snapshot only the first qualifying column
            if self.majority.is_none() && cumulative >= majority {
                self.majority = Some(Majority {
                    column,
                    cumulative_count: cumulative,
                    sum_of_scores: sum,
                });
            }
        }
    }

    /// Majority column, with a missing majority sorting after every real column.
    pub fn majority_column_or(&self, fallback: usize) -> usize {
        self.majority.map_or(fallback, |m| m.column)
    }

    /// Number of judges who ranked this competitor `rank` or better.
    pub fn judges_at_or_above(&self, rank: u32) -> usize {
        self.scores.iter().filter(|&&score| score <= rank).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("C{}", i + 1)).collect()
    }

    fn tally(rankings: &[Vec<u32>]) -> Vec<CompetitorTally> {
        let names = names(rankings[0].len());
        validate(&names, rankings, ValidationMode::Strict).unwrap();
        aggregate(Competitor::roster(&names), rankings)
    }

    #[test]
    fn majority_threshold_is_strict() {
        assert_eq!(majority_threshold(1), 1);
        assert_eq!(majority_threshold(2), 2);
        assert_eq!(majority_threshold(3), 2);
        assert_eq!(majority_threshold(4), 3);
        assert_eq!(majority_threshold(5), 3);
        assert_eq!(majority_threshold(7), 4);
    }

    #[test]
    fn histograms_follow_judge_order() {
        let tallies = tally(&[vec![3, 2, 1], vec![2, 3, 1], vec![2, 1, 3]]);

        assert_eq!(tallies[0].scores, vec![3, 2, 2]);
        assert_eq!(tallies[0].counts, vec![0, 2, 1]);
        assert_eq!(tallies[0].cumulative_counts, vec![0, 2, 3]);
        assert_eq!(tallies[2].counts, vec![2, 0, 1]);
    }

    #[test]
    fn majority_snapshot_is_taken_at_first_qualifying_column() {
        let tallies = tally(&[
            vec![1, 2, 3, 4],
            vec![3, 1, 2, 4],
            vec![1, 2, 4, 3],
            vec![1, 3, 2, 4],
            vec![3, 2, 1, 4],
        ]);

        assert_eq!(
            tallies[0].majority,
            Some(Majority { column: 0, cumulative_count: 3, sum_of_scores: 3 })
        );
        assert_eq!(
            tallies[1].majority,
            Some(Majority { column: 1, cumulative_count: 4, sum_of_scores: 7 })
        );
        assert_eq!(
            tallies[2].majority,
            Some(Majority { column: 1, cumulative_count: 3, sum_of_scores: 5 })
        );
        assert_eq!(
            tallies[3].majority,
            Some(Majority { column: 3, cumulative_count: 5, sum_of_scores: 19 })
        );
    }

    #[test]
    fn last_column_majority_is_valid() {
        let tallies = tally(&[vec![1, 2], vec![1, 2], vec![2, 1]]);
        assert_eq!(tallies[1].majority.map(|m| m.column), Some(1));
        assert_eq!(tallies[1].cumulative_counts, vec![1, 3]);
    }

    #[test]
    fn window_counts() {
        let tallies = tally(&[vec![1, 2, 3], vec![2, 1, 3], vec![3, 1, 2]]);
        assert_eq!(tallies[0].judges_at_or_above(2), 2);
        assert_eq!(tallies[0].judges_at_or_above(3), 3);
        assert_eq!(tallies[1].judges_at_or_above(1), 2);
        assert_eq!(tallies[2].majority_column_or(9), 2);
    }

    #[test]
    fn rejects_empty_inputs() {
        assert_eq!(
            validate(&[], &[vec![1]], ValidationMode::Strict),
            Err(DimensionError::NoCompetitors.into())
        );
        assert_eq!(
            validate(&names(2), &[], ValidationMode::Strict),
            Err(DimensionError::NoJudges.into())
        );
    }

    #[test]
    fn rejects_short_rows() {
        let result = validate(&names(3), &[vec![1, 2, 3], vec![1, 2]], ValidationMode::Strict);
        assert_eq!(
            result,
            Err(DimensionError::RowLength { judge: 2, expected: 3, found: 2 }.into())
        );
    }

    #[test]
    fn out_of_range_ranks_are_rejected_in_both_modes() {
        for mode in [ValidationMode::Strict, ValidationMode::Permissive] {
            let result = validate(&names(2), &[vec![0, 1]], mode);
            assert!(matches!(
                result,
                Err(ScoringError::DegenerateInput(DegenerateInputError::RankOutOfRange { rank: 0, .. }))
            ));
            let result = validate(&names(2), &[vec![1, 3]], mode);
            assert!(matches!(
                result,
                Err(ScoringError::DegenerateInput(DegenerateInputError::RankOutOfRange {
                    competitor: 2,
                    rank: 3,
                    ..
                }))
            ));
        }
    }

    #[test]
    fn duplicates_depend_on_mode() {
        let rankings = [vec![1, 2, 3], vec![1, 1, 3]];
        assert_eq!(
            validate(&names(3), &rankings, ValidationMode::Strict),
            Err(DegenerateInputError::DuplicateRank { judge: 2, rank: 1 }.into())
        );
        assert_eq!(validate(&names(3), &rankings, ValidationMode::Permissive), Ok(()));
    }
}
