//! The placement cascade: repeatedly picks the competitors holding the
//! earliest majority and narrows them down to a single winner, or to a
//! group that is declared equal.
//!
//! Each round is a sequence of pure filters over the unplaced tallies.
//! Nothing here mutates a tally.

use crate::placement::tally::CompetitorTally;
use log::{debug, warn};
use std::cmp::Reverse;

/// The place a competitor received and the column that justified it.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub tally: &'a CompetitorTally,
    pub place: usize,
    /// `None` when the competitor was placed by the equal-tie fallback.
    pub highlight: Option<usize>,
}

/// Tie-break levels, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    CumulativeCount,
    SumOfScores,
    ExtendedRank,
    HeadToHead,
}

type Candidates<'a> = Vec<&'a CompetitorTally>;

#[derive(Debug)]
enum Decision<'a> {
    Winner { tally: &'a CompetitorTally, highlight: usize },
    Equal(Candidates<'a>),
}

#[derive(Debug)]
enum Round<'a> {
    Decided(Decision<'a>),
    Tied { candidates: Candidates<'a>, next: TieBreak },
}

/// Assigns a place to every tally. Placements come back in the order they
/// were decided.
pub fn place_all(tallies: &[CompetitorTally]) -> Vec<Placement<'_>> {
    let columns = tallies.len();
    let mut placed = vec![false; columns];
    let mut placements = Vec::with_capacity(columns);
    let mut next_place = 1;

    while placements.len() < columns {
        let unplaced: Candidates<'_> = tallies
            .iter()
            .filter(|t| !placed[t.competitor.index])
            .collect();

        // Earliest majority column still in play
        let Some(frontier) = unplaced.iter().map(|t| t.majority_column_or(columns)).min() else {
            break;
        };

        // Everyone who reached majority at that column competes for this place
        let candidates: Candidates<'_> = unplaced
            .into_iter()
            .filter(|t| t.majority_column_or(columns) == frontier)
            .collect();
        debug!(
            "Place {}: {} candidate(s) with majority at column {}",
            next_place,
            candidates.len(),
            frontier
        );

        match resolve(columns, candidates, frontier) {
            Decision::Winner { tally, highlight } => {
                debug!("{} takes place {}", tally.competitor.name, next_place);
                placed[tally.competitor.index] = true;
                placements.push(Placement {
                    tally,
                    place: next_place,
                    highlight: Some(highlight),
                });
                next_place += 1;
            }
            Decision::Equal(group) => {
                // Truly equal: one shared place, and the counter skips past the group
                warn!(
                    "{} competitors remain exactly tied; all share place {}",
                    group.len(),
                    next_place
                );
                for &tally in &group {
                    placed[tally.competitor.index] = true;
                    placements.push(Placement {
                        tally,
                        place: next_place,
                        highlight: None,
                    });
                }
                next_place += group.len();
            }
        }
    }

    placements
}

fn resolve(columns: usize, candidates: Candidates<'_>, frontier: usize) -> Decision<'_> {
    let mut round = settle(candidates, frontier, TieBreak::CumulativeCount);
    loop {
        match round {
            Round::Decided(decision) => return decision,
            Round::Tied { candidates, next } => {
                debug!("{} candidates tied, applying {:?}", candidates.len(), next);
                round = next.apply(columns, candidates, frontier);
            }
        }
    }
}

/// A single survivor wins with `highlight`; otherwise the tie moves on.
fn settle(candidates: Candidates<'_>, highlight: usize, next: TieBreak) -> Round<'_> {
    if candidates.len() == 1 {
        Round::Decided(Decision::Winner {
            tally: candidates[0],
            highlight,
        })
    } else {
        Round::Tied { candidates, next }
    }
}

fn keep_max<'a, K: Ord>(
    candidates: Candidates<'a>,
    key: impl Fn(&CompetitorTally) -> K,
) -> Candidates<'a> {
    let Some(best) = candidates.iter().map(|t| key(*t)).max() else {
        return candidates;
    };
    candidates.into_iter().filter(|t| key(*t) == best).collect()
}

impl TieBreak {
    fn apply<'a>(self, columns: usize, candidates: Candidates<'a>, frontier: usize) -> Round<'a> {
        match self {
            TieBreak::CumulativeCount => {
                // More judges inside the majority window wins
                let survivors =
                    keep_max(candidates, |t| t.majority.map_or(0, |m| m.cumulative_count));
                settle(survivors, frontier, TieBreak::SumOfScores)
            }
            TieBreak::SumOfScores => {
                // Lower total of the majority ranks wins
                let survivors = keep_max(candidates, |t| {
                    Reverse(t.majority.map_or(u64::MAX, |m| m.sum_of_scores))
                });
                settle(survivors, frontier, TieBreak::ExtendedRank)
            }
            TieBreak::ExtendedRank => extended_rank(columns, candidates, frontier),
            TieBreak::HeadToHead => {
                let wins = head_to_head_wins(&candidates);
                let best = wins.iter().copied().max().unwrap_or(0);
                let survivors: Candidates<'a> = candidates
                    .into_iter()
                    .zip(wins)
                    .filter(|&(_, w)| w == best)
                    .map(|(t, _)| t)
                    .collect();
                if survivors.len() == 1 {
                    Round::Decided(Decision::Winner {
                        tally: survivors[0],
                        highlight: frontier,
                    })
                } else {
                    Round::Decided(Decision::Equal(survivors))
                }
            }
        }
    }
}

/// Widens the window one rank at a time past the majority column, keeping
/// whoever has the most judges inside it.
fn extended_rank(columns: usize, mut candidates: Candidates<'_>, frontier: usize) -> Round<'_> {
    for next_rank in frontier + 1..columns {
        let window = next_rank as u32 + 1;
        candidates = keep_max(candidates, |t| t.judges_at_or_above(window));
        if candidates.len() == 1 {
            return settle(candidates, next_rank, TieBreak::HeadToHead);
        }
    }
    Round::Tied {
        candidates,
        next: TieBreak::HeadToHead,
    }
}

/// Per judge, a candidate's position is the number of tied candidates that
/// judge scored strictly better, and it earns `k - position - 1` wins.
/// Equal raw scores therefore share a position.
pub fn head_to_head_wins(candidates: &[&CompetitorTally]) -> Vec<usize> {
    let judges = candidates.first().map_or(0, |t| t.scores.len());
    let mut wins = vec![0; candidates.len()];

    for judge in 0..judges {
        for (slot, tally) in candidates.iter().enumerate() {
            let score = tally.scores[judge];
            let better = candidates
                .iter()
                .filter(|other| other.scores[judge] < score)
                .count();
            wins[slot] += candidates.len() - better - 1;
        }
    }

    wins
}
